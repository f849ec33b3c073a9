//! In-memory session state: the skill portfolio, generation results,
//! history, and display preferences. Nothing here touches the network or
//! the filesystem; persistence of results is handled by [`crate::export`].

use chrono::{DateTime, Local};
use ratatui::style::Color;

use crate::prompts::{TaskKind, TaskParams};

/// Skills offered by the quick-add picker.
pub const SAMPLE_SKILLS: [&str; 12] = [
    "Python Programming",
    "Data Structures",
    "Machine Learning",
    "Web Development",
    "Database Design",
    "Cloud Computing",
    "UI/UX Design",
    "Project Management",
    "DevOps",
    "Cybersecurity",
    "Mobile App Development",
    "Data Analytics",
];

/// One completed generation, kept until the next run of the same task kind
/// replaces it.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub text: String,
    pub generated_at: DateTime<Local>,
    pub label: String,
    /// The exact inputs that produced this text.
    pub params: TaskParams,
}

impl GenerationResult {
    pub fn task(&self) -> TaskKind {
        self.params.task()
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub label: String,
    pub date: String,
}

/// Color preset for the UI accent. The names mirror the preset list users
/// already know; each maps to a single accent color in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    PurpleGradient,
    OceanBlue,
    SunsetOrange,
    ForestGreen,
    RosePink,
    NightSky,
    CosmicPurple,
    MintFresh,
    GoldenHour,
    DeepSpace,
    CherryBlossom,
    Aurora,
}

impl Theme {
    pub const ALL: [Theme; 12] = [
        Theme::PurpleGradient,
        Theme::OceanBlue,
        Theme::SunsetOrange,
        Theme::ForestGreen,
        Theme::RosePink,
        Theme::NightSky,
        Theme::CosmicPurple,
        Theme::MintFresh,
        Theme::GoldenHour,
        Theme::DeepSpace,
        Theme::CherryBlossom,
        Theme::Aurora,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::PurpleGradient => "Purple Gradient",
            Theme::OceanBlue => "Ocean Blue",
            Theme::SunsetOrange => "Sunset Orange",
            Theme::ForestGreen => "Forest Green",
            Theme::RosePink => "Rose Pink",
            Theme::NightSky => "Night Sky",
            Theme::CosmicPurple => "Cosmic Purple",
            Theme::MintFresh => "Mint Fresh",
            Theme::GoldenHour => "Golden Hour",
            Theme::DeepSpace => "Deep Space",
            Theme::CherryBlossom => "Cherry Blossom",
            Theme::Aurora => "Aurora",
        }
    }

    pub fn accent(&self) -> Color {
        match self {
            Theme::PurpleGradient => Color::Rgb(0x66, 0x7e, 0xea),
            Theme::OceanBlue => Color::Rgb(0x2a, 0x52, 0x98),
            Theme::SunsetOrange => Color::Rgb(0xfa, 0x70, 0x9a),
            Theme::ForestGreen => Color::Rgb(0x71, 0xb2, 0x80),
            Theme::RosePink => Color::Rgb(0xf8, 0x57, 0xa6),
            Theme::NightSky => Color::Rgb(0x00, 0x4e, 0x92),
            Theme::CosmicPurple => Color::Rgb(0x8e, 0x2d, 0xe2),
            Theme::MintFresh => Color::Rgb(0x00, 0xb4, 0xdb),
            Theme::GoldenHour => Color::Rgb(0xf2, 0x99, 0x4a),
            Theme::DeepSpace => Color::Rgb(0x24, 0x3b, 0x55),
            Theme::CherryBlossom => Color::Rgb(0xff, 0x9a, 0x9e),
            Theme::Aurora => Color::Rgb(0x5e, 0xfc, 0xe8),
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 3] = [
        AnimationSpeed::Slow,
        AnimationSpeed::Normal,
        AnimationSpeed::Fast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "Slow",
            AnimationSpeed::Normal => "Normal",
            AnimationSpeed::Fast => "Fast",
        }
    }

    /// Frames between pulse steps while a generation is running.
    pub fn frames_per_step(&self) -> u64 {
        match self {
            AnimationSpeed::Slow => 16,
            AnimationSpeed::Normal => 8,
            AnimationSpeed::Fast => 4,
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    #[default]
    Glassmorphism,
    Solid,
}

impl CardStyle {
    pub const ALL: [CardStyle; 2] = [CardStyle::Glassmorphism, CardStyle::Solid];

    pub fn label(&self) -> &'static str {
        match self {
            CardStyle::Glassmorphism => "Glassmorphism",
            CardStyle::Solid => "Solid",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn label(&self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: i32) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0) as i32;
    let len = all.len() as i32;
    all[((pos + step).rem_euclid(len)) as usize]
}

/// Display preferences edited live from the settings modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub animation_speed: AnimationSpeed,
    pub card_style: CardStyle,
    pub font_size: FontSize,
    pub show_animations: bool,
    pub auto_save: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::PurpleGradient,
            animation_speed: AnimationSpeed::Normal,
            card_style: CardStyle::Glassmorphism,
            font_size: FontSize::Medium,
            show_animations: true,
            auto_save: true,
        }
    }
}

impl Preferences {
    pub fn reset(&mut self) {
        *self = Preferences::default();
    }
}

/// All mutable session state. Created fresh at startup and discarded at
/// exit; only exports outlive the process.
#[derive(Debug, Default)]
pub struct SessionState {
    skills: Vec<String>,
    results: Vec<GenerationResult>,
    history: Vec<HistoryEntry>,
    pub prefs: Preferences,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Add a skill, preserving insertion order. Rejects empty or
    /// whitespace-only input and exact duplicates.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }

    pub fn clear_skills(&mut self) {
        self.skills.clear();
    }

    /// Store a finished result, replacing any previous result of the same
    /// task kind.
    pub fn set_result(&mut self, result: GenerationResult) {
        let task = result.task();
        self.results.retain(|r| r.task() != task);
        self.results.push(result);
    }

    pub fn result_for(&self, task: TaskKind) -> Option<&GenerationResult> {
        self.results.iter().find(|r| r.task() == task)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Append-only; entries are never rewritten when a result is replaced.
    pub fn append_history(&mut self, label: String, date: String) {
        self.history.push(HistoryEntry { label, date });
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}
