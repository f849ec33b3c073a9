//! Form state and keyboard handling for the task tabs.
//!
//! Each tab owns a small struct of inputs plus a focused-field enum with
//! `next`/`prev` for Tab-key traversal. Free handler functions mutate the
//! [`App`] directly, one per tab, dispatched from the event loop.

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use crate::app::{App, NoticeKind};
use crate::prompts::{
    ComparisonParams, CourseDetailParams, DetailLevel, ProgramType, RoadmapParams,
    ScheduleParams, SkillGapParams, SyllabusParams, TaskKind,
};
use crate::session::SAMPLE_SKILLS;

/// Fallback skill picker entries when the portfolio is empty.
pub const DEFAULT_RELATED_SKILLS: [&str; 3] = ["Python", "JavaScript", "SQL"];

/// Single-line text input with a movable cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert_char(&mut self, c: char) {
        if self.cursor >= self.value.len() {
            self.value.push(c);
        } else {
            self.value.insert(self.cursor, c);
        }
        self.cursor += c.len_utf8();
    }

    /// Backspace: remove the character before the cursor.
    pub fn delete_char_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(&self.value, self.cursor);
        self.value.remove(prev);
        self.cursor = prev;
    }

    /// Delete key: remove the character at the cursor.
    pub fn delete_char_at(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_char_boundary(&self.value, self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = next_char_boundary(&self.value, self.cursor);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

fn prev_char_boundary(s: &str, from: usize) -> usize {
    let mut i = from - 1;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, from: usize) -> usize {
    let mut i = from + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Bounded integer input adjusted with Left/Right.
#[derive(Debug, Clone, Copy)]
pub struct Stepper {
    pub value: u32,
    min: u32,
    max: u32,
}

impl Stepper {
    pub fn new(value: u32, min: u32, max: u32) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn increment(&mut self) {
        if self.value < self.max {
            self.value += 1;
        }
    }

    pub fn decrement(&mut self) {
        if self.value > self.min {
            self.value -= 1;
        }
    }
}

/// The seven top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Syllabus,
    Result,
    CourseDetail,
    SkillGap,
    Schedule,
    Comparison,
    Roadmap,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Syllabus,
        Tab::Result,
        Tab::CourseDetail,
        Tab::SkillGap,
        Tab::Schedule,
        Tab::Comparison,
        Tab::Roadmap,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Syllabus => "Generate",
            Tab::Result => "Syllabus",
            Tab::CourseDetail => "Course Deep Dive",
            Tab::SkillGap => "Skill Gap",
            Tab::Schedule => "Schedule",
            Tab::Comparison => "Compare",
            Tab::Roadmap => "Roadmap",
        }
    }

    /// The task this tab submits, if it has a form.
    pub fn task(&self) -> Option<TaskKind> {
        match self {
            Tab::Syllabus => Some(TaskKind::Syllabus),
            Tab::Result => None,
            Tab::CourseDetail => Some(TaskKind::CourseDetail),
            Tab::SkillGap => Some(TaskKind::SkillGap),
            Tab::Schedule => Some(TaskKind::Schedule),
            Tab::Comparison => Some(TaskKind::Comparison),
            Tab::Roadmap => Some(TaskKind::Roadmap),
        }
    }

    /// The task whose stored result this tab displays.
    pub fn displayed_task(&self) -> Option<TaskKind> {
        match self {
            Tab::Syllabus => None,
            Tab::Result => Some(TaskKind::Syllabus),
            other => other.task(),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyllabusField {
    #[default]
    ProgramName,
    ProgramType,
    Semesters,
    DetailLevel,
    SkillInput,
    SkillList,
    QuickAdd,
    ClearSkillsButton,
    AdditionalInfo,
    IncludePrereqs,
    IncludeResources,
    GenerateButton,
}

impl SyllabusField {
    const ALL: [SyllabusField; 12] = [
        SyllabusField::ProgramName,
        SyllabusField::ProgramType,
        SyllabusField::Semesters,
        SyllabusField::DetailLevel,
        SyllabusField::SkillInput,
        SyllabusField::SkillList,
        SyllabusField::QuickAdd,
        SyllabusField::ClearSkillsButton,
        SyllabusField::AdditionalInfo,
        SyllabusField::IncludePrereqs,
        SyllabusField::IncludeResources,
        SyllabusField::GenerateButton,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

#[derive(Debug, Clone)]
pub struct SyllabusForm {
    pub focus: SyllabusField,
    pub program_name: TextInput,
    pub program_type: ProgramType,
    pub semesters: Stepper,
    pub detail_level: DetailLevel,
    pub skill_input: TextInput,
    /// Index into the session skill list for removal.
    pub skill_cursor: usize,
    /// Index into [`SAMPLE_SKILLS`] for the quick-add picker.
    pub quick_add_index: usize,
    pub additional_info: TextInput,
    pub include_prerequisites: bool,
    pub include_resources: bool,
}

impl Default for SyllabusForm {
    fn default() -> Self {
        Self {
            focus: SyllabusField::ProgramName,
            program_name: TextInput::default(),
            program_type: ProgramType::default(),
            semesters: Stepper::new(4, 1, 10),
            detail_level: DetailLevel::default(),
            skill_input: TextInput::default(),
            skill_cursor: 0,
            quick_add_index: 0,
            additional_info: TextInput::default(),
            include_prerequisites: true,
            include_resources: true,
        }
    }
}

impl SyllabusForm {
    pub fn params(&self, skills: &[String]) -> SyllabusParams {
        let additional = self.additional_info.trimmed();
        SyllabusParams {
            skills: skills.to_vec(),
            semester_count: self.semesters.value,
            program_name: self.program_name.trimmed().to_string(),
            program_type: self.program_type,
            additional_info: if additional.is_empty() {
                None
            } else {
                Some(additional.to_string())
            },
            detail_level: self.detail_level,
            include_prerequisites: self.include_prerequisites,
            include_resources: self.include_resources,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseDetailField {
    #[default]
    CourseName,
    SkillPicker,
    GenerateButton,
}

impl CourseDetailField {
    pub fn next(self) -> Self {
        match self {
            Self::CourseName => Self::SkillPicker,
            Self::SkillPicker => Self::GenerateButton,
            Self::GenerateButton => Self::CourseName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::CourseName => Self::GenerateButton,
            Self::SkillPicker => Self::CourseName,
            Self::GenerateButton => Self::SkillPicker,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseDetailForm {
    pub focus: CourseDetailField,
    pub course_name: TextInput,
    pub picker_cursor: usize,
    /// Skills toggled on in the picker.
    pub selected: Vec<String>,
}

impl CourseDetailForm {
    /// The picker lists the portfolio, falling back to a stock trio when
    /// the portfolio is empty.
    pub fn candidates(skills: &[String]) -> Vec<String> {
        if skills.is_empty() {
            DEFAULT_RELATED_SKILLS.iter().map(|s| s.to_string()).collect()
        } else {
            skills.to_vec()
        }
    }

    pub fn is_selected(&self, skill: &str) -> bool {
        self.selected.iter().any(|s| s == skill)
    }

    pub fn toggle(&mut self, skill: &str) {
        if self.is_selected(skill) {
            self.selected.retain(|s| s != skill);
        } else {
            self.selected.push(skill.to_string());
        }
    }

    /// Selection in candidate order, dropping stale entries that left the
    /// portfolio after being toggled.
    pub fn selection_in_order(&self, candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .filter(|c| self.is_selected(c))
            .cloned()
            .collect()
    }

    pub fn params(&self, skills: &[String]) -> CourseDetailParams {
        let candidates = Self::candidates(skills);
        CourseDetailParams {
            course_name: self.course_name.trimmed().to_string(),
            related_skills: self.selection_in_order(&candidates),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkillGapField {
    #[default]
    TargetProgram,
    GenerateButton,
}

impl SkillGapField {
    pub fn next(self) -> Self {
        match self {
            Self::TargetProgram => Self::GenerateButton,
            Self::GenerateButton => Self::TargetProgram,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillGapForm {
    pub focus: SkillGapField,
    pub target_program: TextInput,
}

impl SkillGapForm {
    pub fn params(&self, skills: &[String]) -> SkillGapParams {
        SkillGapParams {
            current_skills: skills.to_vec(),
            target_program: self.target_program.trimmed().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleField {
    #[default]
    Semesters,
    CoursesPerSemester,
    HoursPerWeek,
    GenerateButton,
}

impl ScheduleField {
    const ALL: [ScheduleField; 4] = [
        ScheduleField::Semesters,
        ScheduleField::CoursesPerSemester,
        ScheduleField::HoursPerWeek,
        ScheduleField::GenerateButton,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub focus: ScheduleField,
    pub semesters: Stepper,
    pub courses: Stepper,
    pub hours: Stepper,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            focus: ScheduleField::Semesters,
            semesters: Stepper::new(4, 1, 10),
            courses: Stepper::new(4, 2, 8),
            hours: Stepper::new(30, 10, 60),
        }
    }
}

impl ScheduleForm {
    pub fn params(&self) -> ScheduleParams {
        ScheduleParams {
            semester_count: self.semesters.value,
            courses_per_semester: self.courses.value,
            hours_per_week: self.hours.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonField {
    #[default]
    ProgramA,
    ProgramB,
    GenerateButton,
}

impl ComparisonField {
    pub fn next(self) -> Self {
        match self {
            Self::ProgramA => Self::ProgramB,
            Self::ProgramB => Self::GenerateButton,
            Self::GenerateButton => Self::ProgramA,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::ProgramA => Self::GenerateButton,
            Self::ProgramB => Self::ProgramA,
            Self::GenerateButton => Self::ProgramB,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonForm {
    pub focus: ComparisonField,
    pub program_a: TextInput,
    pub program_b: TextInput,
}

impl ComparisonForm {
    pub fn params(&self) -> ComparisonParams {
        ComparisonParams {
            program_a: self.program_a.trimmed().to_string(),
            program_b: self.program_b.trimmed().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadmapField {
    #[default]
    TimelineWeeks,
    GenerateButton,
}

impl RoadmapField {
    pub fn next(self) -> Self {
        match self {
            Self::TimelineWeeks => Self::GenerateButton,
            Self::GenerateButton => Self::TimelineWeeks,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

#[derive(Debug, Clone)]
pub struct RoadmapForm {
    pub focus: RoadmapField,
    pub timeline: Stepper,
}

impl Default for RoadmapForm {
    fn default() -> Self {
        Self {
            focus: RoadmapField::TimelineWeeks,
            timeline: Stepper::new(12, 4, 52),
        }
    }
}

impl RoadmapForm {
    pub fn params(&self, skills: &[String]) -> RoadmapParams {
        RoadmapParams {
            skills: skills.to_vec(),
            timeline_weeks: self.timeline.value,
        }
    }
}

/// All form state, one struct per tab.
#[derive(Debug, Clone, Default)]
pub struct Forms {
    pub syllabus: SyllabusForm,
    pub course: CourseDetailForm,
    pub skill_gap: SkillGapForm,
    pub schedule: ScheduleForm,
    pub comparison: ComparisonForm,
    pub roadmap: RoadmapForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    Theme,
    CardStyle,
    FontSize,
    AnimationSpeed,
    ShowAnimations,
    AutoSave,
    ResetButton,
}

impl SettingsField {
    const ALL: [SettingsField; 7] = [
        SettingsField::Theme,
        SettingsField::CardStyle,
        SettingsField::FontSize,
        SettingsField::AnimationSpeed,
        SettingsField::ShowAnimations,
        SettingsField::AutoSave,
        SettingsField::ResetButton,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Dispatch a key press to the active tab's handler.
pub fn handle_tab_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.active_tab {
        Tab::Syllabus => handle_syllabus_input(app, code, modifiers),
        Tab::Result => {}
        Tab::CourseDetail => handle_course_input(app, code),
        Tab::SkillGap => handle_skill_gap_input(app, code),
        Tab::Schedule => handle_schedule_input(app, code),
        Tab::Comparison => handle_comparison_input(app, code),
        Tab::Roadmap => handle_roadmap_input(app, code),
    }
}

fn handle_syllabus_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let _ = modifiers;
    match code {
        KeyCode::Tab | KeyCode::Down => {
            app.forms.syllabus.focus = app.forms.syllabus.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.forms.syllabus.focus = app.forms.syllabus.focus.prev();
        }
        KeyCode::Enter => match app.forms.syllabus.focus {
            SyllabusField::SkillInput => add_skill_from_input(app),
            SyllabusField::SkillList => remove_skill_at_cursor(app),
            SyllabusField::QuickAdd => {
                let skill = SAMPLE_SKILLS[app.forms.syllabus.quick_add_index];
                if app.session.add_skill(skill) {
                    debug!(skill, "quick-added skill");
                } else {
                    app.set_notice(NoticeKind::Warning, format!("{skill} is already added"));
                }
            }
            SyllabusField::ClearSkillsButton => {
                app.session.clear_skills();
                app.forms.syllabus.skill_cursor = 0;
            }
            SyllabusField::IncludePrereqs => {
                app.forms.syllabus.include_prerequisites =
                    !app.forms.syllabus.include_prerequisites;
            }
            SyllabusField::IncludeResources => {
                app.forms.syllabus.include_resources = !app.forms.syllabus.include_resources;
            }
            SyllabusField::GenerateButton => app.start_generation(TaskKind::Syllabus),
            _ => {}
        },
        KeyCode::Char(' ')
            if matches!(
                app.forms.syllabus.focus,
                SyllabusField::IncludePrereqs | SyllabusField::IncludeResources
            ) =>
        {
            if app.forms.syllabus.focus == SyllabusField::IncludePrereqs {
                app.forms.syllabus.include_prerequisites =
                    !app.forms.syllabus.include_prerequisites;
            } else {
                app.forms.syllabus.include_resources = !app.forms.syllabus.include_resources;
            }
        }
        KeyCode::Char(c) => match app.forms.syllabus.focus {
            SyllabusField::ProgramName => app.forms.syllabus.program_name.insert_char(c),
            SyllabusField::SkillInput => app.forms.syllabus.skill_input.insert_char(c),
            SyllabusField::AdditionalInfo => app.forms.syllabus.additional_info.insert_char(c),
            _ => {}
        },
        KeyCode::Backspace => {
            if let Some(input) = focused_syllabus_text(app) {
                input.delete_char_before();
            }
        }
        KeyCode::Delete => match app.forms.syllabus.focus {
            SyllabusField::SkillList => remove_skill_at_cursor(app),
            _ => {
                if let Some(input) = focused_syllabus_text(app) {
                    input.delete_char_at();
                }
            }
        },
        KeyCode::Left => match app.forms.syllabus.focus {
            SyllabusField::ProgramType => {
                app.forms.syllabus.program_type = app.forms.syllabus.program_type.prev();
            }
            SyllabusField::Semesters => app.forms.syllabus.semesters.decrement(),
            SyllabusField::DetailLevel => {
                app.forms.syllabus.detail_level = app.forms.syllabus.detail_level.prev();
            }
            SyllabusField::SkillList => {
                app.forms.syllabus.skill_cursor =
                    app.forms.syllabus.skill_cursor.saturating_sub(1);
            }
            SyllabusField::QuickAdd => {
                app.forms.syllabus.quick_add_index =
                    (app.forms.syllabus.quick_add_index + SAMPLE_SKILLS.len() - 1)
                        % SAMPLE_SKILLS.len();
            }
            _ => {
                if let Some(input) = focused_syllabus_text(app) {
                    input.move_left();
                }
            }
        },
        KeyCode::Right => match app.forms.syllabus.focus {
            SyllabusField::ProgramType => {
                app.forms.syllabus.program_type = app.forms.syllabus.program_type.next();
            }
            SyllabusField::Semesters => app.forms.syllabus.semesters.increment(),
            SyllabusField::DetailLevel => {
                app.forms.syllabus.detail_level = app.forms.syllabus.detail_level.next();
            }
            SyllabusField::SkillList => {
                let last = app.session.skills().len().saturating_sub(1);
                app.forms.syllabus.skill_cursor =
                    (app.forms.syllabus.skill_cursor + 1).min(last);
            }
            SyllabusField::QuickAdd => {
                app.forms.syllabus.quick_add_index =
                    (app.forms.syllabus.quick_add_index + 1) % SAMPLE_SKILLS.len();
            }
            _ => {
                if let Some(input) = focused_syllabus_text(app) {
                    input.move_right();
                }
            }
        },
        KeyCode::Home => {
            if let Some(input) = focused_syllabus_text(app) {
                input.move_home();
            }
        }
        KeyCode::End => {
            if let Some(input) = focused_syllabus_text(app) {
                input.move_end();
            }
        }
        _ => {}
    }
}

fn focused_syllabus_text(app: &mut App) -> Option<&mut TextInput> {
    match app.forms.syllabus.focus {
        SyllabusField::ProgramName => Some(&mut app.forms.syllabus.program_name),
        SyllabusField::SkillInput => Some(&mut app.forms.syllabus.skill_input),
        SyllabusField::AdditionalInfo => Some(&mut app.forms.syllabus.additional_info),
        _ => None,
    }
}

fn add_skill_from_input(app: &mut App) {
    let skill = app.forms.syllabus.skill_input.trimmed().to_string();
    if skill.is_empty() {
        return;
    }
    if app.session.add_skill(&skill) {
        app.forms.syllabus.skill_input.clear();
        debug!(skill = %skill, "added skill");
    } else {
        app.set_notice(NoticeKind::Warning, format!("{skill} is already added"));
    }
}

fn remove_skill_at_cursor(app: &mut App) {
    let skills = app.session.skills();
    if skills.is_empty() {
        return;
    }
    let cursor = app.forms.syllabus.skill_cursor.min(skills.len() - 1);
    let skill = skills[cursor].clone();
    app.session.remove_skill(&skill);
    app.forms.syllabus.skill_cursor = cursor.min(app.session.skills().len().saturating_sub(1));
}

fn handle_course_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down => {
            app.forms.course.focus = app.forms.course.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.forms.course.focus = app.forms.course.focus.prev();
        }
        KeyCode::Enter => match app.forms.course.focus {
            CourseDetailField::SkillPicker => toggle_picker_skill(app),
            CourseDetailField::GenerateButton => app.start_generation(TaskKind::CourseDetail),
            CourseDetailField::CourseName => {
                app.forms.course.focus = app.forms.course.focus.next();
            }
        },
        KeyCode::Char(' ') if app.forms.course.focus == CourseDetailField::SkillPicker => {
            toggle_picker_skill(app);
        }
        KeyCode::Char(c) if app.forms.course.focus == CourseDetailField::CourseName => {
            app.forms.course.course_name.insert_char(c);
        }
        KeyCode::Backspace if app.forms.course.focus == CourseDetailField::CourseName => {
            app.forms.course.course_name.delete_char_before();
        }
        KeyCode::Delete if app.forms.course.focus == CourseDetailField::CourseName => {
            app.forms.course.course_name.delete_char_at();
        }
        KeyCode::Left => match app.forms.course.focus {
            CourseDetailField::CourseName => app.forms.course.course_name.move_left(),
            CourseDetailField::SkillPicker => {
                app.forms.course.picker_cursor = app.forms.course.picker_cursor.saturating_sub(1);
            }
            CourseDetailField::GenerateButton => {}
        },
        KeyCode::Right => match app.forms.course.focus {
            CourseDetailField::CourseName => app.forms.course.course_name.move_right(),
            CourseDetailField::SkillPicker => {
                let last = CourseDetailForm::candidates(app.session.skills())
                    .len()
                    .saturating_sub(1);
                app.forms.course.picker_cursor = (app.forms.course.picker_cursor + 1).min(last);
            }
            CourseDetailField::GenerateButton => {}
        },
        KeyCode::Home if app.forms.course.focus == CourseDetailField::CourseName => {
            app.forms.course.course_name.move_home();
        }
        KeyCode::End if app.forms.course.focus == CourseDetailField::CourseName => {
            app.forms.course.course_name.move_end();
        }
        _ => {}
    }
}

fn toggle_picker_skill(app: &mut App) {
    let candidates = CourseDetailForm::candidates(app.session.skills());
    if candidates.is_empty() {
        return;
    }
    let cursor = app.forms.course.picker_cursor.min(candidates.len() - 1);
    let skill = candidates[cursor].clone();
    app.forms.course.toggle(&skill);
}

fn handle_skill_gap_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            app.forms.skill_gap.focus = app.forms.skill_gap.focus.next();
        }
        KeyCode::Enter => match app.forms.skill_gap.focus {
            SkillGapField::GenerateButton => app.start_generation(TaskKind::SkillGap),
            SkillGapField::TargetProgram => {
                app.forms.skill_gap.focus = SkillGapField::GenerateButton;
            }
        },
        code if app.forms.skill_gap.focus == SkillGapField::TargetProgram => match code {
            KeyCode::Char(c) => app.forms.skill_gap.target_program.insert_char(c),
            KeyCode::Backspace => app.forms.skill_gap.target_program.delete_char_before(),
            KeyCode::Delete => app.forms.skill_gap.target_program.delete_char_at(),
            KeyCode::Left => app.forms.skill_gap.target_program.move_left(),
            KeyCode::Right => app.forms.skill_gap.target_program.move_right(),
            KeyCode::Home => app.forms.skill_gap.target_program.move_home(),
            KeyCode::End => app.forms.skill_gap.target_program.move_end(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_schedule_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down => {
            app.forms.schedule.focus = app.forms.schedule.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.forms.schedule.focus = app.forms.schedule.focus.prev();
        }
        KeyCode::Enter if app.forms.schedule.focus == ScheduleField::GenerateButton => {
            app.start_generation(TaskKind::Schedule);
        }
        KeyCode::Left => match app.forms.schedule.focus {
            ScheduleField::Semesters => app.forms.schedule.semesters.decrement(),
            ScheduleField::CoursesPerSemester => app.forms.schedule.courses.decrement(),
            ScheduleField::HoursPerWeek => app.forms.schedule.hours.decrement(),
            ScheduleField::GenerateButton => {}
        },
        KeyCode::Right => match app.forms.schedule.focus {
            ScheduleField::Semesters => app.forms.schedule.semesters.increment(),
            ScheduleField::CoursesPerSemester => app.forms.schedule.courses.increment(),
            ScheduleField::HoursPerWeek => app.forms.schedule.hours.increment(),
            ScheduleField::GenerateButton => {}
        },
        _ => {}
    }
}

fn handle_comparison_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down => {
            app.forms.comparison.focus = app.forms.comparison.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.forms.comparison.focus = app.forms.comparison.focus.prev();
        }
        KeyCode::Enter => match app.forms.comparison.focus {
            ComparisonField::GenerateButton => app.start_generation(TaskKind::Comparison),
            other => app.forms.comparison.focus = other.next(),
        },
        KeyCode::Char(c) => {
            if let Some(input) = focused_comparison_text(app) {
                input.insert_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = focused_comparison_text(app) {
                input.delete_char_before();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = focused_comparison_text(app) {
                input.delete_char_at();
            }
        }
        KeyCode::Left => {
            if let Some(input) = focused_comparison_text(app) {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = focused_comparison_text(app) {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = focused_comparison_text(app) {
                input.move_home();
            }
        }
        KeyCode::End => {
            if let Some(input) = focused_comparison_text(app) {
                input.move_end();
            }
        }
        _ => {}
    }
}

fn focused_comparison_text(app: &mut App) -> Option<&mut TextInput> {
    match app.forms.comparison.focus {
        ComparisonField::ProgramA => Some(&mut app.forms.comparison.program_a),
        ComparisonField::ProgramB => Some(&mut app.forms.comparison.program_b),
        ComparisonField::GenerateButton => None,
    }
}

fn handle_roadmap_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            app.forms.roadmap.focus = app.forms.roadmap.focus.next();
        }
        KeyCode::Enter if app.forms.roadmap.focus == RoadmapField::GenerateButton => {
            app.start_generation(TaskKind::Roadmap);
        }
        KeyCode::Left if app.forms.roadmap.focus == RoadmapField::TimelineWeeks => {
            app.forms.roadmap.timeline.decrement();
        }
        KeyCode::Right if app.forms.roadmap.focus == RoadmapField::TimelineWeeks => {
            app.forms.roadmap.timeline.increment();
        }
        _ => {}
    }
}

/// Keyboard handling for the settings modal. Preferences apply live.
pub fn handle_settings_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.show_settings = false;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.settings_focus = app.settings_focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.settings_focus = app.settings_focus.prev();
        }
        KeyCode::Left => adjust_setting(app, -1),
        KeyCode::Right => adjust_setting(app, 1),
        KeyCode::Enter | KeyCode::Char(' ') => match app.settings_focus {
            SettingsField::ShowAnimations => {
                app.session.prefs.show_animations = !app.session.prefs.show_animations;
            }
            SettingsField::AutoSave => {
                app.session.prefs.auto_save = !app.session.prefs.auto_save;
            }
            SettingsField::ResetButton => {
                app.session.prefs.reset();
                app.set_notice(NoticeKind::Info, "Settings reset to defaults".to_string());
            }
            _ => adjust_setting(app, 1),
        },
        _ => {}
    }
}

fn adjust_setting(app: &mut App, step: i32) {
    let prefs = &mut app.session.prefs;
    match app.settings_focus {
        SettingsField::Theme => {
            prefs.theme = if step > 0 {
                prefs.theme.next()
            } else {
                prefs.theme.prev()
            };
        }
        SettingsField::CardStyle => {
            prefs.card_style = if step > 0 {
                prefs.card_style.next()
            } else {
                prefs.card_style.prev()
            };
        }
        SettingsField::FontSize => {
            prefs.font_size = if step > 0 {
                prefs.font_size.next()
            } else {
                prefs.font_size.prev()
            };
        }
        SettingsField::AnimationSpeed => {
            prefs.animation_speed = if step > 0 {
                prefs.animation_speed.next()
            } else {
                prefs.animation_speed.prev()
            };
        }
        SettingsField::ShowAnimations => {
            prefs.show_animations = !prefs.show_animations;
        }
        SettingsField::AutoSave => {
            prefs.auto_save = !prefs.auto_save;
        }
        SettingsField::ResetButton => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama::OllamaClient;
    use std::time::Duration;

    fn test_app() -> App {
        let client = OllamaClient::new(
            "http://127.0.0.1:1",
            "test-model",
            Duration::from_secs(1),
        )
        .unwrap();
        App::new(client, std::env::temp_dir(), "abc123".to_string())
    }

    #[test]
    fn test_skill_gap_editing_keys_ignored_on_button_focus() {
        let mut app = test_app();
        app.active_tab = Tab::SkillGap;
        app.forms.skill_gap.target_program.value = "ML Engineer".to_string();
        app.forms.skill_gap.target_program.cursor = 11;
        app.forms.skill_gap.focus = SkillGapField::GenerateButton;

        for code in [
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Home,
            KeyCode::End,
        ] {
            handle_skill_gap_input(&mut app, code);
        }

        assert_eq!(app.forms.skill_gap.target_program.value, "ML Engineer");
        assert_eq!(app.forms.skill_gap.target_program.cursor, 11);
        assert_eq!(app.forms.skill_gap.focus, SkillGapField::GenerateButton);
    }

    #[test]
    fn test_skill_gap_field_focus_still_edits() {
        let mut app = test_app();
        app.forms.skill_gap.focus = SkillGapField::TargetProgram;
        handle_skill_gap_input(&mut app, KeyCode::Char('M'));
        handle_skill_gap_input(&mut app, KeyCode::Char('L'));
        handle_skill_gap_input(&mut app, KeyCode::Backspace);
        assert_eq!(app.forms.skill_gap.target_program.value, "M");
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::default();
        for c in "hello".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value, "hello");
        assert_eq!(input.cursor, 5);

        input.move_left();
        input.move_left();
        input.insert_char('X');
        assert_eq!(input.value, "helXlo");

        input.delete_char_before();
        assert_eq!(input.value, "hello");
        assert_eq!(input.cursor, 3);

        input.move_home();
        input.delete_char_at();
        assert_eq!(input.value, "ello");

        input.move_end();
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::default();
        input.insert_char('é');
        input.insert_char('x');
        assert_eq!(input.value, "éx");
        input.move_home();
        input.move_right();
        assert_eq!(input.cursor, 'é'.len_utf8());
        input.delete_char_before();
        assert_eq!(input.value, "x");
    }

    #[test]
    fn test_stepper_clamps_at_bounds() {
        let mut s = Stepper::new(4, 1, 10);
        for _ in 0..20 {
            s.increment();
        }
        assert_eq!(s.value, 10);
        for _ in 0..20 {
            s.decrement();
        }
        assert_eq!(s.value, 1);
    }

    #[test]
    fn test_stepper_clamps_initial_value() {
        assert_eq!(Stepper::new(99, 10, 60).value, 60);
        assert_eq!(Stepper::new(0, 10, 60).value, 10);
    }

    #[test]
    fn test_tab_cycle_round_trip() {
        let mut tab = Tab::Syllabus;
        for _ in 0..Tab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Syllabus);
        assert_eq!(Tab::Syllabus.prev(), Tab::Roadmap);
    }

    #[test]
    fn test_tab_task_mapping() {
        assert_eq!(Tab::Result.task(), None);
        assert_eq!(Tab::Result.displayed_task(), Some(TaskKind::Syllabus));
        assert_eq!(Tab::Syllabus.displayed_task(), None);
        assert_eq!(Tab::Roadmap.task(), Some(TaskKind::Roadmap));
    }

    #[test]
    fn test_syllabus_field_cycle_round_trip() {
        let mut field = SyllabusField::ProgramName;
        for _ in 0..12 {
            field = field.next();
        }
        assert_eq!(field, SyllabusField::ProgramName);
        assert_eq!(SyllabusField::ProgramName.prev(), SyllabusField::GenerateButton);
    }

    #[test]
    fn test_syllabus_params_blank_additional_info_becomes_none() {
        let mut form = SyllabusForm::default();
        form.program_name.value = "CS Degree".to_string();
        form.additional_info.value = "   ".to_string();
        let params = form.params(&["Python".to_string()]);
        assert_eq!(params.additional_info, None);
        assert_eq!(params.semester_count, 4);
        assert!(params.include_prerequisites);
    }

    #[test]
    fn test_course_candidates_fall_back_when_portfolio_empty() {
        assert_eq!(
            CourseDetailForm::candidates(&[]),
            ["Python", "JavaScript", "SQL"]
        );
        let skills = vec!["Rust".to_string()];
        assert_eq!(CourseDetailForm::candidates(&skills), ["Rust"]);
    }

    #[test]
    fn test_course_selection_keeps_candidate_order() {
        let mut form = CourseDetailForm::default();
        let candidates: Vec<String> =
            ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        form.toggle("C");
        form.toggle("A");
        assert_eq!(form.selection_in_order(&candidates), ["A", "C"]);

        form.toggle("C");
        assert_eq!(form.selection_in_order(&candidates), ["A"]);
    }

    #[test]
    fn test_course_selection_drops_stale_entries() {
        let mut form = CourseDetailForm::default();
        form.toggle("Gone");
        form.toggle("Here");
        let candidates = vec!["Here".to_string()];
        assert_eq!(form.selection_in_order(&candidates), ["Here"]);
    }

    #[test]
    fn test_schedule_defaults() {
        let form = ScheduleForm::default();
        let params = form.params();
        assert_eq!(params.semester_count, 4);
        assert_eq!(params.courses_per_semester, 4);
        assert_eq!(params.hours_per_week, 30);
    }

    #[test]
    fn test_roadmap_default_timeline() {
        assert_eq!(RoadmapForm::default().timeline.value, 12);
    }

    #[test]
    fn test_settings_field_cycle() {
        assert_eq!(SettingsField::ResetButton.next(), SettingsField::Theme);
        assert_eq!(SettingsField::Theme.prev(), SettingsField::ResetButton);
    }
}
