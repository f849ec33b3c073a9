//! Application state and the generation lifecycle.
//!
//! Generation requests run on worker threads and report back over an mpsc
//! channel that the event loop polls each frame. Only one request is in
//! flight at a time; submitting while busy raises the busy popup instead.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use tracing::{info, warn};

use crate::export;
use crate::forms::{Forms, SettingsField, Tab};
use crate::ollama::{BackendStatus, GenerationError, OllamaClient};
use crate::prompts::{self, TaskKind, TaskParams};
use crate::session::{GenerationResult, SessionState};
use crate::validators::{validate_required, validate_semester_count, validate_skills};

/// How often the backend status probe refires.
const PROBE_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Idle,
    Generating,
    Error,
}

impl AppStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppStatus::Idle => "Idle",
            AppStatus::Generating => "Generating",
            AppStatus::Error => "Error",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AppStatus::Idle => Color::Green,
            AppStatus::Generating => Color::Yellow,
            AppStatus::Error => Color::Red,
        }
    }

    pub fn border_type(&self) -> BorderType {
        match self {
            AppStatus::Idle => BorderType::Rounded,
            AppStatus::Generating | AppStatus::Error => BorderType::Double,
        }
    }

    /// Border color with a pulse while generating. `frames_per_step` comes
    /// from the animation speed preference; 0 disables the pulse.
    pub fn pulsing_color(&self, frame_count: u64, frames_per_step: u64) -> Color {
        match self {
            AppStatus::Generating if frames_per_step > 0 => {
                if (frame_count / frames_per_step) % 2 == 0 {
                    Color::Yellow
                } else {
                    Color::Rgb(128, 96, 0)
                }
            }
            _ => self.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn color(&self) -> Color {
        match self {
            NoticeKind::Info => Color::Cyan,
            NoticeKind::Success => Color::Green,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        }
    }
}

/// Transient message shown in the status line until the next one replaces it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// What a generation worker sends back when it finishes.
#[derive(Debug)]
pub struct WorkerReply {
    pub params: TaskParams,
    pub result: Result<String, GenerationError>,
}

pub struct App {
    pub status: AppStatus,
    pub active_tab: Tab,
    pub session: SessionState,
    pub forms: Forms,
    pub show_settings: bool,
    pub settings_focus: SettingsField,
    pub show_busy_popup: bool,
    pub notice: Option<Notice>,
    pub backend: BackendStatus,
    pub client: OllamaClient,
    pub export_dir: PathBuf,
    pub session_id: String,
    /// Frame counter driving the generating-pulse animation.
    pub frame_count: u64,
    pub result_scroll: u16,
    /// Set each draw so scroll clamping matches the rendered pane.
    pub result_pane_height: u16,
    pub result_line_count: u16,
    generation_rx: Option<Receiver<WorkerReply>>,
    generation_started: Option<Instant>,
    probe_rx: Option<Receiver<BackendStatus>>,
    last_probe: Option<Instant>,
}

impl App {
    pub fn new(client: OllamaClient, export_dir: PathBuf, session_id: String) -> Self {
        Self {
            status: AppStatus::Idle,
            active_tab: Tab::Syllabus,
            session: SessionState::new(),
            forms: Forms::default(),
            show_settings: false,
            settings_focus: SettingsField::default(),
            show_busy_popup: false,
            notice: None,
            backend: BackendStatus::Offline,
            client,
            export_dir,
            session_id,
            frame_count: 0,
            result_scroll: 0,
            result_pane_height: 0,
            result_line_count: 0,
            generation_rx: None,
            generation_started: None,
            probe_rx: None,
            last_probe: None,
        }
    }

    pub fn set_notice(&mut self, kind: NoticeKind, text: String) {
        self.notice = Some(Notice { kind, text });
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.result_scroll = 0;
        }
    }

    /// Validate the active form and build the parameter set for `task`.
    pub fn build_params(&self, task: TaskKind) -> Result<TaskParams, String> {
        match task {
            TaskKind::Syllabus => {
                let form = &self.forms.syllabus;
                if let Some(msg) =
                    validate_required(&form.program_name.value, "Please enter a program name")
                {
                    return Err(msg);
                }
                if let Some(msg) =
                    validate_skills(self.session.skills(), "Please add at least one skill")
                {
                    return Err(msg);
                }
                if let Some(msg) = validate_semester_count(form.semesters.value) {
                    return Err(msg);
                }
                Ok(TaskParams::Syllabus(form.params(self.session.skills())))
            }
            TaskKind::CourseDetail => {
                let form = &self.forms.course;
                if let Some(msg) =
                    validate_required(&form.course_name.value, "Please enter a course name")
                {
                    return Err(msg);
                }
                let params = form.params(self.session.skills());
                if let Some(msg) = validate_skills(
                    &params.related_skills,
                    "Please select at least one related skill",
                ) {
                    return Err(msg);
                }
                Ok(TaskParams::CourseDetail(params))
            }
            TaskKind::SkillGap => {
                if let Some(msg) = validate_required(
                    &self.forms.skill_gap.target_program.value,
                    "Please enter a target program",
                ) {
                    return Err(msg);
                }
                if let Some(msg) = validate_skills(
                    self.session.skills(),
                    "Please add skills to your portfolio first",
                ) {
                    return Err(msg);
                }
                Ok(TaskParams::SkillGap(
                    self.forms.skill_gap.params(self.session.skills()),
                ))
            }
            TaskKind::Schedule => Ok(TaskParams::Schedule(self.forms.schedule.params())),
            TaskKind::Comparison => {
                let form = &self.forms.comparison;
                if form.program_a.is_blank() || form.program_b.is_blank() {
                    return Err("Please enter both program names".to_string());
                }
                Ok(TaskParams::Comparison(form.params()))
            }
            TaskKind::Roadmap => {
                if let Some(msg) = validate_skills(
                    self.session.skills(),
                    "Please add skills to your portfolio first",
                ) {
                    return Err(msg);
                }
                Ok(TaskParams::Roadmap(
                    self.forms.roadmap.params(self.session.skills()),
                ))
            }
        }
    }

    /// Validate, then hand the request to a worker thread. Rejected while
    /// another generation is running.
    pub fn start_generation(&mut self, task: TaskKind) {
        if self.status == AppStatus::Generating {
            self.show_busy_popup = true;
            return;
        }

        let params = match self.build_params(task) {
            Ok(params) => params,
            Err(msg) => {
                self.set_notice(NoticeKind::Warning, msg);
                return;
            }
        };

        let prompt = prompts::build_prompt(&params);
        let temperature = task.temperature();
        info!(task = task.label(), temperature, "starting generation");

        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        thread::spawn(move || {
            let result = client.generate(&prompt, temperature);
            let _ = tx.send(WorkerReply { params, result });
        });

        self.generation_rx = Some(rx);
        self.generation_started = Some(Instant::now());
        self.status = AppStatus::Generating;
        self.notice = None;
    }

    /// Called every frame: collect finished work and keep the backend
    /// status fresh.
    pub fn poll(&mut self) {
        self.frame_count += 1;

        if let Some(rx) = self.generation_rx.take() {
            match rx.try_recv() {
                Ok(reply) => self.apply_outcome(reply),
                Err(TryRecvError::Empty) => self.generation_rx = Some(rx),
                Err(TryRecvError::Disconnected) => {
                    self.generation_started = None;
                    self.status = AppStatus::Error;
                    self.set_notice(
                        NoticeKind::Error,
                        "generation worker exited unexpectedly".to_string(),
                    );
                }
            }
        }

        self.poll_backend_probe();
    }

    /// Fold a finished generation into the session. Failures leave the
    /// session untouched.
    pub fn apply_outcome(&mut self, reply: WorkerReply) {
        self.generation_started = None;
        let task = reply.params.task();

        match reply.result {
            Ok(text) => {
                self.status = AppStatus::Idle;
                let label = reply.params.label();
                let result = GenerationResult {
                    text,
                    generated_at: Local::now(),
                    label: label.clone(),
                    params: reply.params,
                };
                info!(task = task.label(), label = %label, chars = result.text.len(), "generation finished");

                if task == TaskKind::Syllabus {
                    self.session.append_history(
                        label,
                        Local::now().format("%Y-%m-%d %H:%M").to_string(),
                    );
                    self.active_tab = Tab::Result;
                }

                if self.session.prefs.auto_save {
                    match export::write_export(&self.export_dir, &result) {
                        Ok(path) => self.set_notice(
                            NoticeKind::Success,
                            format!("Saved to {}", path.display()),
                        ),
                        Err(e) => self.set_notice(
                            NoticeKind::Warning,
                            format!("Generated, but auto-save failed: {e}"),
                        ),
                    }
                } else {
                    self.set_notice(
                        NoticeKind::Success,
                        format!("{} ready", task.label()),
                    );
                }

                self.session.set_result(result);
                self.result_scroll = 0;
            }
            Err(e) => {
                self.status = AppStatus::Error;
                warn!(task = task.label(), error = %e, "generation failed");
                self.set_notice(NoticeKind::Error, e.to_string());
            }
        }
    }

    /// Export the result shown on the active tab, if any.
    pub fn export_active(&mut self) {
        let Some(task) = self.active_tab.displayed_task() else {
            self.set_notice(
                NoticeKind::Info,
                "Nothing to export on this tab".to_string(),
            );
            return;
        };
        let Some(result) = self.session.result_for(task) else {
            self.set_notice(NoticeKind::Info, "Nothing to export yet".to_string());
            return;
        };
        match export::write_export(&self.export_dir, result) {
            Ok(path) => {
                self.set_notice(NoticeKind::Success, format!("Saved to {}", path.display()));
            }
            Err(e) => self.set_notice(NoticeKind::Error, format!("Export failed: {e}")),
        }
    }

    fn poll_backend_probe(&mut self) {
        if let Some(rx) = self.probe_rx.take() {
            match rx.try_recv() {
                Ok(status) => self.backend = status,
                Err(TryRecvError::Empty) => {
                    self.probe_rx = Some(rx);
                    return;
                }
                Err(TryRecvError::Disconnected) => {}
            }
        }

        let due = self
            .last_probe
            .is_none_or(|t| t.elapsed() >= PROBE_INTERVAL);
        if !due {
            return;
        }
        self.last_probe = Some(Instant::now());
        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        thread::spawn(move || {
            let _ = tx.send(client.check_status());
        });
        self.probe_rx = Some(rx);
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.generation_started.map(|t| t.elapsed())
    }

    fn max_scroll(&self) -> u16 {
        self.result_line_count
            .saturating_sub(self.result_pane_height)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.result_scroll = (self.result_scroll + lines).min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{ComparisonParams, SyllabusParams};
    use crate::prompts::{DetailLevel, ProgramType};

    fn test_app() -> App {
        let client = OllamaClient::new(
            "http://127.0.0.1:1",
            "test-model",
            Duration::from_secs(1),
        )
        .unwrap();
        App::new(client, std::env::temp_dir(), "abc123".to_string())
    }

    fn syllabus_params() -> TaskParams {
        TaskParams::Syllabus(SyllabusParams {
            skills: vec!["Python".to_string()],
            semester_count: 4,
            program_name: "CS Degree".to_string(),
            program_type: ProgramType::DegreeProgram,
            additional_info: None,
            detail_level: DetailLevel::Standard,
            include_prerequisites: true,
            include_resources: true,
        })
    }

    #[test]
    fn test_submit_while_busy_raises_popup() {
        let mut app = test_app();
        app.status = AppStatus::Generating;
        app.start_generation(TaskKind::Schedule);
        assert!(app.show_busy_popup);
        assert_eq!(app.status, AppStatus::Generating);
    }

    #[test]
    fn test_syllabus_validation_rejects_missing_name() {
        let mut app = test_app();
        app.session.add_skill("Python");
        let err = app.build_params(TaskKind::Syllabus).unwrap_err();
        assert_eq!(err, "Please enter a program name");
    }

    #[test]
    fn test_syllabus_validation_rejects_empty_skills() {
        let mut app = test_app();
        app.forms.syllabus.program_name.value = "CS Degree".to_string();
        let err = app.build_params(TaskKind::Syllabus).unwrap_err();
        assert_eq!(err, "Please add at least one skill");
    }

    #[test]
    fn test_invalid_submit_sets_warning_and_stays_idle() {
        let mut app = test_app();
        app.start_generation(TaskKind::Syllabus);
        assert_eq!(app.status, AppStatus::Idle);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
    }

    #[test]
    fn test_comparison_validation_needs_both_names() {
        let mut app = test_app();
        app.forms.comparison.program_a.value = "CS Degree".to_string();
        let err = app.build_params(TaskKind::Comparison).unwrap_err();
        assert_eq!(err, "Please enter both program names");
    }

    #[test]
    fn test_schedule_params_always_valid() {
        let app = test_app();
        assert!(app.build_params(TaskKind::Schedule).is_ok());
    }

    #[test]
    fn test_roadmap_needs_skills() {
        let mut app = test_app();
        assert!(app.build_params(TaskKind::Roadmap).is_err());
        app.session.add_skill("Rust");
        assert!(app.build_params(TaskKind::Roadmap).is_ok());
    }

    #[test]
    fn test_successful_syllabus_stores_result_history_and_switches_tab() {
        let mut app = test_app();
        app.session.prefs.auto_save = false;
        app.status = AppStatus::Generating;

        app.apply_outcome(WorkerReply {
            params: syllabus_params(),
            result: Ok("SEMESTER 1 ...".to_string()),
        });

        assert_eq!(app.status, AppStatus::Idle);
        assert_eq!(app.active_tab, Tab::Result);
        assert_eq!(app.session.history().len(), 1);
        assert_eq!(app.session.history()[0].label, "CS Degree");
        let stored = app.session.result_for(TaskKind::Syllabus).unwrap();
        assert_eq!(stored.text, "SEMESTER 1 ...");
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_successful_comparison_skips_history() {
        let mut app = test_app();
        app.session.prefs.auto_save = false;
        app.apply_outcome(WorkerReply {
            params: TaskParams::Comparison(ComparisonParams {
                program_a: "A".to_string(),
                program_b: "B".to_string(),
            }),
            result: Ok("comparison text".to_string()),
        });
        assert!(app.session.history().is_empty());
        assert_eq!(app.active_tab, Tab::Syllabus);
        assert!(app.session.result_for(TaskKind::Comparison).is_some());
    }

    #[test]
    fn test_failed_generation_leaves_session_untouched() {
        let mut app = test_app();
        app.status = AppStatus::Generating;
        app.apply_outcome(WorkerReply {
            params: syllabus_params(),
            result: Err(GenerationError::Timeout),
        });
        assert_eq!(app.status, AppStatus::Error);
        assert!(app.session.result_for(TaskKind::Syllabus).is_none());
        assert!(app.session.history().is_empty());
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_auto_save_writes_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app();
        app.export_dir = dir.path().to_path_buf();
        app.apply_outcome(WorkerReply {
            params: syllabus_params(),
            result: Ok("saved text".to_string()),
        });
        let path = dir.path().join("CS_Degree_syllabus.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "saved text");
    }

    #[test]
    fn test_export_active_without_result_sets_info_notice() {
        let mut app = test_app();
        app.active_tab = Tab::Result;
        app.export_active();
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut app = test_app();
        app.result_line_count = 30;
        app.result_pane_height = 10;
        app.scroll_down(100);
        assert_eq!(app.result_scroll, 20);
        app.scroll_up(5);
        assert_eq!(app.result_scroll, 15);
        app.scroll_up(100);
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_select_tab_resets_scroll() {
        let mut app = test_app();
        app.result_scroll = 7;
        app.select_tab(Tab::Schedule);
        assert_eq!(app.result_scroll, 0);
        app.result_scroll = 3;
        app.select_tab(Tab::Schedule);
        assert_eq!(app.result_scroll, 3);
    }
}
