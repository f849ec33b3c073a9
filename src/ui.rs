//! Terminal rendering.
//!
//! One `draw_ui` entry point renders the tab bar, the active tab's form
//! and result panes, the notice line, and the command panel. Modals and
//! popups draw last, over a cleared region.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Tabs, Wrap,
};

use crate::app::{App, AppStatus};
use crate::forms::{
    ComparisonField, CourseDetailField, CourseDetailForm, RoadmapField, ScheduleField,
    SkillGapField, SyllabusField, Tab, TextInput,
};
use crate::session::SAMPLE_SKILLS;
use crate::settings_ui::draw_settings_modal;

const FIELD_WIDTH: usize = 38;

/// Format a duration as compact elapsed time, e.g. "45s" or "2m 5s".
pub fn format_elapsed(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Calculate a centered rectangle within the given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render a single-line text input, windowed around the cursor when the
/// value is wider than the field. A focused field shows a block cursor.
pub fn text_input_spans(
    value: &str,
    cursor: usize,
    focused: bool,
    field_width: usize,
) -> Vec<Span<'static>> {
    let (display_value, visible_cursor) = if value.len() > field_width {
        // Anchor the window end past the cursor, then snap both edges to
        // char boundaries so multibyte values never split mid-character.
        // The cursor is itself a boundary, so it stays inside the window.
        let mut end = (cursor.saturating_sub(field_width / 2) + field_width).min(value.len());
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        let mut start = end.saturating_sub(field_width);
        while !value.is_char_boundary(start) {
            start += 1;
        }
        (value[start..end].to_string(), cursor - start)
    } else {
        (value.to_string(), cursor)
    };

    if !focused {
        return vec![Span::styled(display_value, Style::default().fg(Color::White))];
    }

    let char_indices: Vec<_> = display_value.char_indices().collect();
    let (before, cursor_char, rest) = if let Some(&(idx, c)) = char_indices
        .iter()
        .find(|(i, _)| *i == visible_cursor)
    {
        let rest_start = idx + c.len_utf8();
        (
            display_value[..idx].to_string(),
            c.to_string(),
            display_value[rest_start..].to_string(),
        )
    } else {
        (display_value, " ".to_string(), String::new())
    };

    vec![
        Span::styled(before, Style::default().fg(Color::White)),
        Span::styled(cursor_char, Style::default().fg(Color::Black).bg(Color::White)),
        Span::styled(rest, Style::default().fg(Color::White)),
    ]
}

fn label_span(text: &'static str, focused: bool, accent: Color) -> Span<'static> {
    if focused {
        Span::styled(text, Style::default().fg(accent).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(text, Style::default().fg(Color::DarkGray))
    }
}

fn input_line(
    label: &'static str,
    input: &TextInput,
    focused: bool,
    accent: Color,
) -> Line<'static> {
    let mut spans = vec![label_span(label, focused, accent)];
    spans.extend(text_input_spans(&input.value, input.cursor, focused, FIELD_WIDTH));
    Line::from(spans)
}

fn selector_line(label: &'static str, value: &str, focused: bool, accent: Color) -> Line<'static> {
    Line::from(vec![
        label_span(label, focused, accent),
        Span::styled(
            format!("< {value} >"),
            if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            },
        ),
    ])
}

fn checkbox_line(label: &'static str, on: bool, focused: bool, accent: Color) -> Line<'static> {
    Line::from(vec![
        label_span(label, focused, accent),
        Span::styled(
            if on { "[x]" } else { "[ ]" },
            Style::default().fg(if on { accent } else { Color::White }),
        ),
    ])
}

fn button_line(text: &'static str, focused: bool, accent: Color) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };
    Line::from(Span::styled(format!("[ {text} ]"), style))
}

/// Draw the main UI.
pub fn draw_ui(f: &mut Frame, app: &mut App) {
    let accent = app.session.prefs.theme.accent();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Active tab body
            Constraint::Length(1), // Notice line
            Constraint::Length(3), // Command panel
        ])
        .split(f.area());

    draw_tab_bar(f, app, chunks[0], accent);

    match app.active_tab {
        Tab::Syllabus => draw_syllabus_tab(f, app, chunks[1], accent),
        Tab::Result => draw_result_tab(f, app, chunks[1], accent),
        Tab::CourseDetail => draw_course_tab(f, app, chunks[1], accent),
        Tab::SkillGap => draw_skill_gap_tab(f, app, chunks[1], accent),
        Tab::Schedule => draw_schedule_tab(f, app, chunks[1], accent),
        Tab::Comparison => draw_comparison_tab(f, app, chunks[1], accent),
        Tab::Roadmap => draw_roadmap_tab(f, app, chunks[1], accent),
    }

    draw_notice_line(f, app, chunks[2]);
    draw_command_panel(f, app, chunks[3]);

    if app.show_busy_popup {
        let popup_area = centered_rect(44, 5, f.area());
        f.render_widget(Clear, popup_area);
        let popup = Paragraph::new("A generation is already running")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Notice")
                    .style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(popup, popup_area);
    }

    if app.show_settings {
        draw_settings_modal(f, app);
    }
}

fn draw_tab_bar(f: &mut Frame, app: &App, area: Rect, accent: Color) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.label())).collect();
    let selected = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .divider("│");
    f.render_widget(tabs, area);
}

fn draw_syllabus_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let form = &app.forms.syllabus;
    let focus = form.focus;
    let skills = app.session.skills();

    let skill_tags = if skills.is_empty() {
        Span::styled("(none yet)", Style::default().fg(Color::DarkGray))
    } else {
        let mut tags = String::new();
        for (i, skill) in skills.iter().enumerate() {
            let selected = focus == SyllabusField::SkillList && i == form.skill_cursor;
            if selected {
                tags.push_str(&format!("[{skill}] "));
            } else {
                tags.push_str(&format!("{skill}  "));
            }
        }
        Span::styled(tags, Style::default().fg(Color::White))
    };

    let lines = vec![
        input_line(
            "Program Name:     ",
            &form.program_name,
            focus == SyllabusField::ProgramName,
            accent,
        ),
        selector_line(
            "Program Type:     ",
            form.program_type.label(),
            focus == SyllabusField::ProgramType,
            accent,
        ),
        selector_line(
            "Semesters:        ",
            &form.semesters.value.to_string(),
            focus == SyllabusField::Semesters,
            accent,
        ),
        selector_line(
            "Detail Level:     ",
            form.detail_level.label(),
            focus == SyllabusField::DetailLevel,
            accent,
        ),
        Line::default(),
        input_line(
            "Add Skill:        ",
            &form.skill_input,
            focus == SyllabusField::SkillInput,
            accent,
        ),
        Line::from(vec![
            label_span("Skills:           ", focus == SyllabusField::SkillList, accent),
            skill_tags,
        ]),
        selector_line(
            "Quick Add:        ",
            SAMPLE_SKILLS[form.quick_add_index],
            focus == SyllabusField::QuickAdd,
            accent,
        ),
        button_line(
            "Clear All Skills",
            focus == SyllabusField::ClearSkillsButton,
            accent,
        ),
        Line::default(),
        input_line(
            "Additional Info:  ",
            &form.additional_info,
            focus == SyllabusField::AdditionalInfo,
            accent,
        ),
        checkbox_line(
            "Prerequisites:    ",
            form.include_prerequisites,
            focus == SyllabusField::IncludePrereqs,
            accent,
        ),
        checkbox_line(
            "Resources:        ",
            form.include_resources,
            focus == SyllabusField::IncludeResources,
            accent,
        ),
        Line::default(),
        button_line(
            "Generate Syllabus",
            focus == SyllabusField::GenerateButton,
            accent,
        ),
    ];

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.status.border_type())
                .title(" Syllabus Generator "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, columns[0]);

    draw_session_sidebar(f, app, columns[1], accent);
}

fn draw_session_sidebar(f: &mut Frame, app: &App, area: Rect, accent: Color) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let skills: Vec<ListItem> = app
        .session
        .skills()
        .iter()
        .map(|s| ListItem::new(format!("• {s}")))
        .collect();
    let portfolio = List::new(skills).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Portfolio ({}) ", app.session.skills().len()))
            .border_style(Style::default().fg(accent)),
    );
    f.render_widget(portfolio, rows[0]);

    let history: Vec<ListItem> = app
        .session
        .history()
        .iter()
        .rev()
        .map(|h| ListItem::new(format!("{}  {}", h.date, h.label)))
        .collect();
    let history_list = List::new(history).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" History ({}) ", app.session.history().len()))
            .border_style(Style::default().fg(accent)),
    );
    f.render_widget(history_list, rows[1]);
}

fn draw_result_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    use crate::prompts::{TaskKind, TaskParams};

    let Some(result) = app.session.result_for(TaskKind::Syllabus) else {
        let hint = Paragraph::new("No syllabus yet. Fill in the Generate tab and press Enter on the button.")
            .block(Block::default().borders(Borders::ALL).title(" Syllabus "))
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        f.render_widget(hint, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let metrics = if let TaskParams::Syllabus(p) = &result.params {
        vec![
            Line::from(vec![
                Span::styled("Program: ", Style::default().fg(Color::DarkGray)),
                Span::styled(p.program_name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  ({})", p.program_type.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "{} semesters  |  {} skills  |  {} detail  |  generated {}",
                    p.semester_count,
                    p.skills.len(),
                    p.detail_level.label(),
                    result.timestamp()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from(result.label.clone())]
    };

    let header = Paragraph::new(metrics).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Syllabus "),
    );
    f.render_widget(header, rows[0]);

    render_result_text(f, app, rows[1], TaskKind::Syllabus, " Generated Syllabus ");
}

/// Render the stored result text for `task` with scrolling, updating the
/// pane metrics used for scroll clamping.
fn render_result_text(
    f: &mut Frame,
    app: &mut App,
    area: Rect,
    task: crate::prompts::TaskKind,
    title: &str,
) {
    let text = app
        .session
        .result_for(task)
        .map(|r| r.text.clone())
        .unwrap_or_default();

    app.result_pane_height = area.height.saturating_sub(2);
    let content: Vec<Line> = text.lines().map(Line::raw).collect();
    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .wrap(Wrap { trim: false });
    app.result_line_count = paragraph.line_count(area.width) as u16;

    f.render_widget(paragraph.scroll((app.result_scroll, 0)), area);

    if app.result_line_count > app.result_pane_height {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(app.result_line_count as usize)
            .position(app.result_scroll as usize)
            .viewport_content_length(app.result_pane_height as usize);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Shared layout for the four simple task tabs: form on top, result below.
fn draw_form_and_result(
    f: &mut Frame,
    app: &mut App,
    area: Rect,
    form_height: u16,
    form_title: &str,
    lines: Vec<Line<'static>>,
    task: crate::prompts::TaskKind,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(0)])
        .split(area);

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.status.border_type())
                .title(form_title.to_string()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, rows[0]);

    if app.session.result_for(task).is_some() {
        render_result_text(f, app, rows[1], task, " Result ");
    } else {
        let hint = Paragraph::new("No result yet.")
            .block(Block::default().borders(Borders::ALL).title(" Result "))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, rows[1]);
    }
}

fn draw_course_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    use crate::prompts::TaskKind;

    let form = &app.forms.course;
    let focus = form.focus;
    let candidates = CourseDetailForm::candidates(app.session.skills());

    let mut picker = String::new();
    for (i, skill) in candidates.iter().enumerate() {
        let mark = if form.is_selected(skill) { "x" } else { " " };
        if focus == CourseDetailField::SkillPicker && i == form.picker_cursor {
            picker.push_str(&format!(">[{mark}] {skill}  "));
        } else {
            picker.push_str(&format!(" [{mark}] {skill}  "));
        }
    }

    let lines = vec![
        input_line(
            "Course Name:      ",
            &form.course_name,
            focus == CourseDetailField::CourseName,
            accent,
        ),
        Line::from(vec![
            label_span("Related Skills:   ", focus == CourseDetailField::SkillPicker, accent),
            Span::styled(picker, Style::default().fg(Color::White)),
        ]),
        Line::default(),
        button_line(
            "Generate Course Details",
            focus == CourseDetailField::GenerateButton,
            accent,
        ),
    ];

    draw_form_and_result(f, app, area, 6, " Course Deep Dive ", lines, TaskKind::CourseDetail);
}

fn draw_skill_gap_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    use crate::prompts::TaskKind;

    let form = &app.forms.skill_gap;
    let current = if app.session.skills().is_empty() {
        "(portfolio is empty - add skills on the Generate tab)".to_string()
    } else {
        app.session.skills().join(", ")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Current Skills:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(current, Style::default().fg(Color::White)),
        ]),
        input_line(
            "Target Program:   ",
            &form.target_program,
            form.focus == SkillGapField::TargetProgram,
            accent,
        ),
        Line::default(),
        button_line(
            "Analyze Skill Gap",
            form.focus == SkillGapField::GenerateButton,
            accent,
        ),
    ];

    draw_form_and_result(f, app, area, 6, " Skill Gap Analysis ", lines, TaskKind::SkillGap);
}

fn draw_schedule_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    use crate::prompts::TaskKind;

    let form = &app.forms.schedule;
    let lines = vec![
        selector_line(
            "Semesters:        ",
            &form.semesters.value.to_string(),
            form.focus == ScheduleField::Semesters,
            accent,
        ),
        selector_line(
            "Courses/Semester: ",
            &form.courses.value.to_string(),
            form.focus == ScheduleField::CoursesPerSemester,
            accent,
        ),
        selector_line(
            "Hours/Week:       ",
            &form.hours.value.to_string(),
            form.focus == ScheduleField::HoursPerWeek,
            accent,
        ),
        Line::default(),
        button_line(
            "Generate Schedule",
            form.focus == ScheduleField::GenerateButton,
            accent,
        ),
    ];

    draw_form_and_result(f, app, area, 7, " Study Schedule ", lines, TaskKind::Schedule);
}

fn draw_comparison_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    use crate::prompts::TaskKind;

    let form = &app.forms.comparison;
    let lines = vec![
        input_line(
            "Program 1:        ",
            &form.program_a,
            form.focus == ComparisonField::ProgramA,
            accent,
        ),
        input_line(
            "Program 2:        ",
            &form.program_b,
            form.focus == ComparisonField::ProgramB,
            accent,
        ),
        Line::default(),
        button_line(
            "Compare Programs",
            form.focus == ComparisonField::GenerateButton,
            accent,
        ),
    ];

    draw_form_and_result(f, app, area, 6, " Program Comparison ", lines, TaskKind::Comparison);
}

fn draw_roadmap_tab(f: &mut Frame, app: &mut App, area: Rect, accent: Color) {
    use crate::prompts::TaskKind;

    let form = &app.forms.roadmap;
    let skills = if app.session.skills().is_empty() {
        "(portfolio is empty - add skills on the Generate tab)".to_string()
    } else {
        app.session.skills().join(", ")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Skills:           ", Style::default().fg(Color::DarkGray)),
            Span::styled(skills, Style::default().fg(Color::White)),
        ]),
        selector_line(
            "Timeline (weeks): ",
            &form.timeline.value.to_string(),
            form.focus == RoadmapField::TimelineWeeks,
            accent,
        ),
        Line::default(),
        button_line(
            "Generate Roadmap",
            form.focus == RoadmapField::GenerateButton,
            accent,
        ),
    ];

    draw_form_and_result(f, app, area, 6, " Learning Roadmap ", lines, TaskKind::Roadmap);
}

fn draw_notice_line(f: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let line = Line::from(Span::styled(
        format!(" {}", notice.text),
        Style::default().fg(notice.kind.color()),
    ));
    f.render_widget(Paragraph::new(line), area);
}

fn draw_command_panel(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.status {
        AppStatus::Generating => "[^N/^P] Tabs  [^E] Export  [^S] Settings  [^Q] Quit",
        _ => "[Tab] Fields  [^N/^P] Tabs  [Enter] Select  [^E] Export  [^S] Settings  [^Q] Quit",
    };

    let frames_per_step = if app.session.prefs.show_animations {
        app.session.prefs.animation_speed.frames_per_step()
    } else {
        0
    };
    let status_color = app.status.pulsing_color(app.frame_count, frames_per_step);

    let status_text = match app.status {
        AppStatus::Generating => match app.elapsed() {
            Some(elapsed) => format!("GENERATING {}", format_elapsed(elapsed)),
            None => "GENERATING".to_string(),
        },
        other => other.label().to_uppercase(),
    };
    let session_text = format!(
        "skills {}  results {}  [{}]  ",
        app.session.skills().len(),
        app.session.result_count(),
        app.session_id,
    );
    let backend_text = format!("{}  ", app.backend.label());

    let inner_width = area.width.saturating_sub(2) as usize;
    let right_len = session_text.len() + backend_text.len() + 2 + status_text.len();
    let spacing = inner_width.saturating_sub(shortcuts.len() + right_len);

    let command_line = Line::from(vec![
        Span::styled(shortcuts, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(spacing)),
        Span::styled(session_text, Style::default().fg(Color::DarkGray)),
        Span::styled(backend_text, Style::default().fg(Color::DarkGray)),
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(status_text, Style::default().fg(status_color)),
    ]);

    let command_panel = Paragraph::new(command_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.status.border_type())
            .border_style(Style::default().fg(status_color)),
    );
    f.render_widget(command_panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0s");
        assert_eq!(format_elapsed(Duration::from_secs(45)), "45s");
    }

    #[test]
    fn test_format_elapsed_minutes() {
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_elapsed_hours() {
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "1h 2m 3s");
    }

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }

    #[test]
    fn test_text_input_spans_unfocused_is_plain() {
        let spans = text_input_spans("hello", 2, false, 38);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "hello");
    }

    #[test]
    fn test_text_input_spans_focused_splits_at_cursor() {
        let spans = text_input_spans("hello", 2, true, 38);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "he");
        assert_eq!(spans[1].content, "l");
        assert_eq!(spans[2].content, "lo");
    }

    #[test]
    fn test_text_input_spans_cursor_at_end_shows_block() {
        let spans = text_input_spans("hi", 2, true, 38);
        assert_eq!(spans[0].content, "hi");
        assert_eq!(spans[1].content, " ");
        assert_eq!(spans[2].content, "");
    }

    #[test]
    fn test_text_input_spans_windows_long_values() {
        let value = "a".repeat(100);
        let spans = text_input_spans(&value, 99, true, 20);
        let total: usize = spans.iter().map(|s| s.content.len()).sum();
        assert!(total <= 21); // window plus trailing cursor block
    }

    #[test]
    fn test_text_input_spans_windows_multibyte_values() {
        // 13 CJK chars are 39 bytes, one past the field width.
        let value = "\u{3042}".repeat(13);
        let spans = text_input_spans(&value, value.len(), true, 38);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, " ");
        assert!(spans[0].content.chars().all(|c| c == '\u{3042}'));

        // Cursor mid-string lands on a whole character.
        let value = "\u{3042}".repeat(20);
        let spans = text_input_spans(&value, 30, true, 38);
        assert_eq!(spans[1].content, "\u{3042}");
        let total: usize = spans.iter().map(|s| s.content.len()).sum();
        assert!(total <= 38);
    }
}
