//! Settings modal rendering. Preferences apply live as they are changed;
//! there is no save button, only reset.

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::forms::SettingsField;
use crate::ui::centered_rect;

pub fn draw_settings_modal(f: &mut Frame, app: &App) {
    let modal_width = 52;
    let modal_height = 14;
    let modal_area = centered_rect(modal_width, modal_height, f.area());

    f.render_widget(Clear, modal_area);

    let prefs = &app.session.prefs;
    let accent = prefs.theme.accent();
    let focus = app.settings_focus;

    let selector = |label: &'static str, value: &str, field: SettingsField| -> Line<'static> {
        let focused = focus == field;
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
    };

    let toggle = |label: &'static str, on: bool, field: SettingsField| -> Line<'static> {
        let focused = focus == field;
        Line::from(vec![
            label_span(label, focused, accent),
            Span::styled(
                if on { "[x] On" } else { "[ ] Off" },
                Style::default().fg(if on { accent } else { Color::White }),
            ),
        ])
    };

    let reset_style = if focus == SettingsField::ResetButton {
        Style::default().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };

    let lines = vec![
        selector("Theme:            ", prefs.theme.label(), SettingsField::Theme),
        selector("Card Style:       ", prefs.card_style.label(), SettingsField::CardStyle),
        selector("Font Size:        ", prefs.font_size.label(), SettingsField::FontSize),
        selector(
            "Animation Speed:  ",
            prefs.animation_speed.label(),
            SettingsField::AnimationSpeed,
        ),
        toggle("Animations:       ", prefs.show_animations, SettingsField::ShowAnimations),
        toggle("Auto-save:        ", prefs.auto_save, SettingsField::AutoSave),
        Line::default(),
        Line::from(Span::styled("[ Reset to Defaults ]", reset_style)),
        Line::default(),
        Line::from(Span::styled(
            "Tab: next  ←/→: change  Enter: toggle  Esc: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Settings "),
    );
    f.render_widget(modal, modal_area);
}

fn label_span(text: &'static str, focused: bool, accent: Color) -> Span<'static> {
    if focused {
        Span::styled(text, Style::default().fg(accent).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(text, Style::default().fg(Color::DarkGray))
    }
}
