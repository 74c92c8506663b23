use crate::app::state::{AppState, FocusPanel, FormField};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: u16 = 8;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Form;
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let title = match state.form.editing {
        Some(id) => format!(" Edit user #{} ", id),
        None => " Add user ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_line = |label: &str, value: &str, field: FormField| {
        let active = focused && state.form.field == field;
        let chevron = if active { "❯ " } else { "  " };
        Line::from(vec![
            Span::styled(chevron, Theme::prompt()),
            Span::styled(format!("{:<6}", label), Theme::label()),
            Span::styled(
                value.to_string(),
                if active { Theme::input_text() } else { Theme::text_muted() },
            ),
        ])
    };

    let role_value = format!("◂ {} ▸", state.form.role.label());
    let mut lines = vec![
        field_line("name", &state.form.name.text, FormField::Name),
        field_line("email", &state.form.email.text, FormField::Email),
        field_line("role", &role_value, FormField::Role),
    ];

    lines.push(Line::default());
    let hint = if focused {
        " enter save · tab next field · esc cancel"
    } else {
        " tab to edit · n new · e edit selected · d delete"
    };
    lines.push(Line::from(Span::styled(hint, Theme::text_muted())));

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);

    // Text cursor on the active text field.
    if focused {
        let (row, input) = match state.form.field {
            FormField::Name => (0u16, &state.form.name),
            FormField::Email => (1, &state.form.email),
            FormField::Role => return,
        };
        let prefix_width = input.text[..input.cursor].width() as u16;
        let cursor_x = inner.x + LABEL_WIDTH + prefix_width;
        let cursor_y = inner.y + row;
        if cursor_y < inner.bottom() {
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), cursor_y));
        }
    }
}
