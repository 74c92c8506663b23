use crate::app::state::{AppState, FocusPanel};
use crate::store::StoreState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, snap: &StoreState) {
    let mut parts: Vec<Span> = Vec::new();

    if let Some(id) = state.confirm_delete {
        // The prompt owns the bar until answered.
        let name = snap
            .find_user(id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| format!("#{}", id));
        parts.push(Span::styled(
            format!(" Delete {}? [y/n] ", name),
            Style::default().fg(Color::Red).bg(Color::DarkGray),
        ));
    } else {
        parts.push(Span::styled(
            format!(" Users: {} ", snap.users.len()),
            Theme::status_bar(),
        ));

        let current = snap
            .current_user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("—");
        parts.push(Span::styled(
            format!("| Current: {} ", current),
            Theme::status_bar(),
        ));

        if snap.loading {
            parts.push(Span::styled(
                "| refreshing… ".to_string(),
                Style::default().fg(Color::Yellow).bg(Color::DarkGray),
            ));
        }

        if let Some(ref error) = snap.error {
            parts.push(Span::styled(
                format!("| {} (c to clear) ", error),
                Style::default().fg(Color::Red).bg(Color::DarkGray),
            ));
        } else if let Some(ref msg) = state.status_message {
            parts.push(Span::styled(format!("| {} ", msg), Theme::status_bar()));
        }
    }

    let clock = chrono::Local::now()
        .format(&state.config.ui.timestamp_format)
        .to_string();
    let focus_name = match state.focus {
        FocusPanel::Roster => "ROSTER",
        FocusPanel::Form => "FORM",
    };
    let right = format!(" up {}s | {} [{}] ", state.uptime_secs(), clock, focus_name);

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.len()).sum();
    let remaining = (area.width as usize).saturating_sub(used + right.len());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        right,
        Style::default().fg(Color::Cyan).bg(Color::DarkGray),
    ));

    let line = Line::from(parts);
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}
