use crate::app::state::{AppState, FocusPanel};
use crate::store::StoreState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, snap: &StoreState) {
    let focused = state.focus == FocusPanel::Roster;
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let current_id = snap.current_user.as_ref().map(|u| u.id);
    let selected = state.selected.min(snap.users.len().saturating_sub(1));

    let mut items: Vec<ListItem> = Vec::new();
    for (idx, user) in snap.users.iter().enumerate() {
        let marker = if Some(user.id) == current_id {
            Span::styled(" ● ", Theme::current_marker())
        } else {
            Span::styled("   ", Theme::text())
        };
        let name_style = if focused && idx == selected {
            Theme::selected()
        } else {
            Theme::text()
        };
        items.push(ListItem::new(Line::from(vec![
            marker,
            Span::styled(format!("{:<18}", user.name), name_style),
            Span::styled(format!(" {}", user.role.label()), Theme::role(user.role)),
        ])));
    }

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            " no users — press n to add one",
            Theme::text_muted(),
        )));
    }

    let title = format!(" Users ({}) ", snap.users.len());
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
