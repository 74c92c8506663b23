use crate::store::StoreState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, snap: &StoreState) {
    let block = Block::default()
        .title(" Current user ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Loading and error short-circuit the card, in that order.
    if snap.loading {
        let paragraph = Paragraph::new(Span::styled(" Loading…", Theme::loading()));
        frame.render_widget(paragraph, inner);
        return;
    }
    if let Some(ref error) = snap.error {
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(format!(" Error: {}", error), Theme::error())),
            Line::from(Span::styled(" press c to clear", Theme::text_muted())),
        ]);
        frame.render_widget(paragraph, inner);
        return;
    }

    let Some(ref user) = snap.current_user else {
        let paragraph = Paragraph::new(Span::styled(" No current user", Theme::text_muted()));
        frame.render_widget(paragraph, inner);
        return;
    };

    // Avatar URL when set, otherwise an initial as placeholder.
    let avatar_line = match &user.avatar {
        Some(url) => Line::from(vec![
            Span::styled(" avatar ", Theme::label()),
            Span::styled(url.clone(), Theme::text()),
        ]),
        None => Line::from(vec![
            Span::styled(format!(" ({}) ", user.initial()), Theme::current_marker()),
            Span::styled("no avatar", Theme::text_muted()),
        ]),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", user.name),
            Theme::title(),
        )),
        Line::from(Span::styled(
            format!(" {}", user.email),
            Theme::text_muted(),
        )),
        Line::from(vec![
            Span::styled(" role ", Theme::label()),
            Span::styled(user.role.label(), Theme::role(user.role)),
        ]),
        avatar_line,
        Line::from(Span::styled(
            format!(" id {}", user.id),
            Theme::text_muted(),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}
