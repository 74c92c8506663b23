use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub roster: Rect,
    pub detail: Rect,
    pub form: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Horizontal: roster | gap | detail + form
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(34), // Roster
            Constraint::Min(40),    // Right content
        ])
        .split(content);

    let roster = h_chunks[0];
    let right_panel = h_chunks[1];

    // Right panel: current user card | edit form
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Current user
            Constraint::Min(7),    // Form
        ])
        .split(right_panel);

    AppLayout {
        roster,
        detail: right_chunks[0],
        form: right_chunks[1],
        status_bar,
    }
}
