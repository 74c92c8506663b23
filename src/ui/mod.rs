mod detail;
mod form;
mod layout;
mod roster;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use crate::store::StoreState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState, snap: &StoreState) {
    let app_layout = layout::compute_layout(frame.area());

    roster::render(frame, app_layout.roster, state, snap);
    detail::render(frame, app_layout.detail, snap);
    form::render(frame, app_layout.form, state);
    status_bar::render(frame, app_layout.status_bar, state, snap);
}
