use crate::app::event::AppEvent;
use crate::app::state::{AppState, FocusPanel, FormField};
use crate::store::{StoreAction, StoreState, User, UserPatch};
use chrono::Utc;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};

/// Turn an application event into store actions. All store mutations flow
/// out of here as values; the event loop dispatches them.
pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<StoreAction> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<StoreAction> {
    state.tick_count = state.tick_count.wrapping_add(1);

    // Session ticker in the status bar advances once a second.
    let ticks_per_sec = (1000 / state.config.ui.tick_rate_ms.max(1)).max(1);
    if state.tick_count % ticks_per_sec == 0 {
        state.dirty = true;
    }

    // Complete a pending simulated refresh.
    if let Some(due) = state.refresh_due {
        if state.tick_count >= due {
            state.refresh_due = None;
            return vec![
                StoreAction::SetUsers(StoreState::seed().users),
                StoreAction::SetLoading(false),
            ];
        }
    }

    vec![]
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<StoreAction> {
    match event {
        CEvent::Key(key) => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<StoreAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return vec![];
    }

    // A pending delete captures all input until decided.
    if state.confirm_delete.is_some() {
        return handle_confirm_key(state, key);
    }

    match state.focus {
        FocusPanel::Roster => handle_roster_key(state, key),
        FocusPanel::Form => handle_form_key(state, key),
    }
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) -> Vec<StoreAction> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let id = state.confirm_delete.take();
            match id {
                Some(id) => vec![StoreAction::DeleteUser(id)],
                None => vec![],
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm_delete = None;
            state.status_message = Some("Delete cancelled".to_string());
            vec![]
        }
        _ => vec![],
    }
}

fn handle_roster_key(state: &mut AppState, key: KeyEvent) -> Vec<StoreAction> {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            vec![]
        }
        KeyCode::Tab => {
            state.focus = FocusPanel::Form;
            vec![]
        }
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            let len = roster_len(state);
            if len > 0 && state.selected + 1 < len {
                state.selected += 1;
            }
            vec![]
        }
        KeyCode::Home => {
            state.selected = 0;
            vec![]
        }
        KeyCode::End => {
            let len = roster_len(state);
            state.selected = len.saturating_sub(1);
            vec![]
        }
        KeyCode::Enter => match selected_user(state) {
            Some(user) => vec![StoreAction::SetCurrentUser(user)],
            None => vec![],
        },
        KeyCode::Char('e') => {
            if let Some(user) = selected_user(state) {
                state.form.load(&user);
                state.focus = FocusPanel::Form;
            }
            vec![]
        }
        KeyCode::Char('n') => {
            state.form.reset();
            state.focus = FocusPanel::Form;
            vec![]
        }
        KeyCode::Char('d') => match selected_user(state) {
            Some(user) if state.config.ui.confirm_delete => {
                state.confirm_delete = Some(user.id);
                state.status_message = None;
                vec![]
            }
            Some(user) => vec![StoreAction::DeleteUser(user.id)],
            None => vec![],
        },
        KeyCode::Char('r') => {
            if state.refresh_due.is_some() {
                return vec![];
            }
            state.refresh_due =
                Some(state.tick_count + state.config.directory.refresh_delay_ticks);
            vec![StoreAction::SetLoading(true)]
        }
        KeyCode::Char('c') => vec![StoreAction::ClearError],
        _ => vec![],
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Vec<StoreAction> {
    match key.code {
        KeyCode::Esc => {
            state.form.reset();
            state.focus = FocusPanel::Roster;
            vec![]
        }
        KeyCode::Enter => submit_form(state),
        KeyCode::Tab | KeyCode::Down => {
            state.form.next_field();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.form.prev_field();
            vec![]
        }
        KeyCode::Backspace => {
            if let Some(input) = state.form.focused_input_mut() {
                input.delete_back();
            }
            vec![]
        }
        KeyCode::Left => {
            match state.form.field {
                FormField::Role => state.form.role = state.form.role.next().next(),
                _ => {
                    if let Some(input) = state.form.focused_input_mut() {
                        input.move_left();
                    }
                }
            }
            vec![]
        }
        KeyCode::Right => {
            match state.form.field {
                FormField::Role => state.form.role = state.form.role.next(),
                _ => {
                    if let Some(input) = state.form.focused_input_mut() {
                        input.move_right();
                    }
                }
            }
            vec![]
        }
        KeyCode::Home => {
            if let Some(input) = state.form.focused_input_mut() {
                input.move_home();
            }
            vec![]
        }
        KeyCode::End => {
            if let Some(input) = state.form.focused_input_mut() {
                input.move_end();
            }
            vec![]
        }
        KeyCode::Char(' ') if state.form.field == FormField::Role => {
            state.form.role = state.form.role.next();
            vec![]
        }
        KeyCode::Char(c) => {
            if let Some(input) = state.form.focused_input_mut() {
                input.insert_char(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

/// Required-field semantics only; anything stricter is up to upstream
/// callers per the store contract.
fn submit_form(state: &mut AppState) -> Vec<StoreAction> {
    let name = state.form.name.text.trim().to_string();
    let email = state.form.email.text.trim().to_string();

    if name.is_empty() {
        return vec![StoreAction::SetError("name is required".to_string())];
    }
    if email.is_empty() {
        return vec![StoreAction::SetError("email is required".to_string())];
    }

    let actions = if let Some(id) = state.form.editing {
        vec![StoreAction::UpdateUser {
            id,
            patch: UserPatch {
                name: Some(name),
                email: Some(email),
                role: Some(state.form.role),
                avatar: None,
            },
        }]
    } else {
        vec![StoreAction::AddUser(User {
            // Timestamp-derived id, as the store contract allows. No
            // collision check happens downstream.
            id: Utc::now().timestamp_millis(),
            name,
            email,
            avatar: None,
            role: state.form.role,
        })]
    };

    state.form.reset();
    state.focus = FocusPanel::Roster;
    state.status_message = None;
    actions
}

fn roster_len(state: &mut AppState) -> usize {
    match state.store.users() {
        Ok(users) => users.len(),
        Err(e) => {
            state.status_message = Some(e.to_string());
            0
        }
    }
}

fn selected_user(state: &mut AppState) -> Option<User> {
    let users = match state.store.users() {
        Ok(users) => users,
        Err(e) => {
            state.status_message = Some(e.to_string());
            return None;
        }
    };
    if users.is_empty() {
        return None;
    }
    let idx = state.selected.min(users.len() - 1);
    state.selected = idx;
    Some(users[idx].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::{Role, StoreState, UserStore};

    fn fixture() -> (UserStore, AppState) {
        let store = UserStore::provision(StoreState::seed());
        let state = AppState::new(AppConfig::default(), store.handle());
        (store, state)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            let _ = handle_event(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn empty_name_submit_reports_error() {
        let (_store, mut state) = fixture();
        state.focus = FocusPanel::Form;
        let actions = handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(
            actions,
            vec![StoreAction::SetError("name is required".to_string())]
        );
    }

    #[test]
    fn form_submit_adds_user_with_typed_fields() {
        let (_store, mut state) = fixture();
        state.focus = FocusPanel::Form;
        type_text(&mut state, "Ada");
        let _ = handle_event(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "ada@example.com");
        let _ = handle_event(&mut state, key(KeyCode::Tab));
        let _ = handle_event(&mut state, key(KeyCode::Char(' '))); // user -> guest

        let actions = handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            StoreAction::AddUser(user) => {
                assert_eq!(user.name, "Ada");
                assert_eq!(user.email, "ada@example.com");
                assert_eq!(user.role, Role::Guest);
                assert_eq!(user.avatar, None);
            }
            other => panic!("expected AddUser, got {:?}", other),
        }
        assert_eq!(state.focus, FocusPanel::Roster);
        assert_eq!(state.form.name.text, "");
    }

    #[test]
    fn edit_flow_emits_update_for_selected_user() {
        let (_store, mut state) = fixture();
        let _ = handle_event(&mut state, key(KeyCode::Char('e')));
        assert_eq!(state.focus, FocusPanel::Form);
        assert_eq!(state.form.editing, Some(1));
        assert_eq!(state.form.name.text, "Zhang San");

        let _ = handle_event(&mut state, key(KeyCode::Backspace));
        type_text(&mut state, "g");
        let actions = handle_event(&mut state, key(KeyCode::Enter));
        match &actions[0] {
            StoreAction::UpdateUser { id, patch } => {
                assert_eq!(*id, 1);
                assert_eq!(patch.name.as_deref(), Some("Zhang Sag"));
                assert_eq!(patch.avatar, None);
            }
            other => panic!("expected UpdateUser, got {:?}", other),
        }
    }

    #[test]
    fn delete_requires_confirmation_then_fires() {
        let (_store, mut state) = fixture();
        let actions = handle_event(&mut state, key(KeyCode::Char('d')));
        assert!(actions.is_empty());
        assert_eq!(state.confirm_delete, Some(1));

        // Unrelated keys are swallowed while the prompt is up.
        let actions = handle_event(&mut state, key(KeyCode::Char('x')));
        assert!(actions.is_empty());
        assert_eq!(state.confirm_delete, Some(1));

        let actions = handle_event(&mut state, key(KeyCode::Char('y')));
        assert_eq!(actions, vec![StoreAction::DeleteUser(1)]);
        assert_eq!(state.confirm_delete, None);
    }

    #[test]
    fn delete_confirmation_can_be_cancelled() {
        let (_store, mut state) = fixture();
        let _ = handle_event(&mut state, key(KeyCode::Char('d')));
        let actions = handle_event(&mut state, key(KeyCode::Char('n')));
        assert!(actions.is_empty());
        assert_eq!(state.confirm_delete, None);
    }

    #[test]
    fn delete_skips_prompt_when_configured_off() {
        let (_store, mut state) = fixture();
        state.config.ui.confirm_delete = false;
        let actions = handle_event(&mut state, key(KeyCode::Char('d')));
        assert_eq!(actions, vec![StoreAction::DeleteUser(1)]);
    }

    #[test]
    fn refresh_cycle_is_caller_driven() {
        let (_store, mut state) = fixture();
        let actions = handle_event(&mut state, key(KeyCode::Char('r')));
        assert_eq!(actions, vec![StoreAction::SetLoading(true)]);
        let due = state.refresh_due.expect("refresh scheduled");

        // Nothing happens until the due tick.
        let mut completed = Vec::new();
        while state.tick_count < due {
            completed = handle_event(&mut state, AppEvent::Tick);
        }
        assert_eq!(
            completed,
            vec![
                StoreAction::SetUsers(StoreState::seed().users),
                StoreAction::SetLoading(false),
            ]
        );
        assert_eq!(state.refresh_due, None);
    }

    #[test]
    fn enter_on_roster_sets_current_user() {
        let (_store, mut state) = fixture();
        let _ = handle_event(&mut state, key(KeyCode::Down));
        let actions = handle_event(&mut state, key(KeyCode::Enter));
        match &actions[0] {
            StoreAction::SetCurrentUser(user) => assert_eq!(user.id, 2),
            other => panic!("expected SetCurrentUser, got {:?}", other),
        }
    }
}
