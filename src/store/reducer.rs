//! The pure reduction function: `(state, action) -> new state`.
//!
//! Never mutates its inputs. Every mutating action except `SetLoading` and
//! `ClearError` also clears `error`, so a stale error never survives a
//! successful change.

use crate::store::action::StoreAction;
use crate::store::state::StoreState;

pub fn reduce(state: &StoreState, action: &StoreAction) -> StoreState {
    match action {
        StoreAction::SetLoading(flag) => StoreState {
            loading: *flag,
            ..state.clone()
        },

        StoreAction::SetCurrentUser(user) => StoreState {
            current_user: Some(user.clone()),
            error: None,
            ..state.clone()
        },

        StoreAction::SetUsers(users) => {
            // Re-resolve the current user against the incoming list so the
            // store never points at an id that is no longer present.
            let current_user = state
                .current_user
                .as_ref()
                .and_then(|cur| users.iter().find(|u| u.id == cur.id).cloned());
            StoreState {
                current_user,
                users: users.clone(),
                error: None,
                loading: state.loading,
            }
        }

        StoreAction::AddUser(user) => {
            let mut users = state.users.clone();
            users.push(user.clone());
            StoreState {
                users,
                error: None,
                current_user: state.current_user.clone(),
                loading: state.loading,
            }
        }

        StoreAction::UpdateUser { id, patch } => {
            let users: Vec<_> = state
                .users
                .iter()
                .map(|u| if u.id == *id { patch.apply_to(u) } else { u.clone() })
                .collect();
            let current_user = state.current_user.as_ref().map(|cur| {
                if cur.id == *id {
                    patch.apply_to(cur)
                } else {
                    cur.clone()
                }
            });
            StoreState {
                current_user,
                users,
                error: None,
                loading: state.loading,
            }
        }

        StoreAction::DeleteUser(id) => {
            let users: Vec<_> = state
                .users
                .iter()
                .filter(|u| u.id != *id)
                .cloned()
                .collect();
            let current_user = state
                .current_user
                .as_ref()
                .filter(|cur| cur.id != *id)
                .cloned();
            StoreState {
                current_user,
                users,
                error: None,
                loading: state.loading,
            }
        }

        StoreAction::SetError(message) => StoreState {
            error: Some(message.clone()),
            loading: false,
            ..state.clone()
        },

        StoreAction::ClearError => StoreState {
            error: None,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::user::{Role, User, UserPatch};

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', "")),
            avatar: None,
            role: Role::Guest,
        }
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let state = StoreState::seed();
        let before = state.clone();
        let _ = reduce(&state, &StoreAction::DeleteUser(1));
        let _ = reduce(&state, &StoreAction::SetLoading(true));
        assert_eq!(state, before);
    }

    #[test]
    fn add_user_appends_and_preserves_order() {
        let state = StoreState::seed();
        let added = user(99, "New");
        let next = reduce(&state, &StoreAction::AddUser(added.clone()));
        assert_eq!(next.users.len(), 4);
        assert_eq!(&next.users[..3], &state.users[..]);
        assert_eq!(next.users.last(), Some(&added));
    }

    #[test]
    fn update_unknown_id_is_a_noop_besides_error_clearing() {
        let mut state = StoreState::seed();
        state.error = Some("stale".to_string());
        let next = reduce(
            &state,
            &StoreAction::UpdateUser {
                id: 42,
                patch: UserPatch {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            },
        );
        assert_eq!(next.users, state.users);
        assert_eq!(next.current_user, state.current_user);
        assert_eq!(next.error, None);
    }

    #[test]
    fn update_syncs_current_user() {
        let state = StoreState::seed();
        let first = state.users[0].clone();
        let state = reduce(&state, &StoreAction::SetCurrentUser(first));
        let next = reduce(
            &state,
            &StoreAction::UpdateUser {
                id: 1,
                patch: UserPatch {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            },
        );
        assert_eq!(next.users[0].name, "X");
        assert_eq!(next.current_user.as_ref().unwrap().name, "X");
        assert_eq!(next.current_user.as_ref().unwrap(), &next.users[0]);
    }

    #[test]
    fn delete_current_user_clears_pointer() {
        let state = StoreState::seed();
        let first = state.users[0].clone();
        let state = reduce(&state, &StoreAction::SetCurrentUser(first));
        let next = reduce(&state, &StoreAction::DeleteUser(1));
        assert_eq!(next.users.len(), 2);
        assert_eq!(next.current_user, None);
    }

    #[test]
    fn delete_other_user_keeps_current() {
        let state = StoreState::seed();
        let first = state.users[0].clone();
        let state = reduce(&state, &StoreAction::SetCurrentUser(first.clone()));
        let next = reduce(&state, &StoreAction::DeleteUser(3));
        assert_eq!(next.users.len(), 2);
        assert_eq!(next.current_user, Some(first));
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        let state = StoreState::seed();
        let next = reduce(&state, &StoreAction::DeleteUser(42));
        assert_eq!(next.users, state.users);
    }

    #[test]
    fn clear_error_is_idempotent() {
        let mut state = StoreState::seed();
        state.error = Some("boom".to_string());
        let once = reduce(&state, &StoreAction::ClearError);
        let twice = reduce(&once, &StoreAction::ClearError);
        assert_eq!(once, twice);
    }

    #[test]
    fn set_error_forces_loading_off() {
        let state = reduce(&StoreState::seed(), &StoreAction::SetLoading(true));
        assert!(state.loading);
        let next = reduce(&state, &StoreAction::SetError("fetch failed".to_string()));
        assert_eq!(next.error.as_deref(), Some("fetch failed"));
        assert!(!next.loading);
    }

    #[test]
    fn set_loading_does_not_clear_error() {
        let state = reduce(&StoreState::seed(), &StoreAction::SetError("boom".to_string()));
        let next = reduce(&state, &StoreAction::SetLoading(true));
        assert_eq!(next.error.as_deref(), Some("boom"));
    }

    #[test]
    fn set_users_reresolves_current_user() {
        let state = StoreState::seed();
        let first = state.users[0].clone();
        let state = reduce(&state, &StoreAction::SetCurrentUser(first));

        // Current user survives with the incoming list's copy.
        let mut renamed = state.users.clone();
        renamed[0].name = "Renamed".to_string();
        let next = reduce(&state, &StoreAction::SetUsers(renamed));
        assert_eq!(next.current_user.as_ref().unwrap().name, "Renamed");

        // Current user vanishes when its id is gone from the new list.
        let without_first: Vec<_> = next.users[1..].to_vec();
        let next = reduce(&next, &StoreAction::SetUsers(without_first));
        assert_eq!(next.current_user, None);
    }

    #[test]
    fn scenario_update_current_by_id() {
        let state = StoreState::seed();
        let first = state.users[0].clone();
        let state = reduce(&state, &StoreAction::SetCurrentUser(first));
        let state = reduce(
            &state,
            &StoreAction::UpdateUser {
                id: 1,
                patch: UserPatch {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            },
        );
        assert_eq!(state.current_user.as_ref().unwrap().name, "X");
        assert_eq!(state.users[0].name, "X");
    }

    #[test]
    fn scenario_add_then_find() {
        let state = StoreState::seed();
        let added = user(99, "N");
        let state = reduce(&state, &StoreAction::AddUser(added.clone()));
        assert_eq!(state.users.len(), 4);
        assert_eq!(state.find_user(99), Some(&added));
    }
}
