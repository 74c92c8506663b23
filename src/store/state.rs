use crate::store::user::{Role, User, UserId};

/// Full store state. Treated as immutable between dispatches: the reducer
/// builds a new value rather than editing this one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Value copy of an entry conceptually drawn from `users`. The reducer
    /// keeps it consistent with `users` after every list-mutating action.
    pub current_user: Option<User>,
    /// Insertion order preserved. Uniqueness of `id` is a caller-maintained
    /// invariant, not enforced at this level.
    pub users: Vec<User>,
    /// Caller-managed. No action toggles this around a mutation.
    pub loading: bool,
    /// Cleared by any successful mutation, set only by an explicit
    /// error-reporting action.
    pub error: Option<String>,
}

impl StoreState {
    /// Fixed initial directory: three users, no current user.
    pub fn seed() -> Self {
        Self {
            current_user: None,
            users: vec![
                User {
                    id: 1,
                    name: "Zhang San".to_string(),
                    email: "zhangsan@example.com".to_string(),
                    avatar: None,
                    role: Role::Admin,
                },
                User {
                    id: 2,
                    name: "Li Si".to_string(),
                    email: "lisi@example.com".to_string(),
                    avatar: None,
                    role: Role::User,
                },
                User {
                    id: 3,
                    name: "Wang Wu".to_string(),
                    email: "wangwu@example.com".to_string(),
                    avatar: None,
                    role: Role::User,
                },
            ],
            loading: false,
            error: None,
        }
    }

    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
