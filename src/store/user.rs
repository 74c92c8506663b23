use serde::{Deserialize, Serialize};

pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
    Guest,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }

    /// Next role in display order, for the form's role selector.
    pub fn next(&self) -> Role {
        match self {
            Role::Admin => Role::User,
            Role::User => Role::Guest,
            Role::Guest => Role::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Avatar URL. Absence is a valid, permanent state, not an error.
    pub avatar: Option<String>,
    pub role: Role,
}

impl User {
    /// First character of the name, used as an avatar placeholder.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// A partial update to a [`User`]. Fields left as `None` are untouched.
///
/// `avatar` is doubly optional: `None` leaves it alone, `Some(None)` clears
/// it, `Some(Some(url))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn apply_to(&self, user: &User) -> User {
        User {
            id: user.id,
            name: self.name.clone().unwrap_or_else(|| user.name.clone()),
            email: self.email.clone().unwrap_or_else(|| user.email.clone()),
            avatar: self.avatar.clone().unwrap_or_else(|| user.avatar.clone()),
            role: self.role.unwrap_or(user.role),
        }
    }
}
