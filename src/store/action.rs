use crate::store::user::{User, UserId, UserPatch};

/// A tagged, immutable description of a requested state change.
///
/// This is a closed set: the reducer matches it exhaustively, so adding a
/// variant forces every match site to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    SetLoading(bool),
    SetCurrentUser(User),
    SetUsers(Vec<User>),
    /// The caller supplies the id (e.g. timestamp-derived). No collision
    /// check is performed.
    AddUser(User),
    UpdateUser { id: UserId, patch: UserPatch },
    DeleteUser(UserId),
    SetError(String),
    ClearError,
}

impl StoreAction {
    /// Short tag for audit logging.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreAction::SetLoading(_) => "set_loading",
            StoreAction::SetCurrentUser(_) => "set_current_user",
            StoreAction::SetUsers(_) => "set_users",
            StoreAction::AddUser(_) => "add_user",
            StoreAction::UpdateUser { .. } => "update_user",
            StoreAction::DeleteUser(_) => "delete_user",
            StoreAction::SetError(_) => "set_error",
            StoreAction::ClearError => "clear_error",
        }
    }
}
