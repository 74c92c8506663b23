//! Store provisioning and consumer access.
//!
//! [`UserStore`] owns the state and is created once at startup. Everything
//! else receives a [`StoreHandle`] — a weak reference passed down explicitly
//! rather than looked up through any global. When the owning store is
//! dropped, handle operations fail with [`StoreError::NotInitialized`]
//! at the point of access.

use std::sync::{Arc, Weak};

use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::store::action::StoreAction;
use crate::store::reducer::reduce;
use crate::store::state::StoreState;
use crate::store::user::{User, UserId, UserPatch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A consumer used a handle outside the store's lifetime. This is a
    /// structural wiring bug, not a recoverable runtime condition.
    #[error("user store accessed outside its lifetime (not provisioned or already shut down)")]
    NotInitialized,
}

struct Inner {
    tx: watch::Sender<Arc<StoreState>>,
}

/// The owning side of the store. Lives for the lifetime of the application
/// root; dropping it invalidates every outstanding [`StoreHandle`].
pub struct UserStore {
    inner: Arc<Inner>,
}

impl UserStore {
    pub fn provision(initial: StoreState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self {
            inner: Arc::new(Inner { tx }),
        }
    }

    pub fn handle(&self) -> StoreHandle {
        StoreHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn snapshot(&self) -> Arc<StoreState> {
        self.inner.tx.borrow().clone()
    }
}

/// Cheap, clonable consumer access to the store.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Weak<Inner>,
}

impl StoreHandle {
    fn upgrade(&self) -> Result<Arc<Inner>, StoreError> {
        self.inner.upgrade().ok_or(StoreError::NotInitialized)
    }

    /// Current state snapshot. The snapshot is immutable; later dispatches
    /// do not affect it.
    pub fn snapshot(&self) -> Result<Arc<StoreState>, StoreError> {
        Ok(self.upgrade()?.tx.borrow().clone())
    }

    /// Run `action` through the reducer and publish the new snapshot.
    ///
    /// Synchronous and non-blocking. The store is single-writer: dispatches
    /// are expected to run to completion on the event-processing task.
    pub fn dispatch(&self, action: StoreAction) -> Result<Arc<StoreState>, StoreError> {
        let inner = self.upgrade()?;
        let prev = inner.tx.borrow().clone();
        let next = Arc::new(reduce(&prev, &action));
        debug!(action = action.kind(), users = next.users.len(), "dispatch");
        inner.tx.send_replace(next.clone());
        Ok(next)
    }

    // Convenience dispatchers, mirroring the closed action set.

    pub fn set_loading(&self, flag: bool) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::SetLoading(flag))
    }

    pub fn set_current_user(&self, user: User) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::SetCurrentUser(user))
    }

    pub fn set_users(&self, users: Vec<User>) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::SetUsers(users))
    }

    pub fn add_user(&self, user: User) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::AddUser(user))
    }

    pub fn update_user(&self, id: UserId, patch: UserPatch) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::UpdateUser { id, patch })
    }

    pub fn delete_user(&self, id: UserId) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::DeleteUser(id))
    }

    pub fn set_error(&self, message: impl Into<String>) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::SetError(message.into()))
    }

    pub fn clear_error(&self) -> Result<Arc<StoreState>, StoreError> {
        self.dispatch(StoreAction::ClearError)
    }

    // Derived views. Recomputed on every read, no side effects.

    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        Ok(self.snapshot()?.current_user.clone())
    }

    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.snapshot()?.users.clone())
    }

    pub fn loading(&self) -> Result<bool, StoreError> {
        Ok(self.snapshot()?.loading)
    }

    /// Subscribe to every published snapshot.
    pub fn subscribe(&self) -> Result<watch::Receiver<Arc<StoreState>>, StoreError> {
        Ok(self.upgrade()?.tx.subscribe())
    }

    /// Subscribe to a derived slice. The subscription only reports a value
    /// when the selected slice changes, so a consumer watching `loading` is
    /// not woken by user-list edits.
    pub fn subscribe_slice<T, F>(&self, select: F) -> Result<Subscription<T>, StoreError>
    where
        T: Clone + PartialEq,
        F: Fn(&StoreState) -> T + Send + 'static,
    {
        let inner = self.upgrade()?;
        let rx = inner.tx.subscribe();
        let snap = rx.borrow().clone();
        let last = select(&snap);
        Ok(Subscription {
            rx,
            select: Box::new(select),
            last,
        })
    }
}

/// A narrow subscription over one derived slice of the state.
pub struct Subscription<T> {
    rx: watch::Receiver<Arc<StoreState>>,
    select: Box<dyn Fn(&StoreState) -> T + Send>,
    last: T,
}

impl<T: Clone + PartialEq> Subscription<T> {
    /// The slice value as of the latest snapshot.
    pub fn current(&self) -> T {
        let snap = self.rx.borrow().clone();
        (self.select)(&snap)
    }

    /// Returns `Some(new value)` only if the slice changed since the last
    /// call (or since subscribing).
    pub fn poll(&mut self) -> Option<T> {
        let snap = self.rx.borrow_and_update().clone();
        let cur = (self.select)(&snap);
        if cur != self.last {
            self.last = cur.clone();
            Some(cur)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::user::Role;

    fn guest(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            avatar: None,
            role: Role::Guest,
        }
    }

    #[test]
    fn provision_seeds_state() {
        let store = UserStore::provision(StoreState::seed());
        let snap = store.snapshot();
        assert_eq!(snap.users.len(), 3);
        assert_eq!(snap.current_user, None);
        assert!(!snap.loading);
        assert_eq!(snap.error, None);
    }

    #[test]
    fn dispatch_publishes_new_snapshot_and_keeps_old_ones_valid() {
        let store = UserStore::provision(StoreState::seed());
        let handle = store.handle();
        let before = store.snapshot();
        let after = handle.add_user(guest(99, "N")).unwrap();
        assert_eq!(before.users.len(), 3);
        assert_eq!(after.users.len(), 4);
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &store.snapshot()));
    }

    #[test]
    fn handle_fails_after_store_is_dropped() {
        let store = UserStore::provision(StoreState::seed());
        let handle = store.handle();
        drop(store);
        assert_eq!(handle.snapshot().unwrap_err(), StoreError::NotInitialized);
        assert_eq!(
            handle.dispatch(StoreAction::ClearError).unwrap_err(),
            StoreError::NotInitialized
        );
        assert_eq!(handle.loading().unwrap_err(), StoreError::NotInitialized);
    }

    #[test]
    fn selectors_read_current_snapshot() {
        let store = UserStore::provision(StoreState::seed());
        let handle = store.handle();
        assert_eq!(handle.current_user().unwrap(), None);
        let first = handle.users().unwrap()[0].clone();
        handle.set_current_user(first.clone()).unwrap();
        assert_eq!(handle.current_user().unwrap(), Some(first));
        assert!(!handle.loading().unwrap());
    }

    #[test]
    fn slice_subscription_ignores_unrelated_changes() {
        let store = UserStore::provision(StoreState::seed());
        let handle = store.handle();
        let mut loading = handle.subscribe_slice(|s| s.loading).unwrap();
        assert!(!loading.current());

        // User-list edits do not wake a loading watcher.
        handle.add_user(guest(99, "N")).unwrap();
        assert_eq!(loading.poll(), None);

        handle.set_loading(true).unwrap();
        assert_eq!(loading.poll(), Some(true));
        assert_eq!(loading.poll(), None);
    }

    #[test]
    fn slice_subscription_tracks_current_user() {
        let store = UserStore::provision(StoreState::seed());
        let handle = store.handle();
        let mut current = handle
            .subscribe_slice(|s| s.current_user.clone())
            .unwrap();

        let first = handle.users().unwrap()[0].clone();
        handle.set_current_user(first.clone()).unwrap();
        assert_eq!(current.poll(), Some(Some(first)));

        handle.delete_user(1).unwrap();
        assert_eq!(current.poll(), Some(None));
    }
}
