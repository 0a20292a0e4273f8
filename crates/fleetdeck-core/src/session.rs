// ── Session context ──
//
// Durable client-side state: auth token, serialized user, display
// preferences, and integration credentials. An explicit injected store
// replaces ambient global storage so tests can fake persistence. Every
// write goes through the store immediately; reads come from an in-memory
// snapshot loaded at `init`.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{User, UserPreferences};

/// Integration-provider credentials. Held client-side only and never
/// sent to the backend by this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationKeys {
    pub maps_key: String,
    pub payment_key: String,
    pub sms_key: String,
}

/// Everything the session persists between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    #[serde(default)]
    pub integration_keys: IntegrationKeys,
}

/// Persistence backend for [`SessionState`].
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<SessionState, CoreError>;
    fn save(&self, state: &SessionState) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<SessionState, CoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, state: &SessionState) -> Result<(), CoreError> {
        *self.lock() = state.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.lock() = SessionState::default();
        Ok(())
    }
}

impl MemorySessionStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Typed accessors over a [`SessionStore`], with a write-through
/// in-memory snapshot.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    state: Mutex<SessionState>,
}

impl SessionContext {
    /// Wrap a store and load its current state.
    pub fn init(store: Arc<dyn SessionStore>) -> Result<Self, CoreError> {
        let state = store.load()?;
        Ok(Self {
            store,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn persist(&self, state: &SessionState) -> Result<(), CoreError> {
        self.store.save(state)
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Preferences, falling back to the defaults when never synced.
    pub fn preferences(&self) -> UserPreferences {
        self.lock().preferences.clone().unwrap_or_default()
    }

    pub fn integration_keys(&self) -> IntegrationKeys {
        self.lock().integration_keys.clone()
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub fn set_session(&self, token: String, user: User) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.token = Some(token);
        state.user = Some(user);
        self.persist(&state)
    }

    pub fn set_preferences(&self, preferences: UserPreferences) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.preferences = Some(preferences);
        self.persist(&state)
    }

    pub fn set_integration_keys(&self, keys: IntegrationKeys) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.integration_keys = keys;
        self.persist(&state)
    }

    /// Drop token and user; preferences and integration keys survive a
    /// logout.
    pub fn clear_auth(&self) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.token = None;
        state.user = None;
        self.persist(&state)
    }

    /// Wipe everything, including the backing store.
    pub fn teardown(&self) -> Result<(), CoreError> {
        *self.lock() = SessionState::default();
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".into(),
            email: "ops@example.com".into(),
            role: "admin".into(),
            name: None,
            is_active: true,
        }
    }

    #[test]
    fn session_roundtrip_through_store() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = SessionContext::init(Arc::clone(&store) as Arc<dyn SessionStore>).unwrap();

        assert!(!ctx.is_authenticated());
        ctx.set_session("tok".into(), user()).unwrap();
        assert_eq!(ctx.token().as_deref(), Some("tok"));

        // A second context over the same store sees the saved state.
        let again = SessionContext::init(store as Arc<dyn SessionStore>).unwrap();
        assert!(again.is_authenticated());
        assert_eq!(again.user().map(|u| u.email), Some("ops@example.com".into()));
    }

    #[test]
    fn logout_keeps_preferences() {
        let ctx = SessionContext::init(Arc::new(MemorySessionStore::new())).unwrap();
        let mut prefs = UserPreferences::default();
        prefs.currency = "Euro (€)".to_owned();
        ctx.set_preferences(prefs.clone()).unwrap();
        ctx.set_session("tok".into(), user()).unwrap();

        ctx.clear_auth().unwrap();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.preferences(), prefs);
    }

    #[test]
    fn teardown_wipes_the_store() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = SessionContext::init(Arc::clone(&store) as Arc<dyn SessionStore>).unwrap();
        ctx.set_session("tok".into(), user()).unwrap();
        ctx.teardown().unwrap();

        assert_eq!(store.load().unwrap(), SessionState::default());
    }
}
