//! Server-side session store keyed by an opaque cookie token.
//!
//! Sessions live in process memory, like the original express-session
//! default store. A deployment running more than one instance needs an
//! external shared store instead; that is a deployment constraint, not
//! something the application logic works around.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rand::distributions::Alphanumeric;
use rand::Rng;

pub const SESSION_COOKIE: &str = "buddy_session";

const TOKEN_LEN: usize = 32;

/// What a signed-in session knows about its user. `cart_id` is legacy
/// baggage the original kept in the session; carried along unchanged.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
    pub cart_id: i64,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionUser>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its opaque token.
    pub fn create(&self, user: SessionUser) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), user);

        token
    }

    pub fn get(&self, token: &str) -> Option<SessionUser> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .cloned()
    }

    /// Remove a session. Idempotent; returns whether one was active.
    pub fn remove(&self, token: &str) -> bool {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token)
            .is_some()
    }
}
