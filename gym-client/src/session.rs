//! Application context
//!
//! Session and preference state a front end keeps for the lifetime of the
//! app. It is owned by whoever drives the UI and passed down explicitly.

use crate::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use shared::client::{LoginResponse, UserInfo};
use tracing::info;

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Preferences that outlive a session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
}

/// Authenticated operator, if any
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserInfo>,
}

impl Session {
    pub fn sign_in(&mut self, login: LoginResponse) {
        info!(user_id = login.user.id, role = %login.user.role, "Signed in");
        self.token = Some(login.token);
        self.user = Some(login.user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = user.id, "Signed out");
        }
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Authorization guard for `action` (e.g. `sales:checkout`)
    pub fn require(&self, action: &str) -> ClientResult<()> {
        let user = self.user.as_ref().ok_or(ClientError::Unauthorized)?;
        if user.can(action) {
            Ok(())
        } else {
            Err(ClientError::Forbidden(format!(
                "{} ({}) may not {}",
                user.name, user.role, action
            )))
        }
    }
}

/// Everything a front end shares between screens
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub session: Session,
    pub preferences: Preferences,
}

impl AppContext {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            session: Session::default(),
            preferences,
        }
    }
}
