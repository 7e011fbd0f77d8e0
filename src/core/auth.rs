//! Session-based authentication
//!
//! Authentication is owned by the managed backend. The console only needs
//! the current session and the ability to sign in and out, expressed by
//! [`AuthProvider`].

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Session {
    /// Check if the session belongs to an administrator
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Sign-up form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Authentication operations offered by the backend
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current session, if any
    async fn current_user(&self) -> Result<Option<Session>>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Create an account and sign it in
    async fn sign_up(&self, form: SignUp) -> Result<Session>;

    /// End the current session
    async fn sign_out(&self) -> Result<()>;
}

/// Authorization policy for console operations
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Any signed-in user
    Authenticated,

    /// Admin only
    AdminOnly,
}

impl AuthPolicy {
    /// Check if a session satisfies this policy
    pub fn check(&self, session: Option<&Session>) -> bool {
        match self {
            AuthPolicy::Authenticated => session.is_some(),
            AuthPolicy::AdminOnly => session.is_some_and(Session::is_admin),
        }
    }
}
