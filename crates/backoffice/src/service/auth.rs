//! Mock authentication.

use chrono::Utc;

use super::validation::validate_credentials;
use super::{Latency, Operation, Result, ServiceError};
use crate::model::{AuthSession, AuthUser, Credentials, Role};

const DEMO_EMAIL: &str = "admin@example.com";
const DEMO_PASSWORD: &str = "password123";
const TOKEN_LIFETIME_SECS: u64 = 3600;

const ADMIN_PERMISSIONS: [&str; 5] = [
    "users:read",
    "users:write",
    "products:read",
    "products:write",
    "analytics:read",
];

/// Holds at most one signed-in session.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    latency: Latency,
    session: Option<AuthSession>,
}

impl AuthService {
    pub fn new(latency: Latency) -> Self {
        AuthService {
            latency,
            session: None,
        }
    }

    /// Signs in with the demo account.
    ///
    /// Malformed credentials fail validation before they are compared.
    pub fn login(&mut self, credentials: &Credentials) -> Result<AuthSession> {
        self.latency.wait(Operation::Login);

        if let Err(errors) = validate_credentials(credentials) {
            tracing::warn!(count = errors.len(), "login rejected by validation");
            return Err(ServiceError::Validation(errors));
        }
        if credentials.email != DEMO_EMAIL || credentials.password != DEMO_PASSWORD {
            tracing::warn!(email = %credentials.email, "invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        let millis = Utc::now().timestamp_millis();
        let session = AuthSession {
            user: AuthUser {
                id: "1".to_string(),
                name: "Admin User".to_string(),
                email: credentials.email.clone(),
                role: Role::Admin,
                avatar: None,
                permissions: ADMIN_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            },
            token: format!("mock-jwt-token-{}", millis),
            refresh_token: format!("mock-refresh-token-{}", millis),
            expires_in: TOKEN_LIFETIME_SECS,
        };
        tracing::debug!(user = %session.user.id, "logged in");
        self.session = Some(session.clone());
        Ok(session)
    }

    pub fn logout(&mut self) {
        self.latency.wait(Operation::Logout);
        if self.session.take().is_some() {
            tracing::debug!("logged out");
        }
    }

    pub fn current_session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// `false` when nobody is signed in.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.user.has_permission(permission))
    }

    pub fn refresh_token(&self) -> Result<AuthSession> {
        self.latency.wait(Operation::Session);
        Err(ServiceError::NotImplemented("refresh_token"))
    }

    pub fn current_user(&self) -> Result<AuthUser> {
        self.latency.wait(Operation::Session);
        Err(ServiceError::NotImplemented("current_user"))
    }
}
