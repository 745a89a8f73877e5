//! Mock back-end services.
//!
//! Each service owns its data and answers the same calls the dashboard
//! screens make: list, get, create, update, delete, plus login and the
//! analytics figures. Calls wait for a simulated network latency first,
//! scaled by [`Latency`], so a scale of zero makes them instant.

pub mod analytics;
pub mod auth;
pub mod products;
pub mod users;
pub mod validation;

use std::fmt;
use std::thread;
use std::time::Duration;

use backoffice_query::ConfigurationError;
use thiserror::Error;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use products::ProductService;
pub use users::UserService;
pub use validation::ValidationError;

/// Errors returned by service operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A unique field already holds the submitted value.
    #[error("{0}")]
    Conflict(String),

    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Query(#[from] ConfigurationError),
}

impl ServiceError {
    /// The field errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ServiceError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// A service call with its own simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Session,
    Categories,
    Dashboard,
    Monthly,
    Revenue,
    Growth,
    TopPages,
    Traffic,
    Funnel,
    Tiles,
    Realtime,
    Export,
}

impl Operation {
    /// Unscaled latency in milliseconds.
    pub fn base_millis(self) -> u64 {
        match self {
            Operation::List | Operation::Update => 800,
            Operation::Get | Operation::Logout | Operation::Session => 500,
            Operation::Create | Operation::Login | Operation::Monthly => 1000,
            Operation::Delete | Operation::Revenue | Operation::Growth | Operation::Tiles => 600,
            Operation::Categories | Operation::Realtime => 300,
            Operation::Dashboard => 800,
            Operation::TopPages | Operation::Traffic => 500,
            Operation::Funnel => 700,
            Operation::Export => 2000,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Simulated latency, as a multiple of each operation's base delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    scale: f64,
}

impl Default for Latency {
    fn default() -> Self {
        Latency::new(1.0)
    }
}

impl Latency {
    /// Negative and non-finite scales count as zero.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Latency { scale }
    }

    pub fn none() -> Self {
        Latency { scale: 0.0 }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn delay(&self, op: Operation) -> Duration {
        Duration::try_from_secs_f64(op.base_millis() as f64 * self.scale / 1000.0)
            .unwrap_or(Duration::MAX)
    }

    /// Blocks the current thread for the operation's delay.
    pub fn wait(&self, op: Operation) {
        let delay = self.delay(op);
        if !delay.is_zero() {
            tracing::trace!(operation = %op, ?delay, "simulating latency");
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_scales_base_delay() {
        assert_eq!(Latency::default().delay(Operation::Login), Duration::from_millis(1000));
        assert_eq!(Latency::new(0.5).delay(Operation::List), Duration::from_millis(400));
        assert!(Latency::none().delay(Operation::Export).is_zero());
    }

    #[test]
    fn bad_scales_are_zero() {
        assert_eq!(Latency::new(-2.0).scale(), 0.0);
        assert_eq!(Latency::new(f64::NAN).scale(), 0.0);
        assert_eq!(Latency::new(f64::INFINITY).scale(), 0.0);
    }

    #[test]
    fn error_messages() {
        let err = ServiceError::NotFound {
            kind: "User",
            id: "9".into(),
        };
        assert_eq!(err.to_string(), "User not found");

        let err = ServiceError::Validation(vec![
            ValidationError::new("email", "Email is required"),
            ValidationError::new("password", "Password must be at least 6 characters"),
        ]);
        assert_eq!(
            err.to_string(),
            "Email is required; Password must be at least 6 characters"
        );
        assert_eq!(err.validation_errors().len(), 2);

        let err: ServiceError = ConfigurationError::NonPositivePageSize.into();
        assert_eq!(err.to_string(), "page size must be greater than zero");
    }
}
