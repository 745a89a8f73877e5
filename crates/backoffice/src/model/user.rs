//! User accounts.

use std::fmt;
use std::str::FromStr;

use backoffice_macros::Record;
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Moderator];
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_ref() == s)
            .ok_or_else(|| "Please select a valid role".to_string())
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl AsRef<str> for UserStatus {
    fn as_ref(&self) -> &str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A back-office user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct User {
    #[record(id)]
    pub id: String,

    #[record(text, search, sort)]
    pub name: String,

    #[record(text, search, sort)]
    pub email: String,

    #[record(text, filter)]
    pub role: Role,

    #[record(text, filter)]
    pub status: UserStatus,

    #[record(date, sort)]
    pub created_at: DateTime<Utc>,

    #[record(date)]
    pub updated_at: DateTime<Utc>,

    #[record(date, sort)]
    pub last_login: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

/// Partial update for a user; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.status.is_none()
    }

    /// Applies the present fields to `user`, bumping `updated_at`.
    pub fn apply(&self, user: &User, now: DateTime<Utc>) -> User {
        User {
            name: self.name.clone().unwrap_or_else(|| user.name.clone()),
            email: self.email.clone().unwrap_or_else(|| user.email.clone()),
            role: self.role.unwrap_or(user.role),
            status: self.status.unwrap_or(user.status),
            updated_at: now,
            ..user.clone()
        }
    }
}

pub(crate) fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// The accounts every fresh user store starts with.
pub fn seed_users() -> Vec<User> {
    let user = |id: &str,
                name: &str,
                email: &str,
                role: Role,
                status: UserStatus,
                dates: (u32, u32, u32)| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        created_at: day(2024, 1, dates.0),
        updated_at: day(2024, 1, dates.1),
        last_login: Some(day(2024, 1, dates.2)),
        avatar: None,
    };

    vec![
        user("1", "John Doe", "john.doe@example.com", Role::Admin, UserStatus::Active, (15, 15, 20)),
        user("2", "Jane Smith", "jane.smith@example.com", Role::User, UserStatus::Active, (10, 18, 19)),
        user("3", "Mike Johnson", "mike.johnson@example.com", Role::Moderator, UserStatus::Inactive, (5, 16, 17)),
        user("4", "Sarah Wilson", "sarah.wilson@example.com", Role::User, UserStatus::Active, (12, 19, 20)),
        user("5", "David Brown", "david.brown@example.com", Role::User, UserStatus::Suspended, (8, 14, 15)),
    ]
}

/// Id handed to the first user created after seeding.
pub const NEXT_USER_ID: u64 = 6;
