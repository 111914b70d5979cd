//! Account domain entity and related types.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::DomainError;
use crate::fetch::Entity;

/// Account roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Stored value of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(DomainError::unknown_tag("role", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the store on first save
    pub id: Option<i32>,
    pub username: String,
    pub age: Option<i32>,
    /// Free-form long text
    pub description: Option<String>,
    pub role: Role,
    pub create_date: NaiveDate,
    pub update_date: NaiveDate,
}

impl Account {
    /// Create a transient account dated today
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        let today = Utc::now().date_naive();
        Self {
            id: None,
            username: username.into(),
            age: None,
            description: None,
            role,
            create_date: today,
            update_date: today,
        }
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the account as modified today
    pub fn touch(&mut self) {
        self.update_date = Utc::now().date_naive();
    }
}

impl Entity for Account {
    fn id(&self) -> Option<i32> {
        self.id
    }
}
