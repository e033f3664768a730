//! Explicit session context.
//!
//! The authenticated identity and role are resolved once at startup and passed
//! to whatever needs them.

use crate::error::{JswpError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Talent,
    Company,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::Talent => "talent",
            UserRole::Company => "company",
            UserRole::Admin => "admin",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: String,
    pub role: UserRole,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Fails unless the session holds `role`.
    pub fn require_role(&self, role: UserRole) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(JswpError::AccessDenied(format!(
                "this view requires a {} account, signed in as {} ({})",
                role, self.user_id, self.role
            )))
        }
    }
}
