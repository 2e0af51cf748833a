//! Password entry model
//!
//! Entries hold the password in plaintext. Nothing in this crate encrypts
//! them; the vault export is base64 obfuscation only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::PasswordId;

/// Placeholder shown instead of a hidden password
pub const MASK: &str = "••••••";

/// Category of a stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PasswordCategory {
    Email,
    Social,
    Shopping,
    Banking,
    Other,
}

impl PasswordCategory {
    pub fn all() -> &'static [PasswordCategory] {
        &[
            Self::Email,
            Self::Social,
            Self::Shopping,
            Self::Banking,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Social => "Social",
            Self::Shopping => "Shopping",
            Self::Banking => "Banking",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PasswordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PasswordCategory {
    type Err = PasswordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PasswordValidationError::UnknownCategory(wanted.to_string()))
    }
}

/// A stored credential
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordEntry {
    pub id: PasswordId,
    pub site: String,
    pub username: String,
    pub password: String,
    pub category: PasswordCategory,
}

impl PasswordEntry {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        category: PasswordCategory,
    ) -> Self {
        Self {
            id: PasswordId::new(),
            site: site.into(),
            username: username.into(),
            password: password.into(),
            category,
        }
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<(), PasswordValidationError> {
        if self.site.trim().is_empty() {
            return Err(PasswordValidationError::Missing("site"));
        }
        if self.username.trim().is_empty() {
            return Err(PasswordValidationError::Missing("username"));
        }
        if self.password.is_empty() {
            return Err(PasswordValidationError::Missing("password"));
        }
        Ok(())
    }

    /// Case-insensitive match on site, username or category
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.site.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
            || self.category.as_str().to_lowercase().contains(&query)
    }

    /// Copy with the password replaced by the mask
    pub fn redacted(&self) -> Self {
        Self {
            password: MASK.to_string(),
            ..self.clone()
        }
    }
}

// Keep plaintext out of debug output
impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEntry")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("category", &self.category)
            .finish()
    }
}

/// Validation errors for password entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    Missing(&'static str),
    UnknownCategory(String),
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "Password entry {} is required", field),
            Self::UnknownCategory(c) => write!(
                f,
                "Unknown category '{}' (expected Email, Social, Shopping, Banking or Other)",
                c
            ),
        }
    }
}

impl std::error::Error for PasswordValidationError {}
