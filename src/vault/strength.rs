//! Password strength heuristic

use std::fmt;

/// Highest possible score
pub const MAX_STRENGTH: u8 = 5;

/// Score a password from 0 to 5
///
/// One point each for: at least 8 characters, an ASCII uppercase letter, an
/// ASCII lowercase letter, a digit, and any character outside `[A-Za-z0-9]`.
pub fn score_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];

    checks.iter().filter(|passed| **passed).count() as u8
}

/// Coarse label for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Weak,
            3..=4 => Self::Medium,
            _ => Self::Strong,
        }
    }

    pub fn of(password: &str) -> Self {
        Self::from_score(score_strength(password))
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "Weak"),
            Self::Medium => write!(f, "Medium"),
            Self::Strong => write!(f, "Strong"),
        }
    }
}
