//! Password vault helpers
//!
//! Pure functions used by the password manager: random generation, the
//! strength heuristic, and the export/import blob. None of this encrypts
//! anything.

pub mod codec;
pub mod generator;
pub mod strength;

pub use codec::{export_vault, import_vault};
pub use generator::{generate_password, generate_password_with, ALPHABET, DEFAULT_PASSWORD_LENGTH};
pub use strength::{score_strength, StrengthLevel, MAX_STRENGTH};
