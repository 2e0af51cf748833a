//! Configuration module for FinVault
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinVaultPaths;
pub use settings::Settings;
