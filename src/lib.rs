//! FinVault - expense sharing, expense tracking and password storage
//!
//! This library provides the core functionality for the FinVault
//! application: groups that split shared expenses evenly between members,
//! a flat personal expense tracker, and a small password manager.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (groups, expenses, password entries)
//! - `storage`: Ordered repositories over a JSON record store
//! - `services`: Business logic layer, including balance calculation
//! - `audit`: Audit logging system
//! - `vault`: Password generation, strength scoring and the vault blob
//! - `export`: CSV export and share text
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `finvault` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finvault::config::paths::FinVaultPaths;
//! use finvault::services::GroupService;
//! use finvault::storage::Storage;
//!
//! let mut storage = Storage::new(FinVaultPaths::new()?)?;
//! storage.load_all()?;
//!
//! let groups = GroupService::new(&storage);
//! let trip = groups.create_group("Trip", None)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod vault;

pub use error::{FinVaultError, FinVaultResult};
