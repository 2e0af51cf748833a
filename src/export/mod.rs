//! Export module for FinVault
//!
//! Formats entity state for channels outside the application:
//! - CSV: finance tracker expenses for spreadsheets
//! - Share: group summary text and chat share link
//!
//! The password vault blob lives in `vault::codec`.

pub mod csv;
pub mod share;

pub use self::csv::export_expenses_csv;
pub use share::{encode_uri_component, share_summary, share_url, DEFAULT_SHARE_BASE_URL};
