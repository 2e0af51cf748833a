//! Service layer for FinVault
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, derived values, and audit logging.

pub mod balance;
pub mod expense;
pub mod group;
pub mod password;

pub use balance::{compute_balances, MemberBalance};
pub use expense::{
    paginate, sort_by, ExpenseService, ExpenseView, NameTotal, Page, SortDirection, SortField,
};
pub use group::GroupService;
pub use password::{masked, PasswordService};
