//! Expense-sharing group model
//!
//! A group owns its members and the expenses shared among them. Members carry
//! their own identifier so that two people with the same display name stay
//! separate ledger entries, and each expense points at its payer by that
//! identifier rather than by name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupExpenseId, GroupId, MemberId};

/// A named collection of members and shared expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Optional avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Members in the order they were added
    #[serde(default)]
    pub members: Vec<Member>,

    /// Shared expenses in insertion order
    #[serde(default)]
    pub expenses: Vec<GroupExpense>,

    /// When the group was created
    pub created_at: DateTime<Utc>,

    /// When the group was last modified
    pub updated_at: DateTime<Utc>,
}

/// A participant in a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// An expense paid by one member and split evenly across the group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupExpense {
    pub id: GroupExpenseId,
    pub description: String,
    pub amount: f64,
    pub paid_by: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create an empty group
    pub fn new(name: impl Into<String>, avatar: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: GroupId::new(),
            name: name.into(),
            avatar: normalize_avatar(avatar),
            members: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace name and avatar
    pub fn rename(&mut self, name: impl Into<String>, avatar: Option<String>) {
        self.name = name.into();
        self.avatar = normalize_avatar(avatar);
        self.updated_at = Utc::now();
    }

    /// Append a member and return its new identifier
    pub fn push_member(&mut self, name: impl Into<String>) -> MemberId {
        let member = Member::new(name);
        let id = member.id;
        self.members.push(member);
        self.updated_at = Utc::now();
        id
    }

    /// Append an expense; the payer must already be a member
    pub fn push_expense(&mut self, expense: GroupExpense) -> Result<(), GroupValidationError> {
        if self.member(expense.paid_by).is_none() {
            return Err(GroupValidationError::UnknownPayer(expense.paid_by));
        }
        self.expenses.push(expense);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Look up a member by identifier
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Display name of a member, or the short id if the member is gone
    pub fn member_name(&self, id: MemberId) -> String {
        self.member(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Members whose display name matches, case-insensitively
    pub fn members_named(&self, name: &str) -> Vec<&Member> {
        let wanted = name.trim().to_lowercase();
        self.members
            .iter()
            .filter(|m| m.name.trim().to_lowercase() == wanted)
            .collect()
    }

    /// Whether any expense in this group was paid by the member
    pub fn has_paid(&self, id: MemberId) -> bool {
        self.expenses.iter().any(|e| e.paid_by == id)
    }

    /// Sum of all expense amounts
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }
        for expense in &self.expenses {
            expense.validate()?;
            if self.member(expense.paid_by).is_none() {
                return Err(GroupValidationError::UnknownPayer(expense.paid_by));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
        }
    }
}

impl GroupExpense {
    /// Create a new group expense
    pub fn new(description: impl Into<String>, amount: f64, paid_by: MemberId) -> Self {
        Self {
            id: GroupExpenseId::new(),
            description: description.into(),
            amount,
            paid_by,
            created_at: Utc::now(),
        }
    }

    /// Validate description and amount
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.description.trim().is_empty() {
            return Err(GroupValidationError::EmptyDescription);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(GroupValidationError::InvalidAmount(self.amount));
        }
        Ok(())
    }
}

fn normalize_avatar(avatar: Option<String>) -> Option<String> {
    avatar
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

/// Validation errors for groups and their expenses
#[derive(Debug, Clone, PartialEq)]
pub enum GroupValidationError {
    EmptyName,
    EmptyDescription,
    InvalidAmount(f64),
    UnknownPayer(MemberId),
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name cannot be empty"),
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::InvalidAmount(a) => write!(f, "Expense amount must be positive (got {})", a),
            Self::UnknownPayer(id) => write!(f, "Payer {} is not a member of this group", id),
        }
    }
}

impl std::error::Error for GroupValidationError {}
