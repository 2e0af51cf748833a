//! Group share text
//!
//! Builds the plain-text group summary and the chat share link that carries
//! it. Opening the link is left to the caller.

use crate::models::{format_plain, Group};

/// Share endpoint used when settings don't name another
pub const DEFAULT_SHARE_BASE_URL: &str = "https://wa.me/";

/// Render a group as share text
///
/// ```text
/// Group: Roommates
/// Members: Alice, Bob
/// Expenses:
/// - Pizza: $20 (Paid by Alice)
/// - Utilities: $40 (Paid by Bob)
/// ```
///
/// Expenses appear in insertion order. A group without expenses ends with
/// `Expenses:` and a newline.
pub fn share_summary(group: &Group) -> String {
    let members: Vec<&str> = group.members.iter().map(|m| m.name.as_str()).collect();

    let expenses: Vec<String> = group
        .expenses
        .iter()
        .map(|e| {
            format!(
                "- {}: ${} (Paid by {})",
                e.description,
                format_plain(e.amount),
                group.member_name(e.paid_by)
            )
        })
        .collect();

    format!(
        "Group: {}\nMembers: {}\nExpenses:\n{}",
        group.name,
        members.join(", "),
        expenses.join("\n")
    )
}

/// Link that opens a chat pre-filled with `text`
pub fn share_url(base_url: &str, text: &str) -> String {
    format!("{}?text={}", base_url, encode_uri_component(text))
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
