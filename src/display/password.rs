//! Password display formatting
//!
//! List views never show the stored password; it is replaced by the mask.

use crate::models::PasswordEntry;
use crate::services::masked;
use crate::vault::{StrengthLevel, MAX_STRENGTH};

/// Format entries as a table with masked passwords
pub fn format_password_list(entries: &[PasswordEntry]) -> String {
    if entries.is_empty() {
        return "No passwords found.".to_string();
    }

    let site_width = entries
        .iter()
        .map(|e| e.site.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let user_width = entries
        .iter()
        .map(|e| e.username.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<site_width$}  {:<user_width$}  {:<8}  {}\n",
        "ID",
        "Site",
        "Username",
        "Password",
        "Category",
        site_width = site_width,
        user_width = user_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<site_width$}  {:-<user_width$}  {:-<8}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        site_width = site_width,
        user_width = user_width,
    ));

    for entry in entries.iter().map(masked) {
        output.push_str(&format!(
            "{:<12}  {:<site_width$}  {:<user_width$}  {:<8}  {}\n",
            entry.id.to_string(),
            entry.site,
            entry.username,
            entry.password,
            entry.category,
            site_width = site_width,
            user_width = user_width,
        ));
    }

    output
}

/// Score bar such as `[###--] 3/5 Medium`
pub fn format_strength(score: u8) -> String {
    let filled = score.min(MAX_STRENGTH) as usize;
    format!(
        "[{}{}] {}/{} {}",
        "#".repeat(filled),
        "-".repeat(MAX_STRENGTH as usize - filled),
        score,
        MAX_STRENGTH,
        StrengthLevel::from_score(score)
    )
}
