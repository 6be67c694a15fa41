/*!
# Column Roles

Phone, template-title and message columns are found by header name rather
than position. Resolution happens once per table and yields a small typed
mapping that every downstream stage consumes.

Matching is case-insensitive: an exact header match wins over a substring
match, and earlier names in a role's list win over later ones. When several
headers match equally, the leftmost one is used.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Header names the upload gate requires, in canonical spelling
pub const REQUIRED_HEADERS: &[&str] = &["phone", "template_title", "reply_message_text"];

/// The semantic role a column plays in a contact list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Phone,
    TemplateTitle,
    Message,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [
        ColumnRole::Phone,
        ColumnRole::TemplateTitle,
        ColumnRole::Message,
    ];

    /// Canonical header name, as required by the upload gate
    pub fn canonical_name(self) -> &'static str {
        match self {
            ColumnRole::Phone => "phone",
            ColumnRole::TemplateTitle => "template_title",
            ColumnRole::Message => "reply_message_text",
        }
    }

    /// Accepted header names in priority order, canonical name first
    ///
    /// The Portuguese spellings show up in hand-made exports from the CRM.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            ColumnRole::Phone => &["phone", "telefone", "celular"],
            ColumnRole::TemplateTitle => &["template_title", "template"],
            ColumnRole::Message => &["reply_message_text", "message", "mensagem"],
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Resolved column positions for one header row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub phone: Option<usize>,
    pub template: Option<usize>,
    pub message: Option<usize>,
}

impl ColumnRoles {
    pub fn resolve(headers: &[String]) -> Self {
        Self {
            phone: find_column(headers, ColumnRole::Phone.names()),
            template: find_column(headers, ColumnRole::TemplateTitle.names()),
            message: find_column(headers, ColumnRole::Message.names()),
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Phone => self.phone,
            ColumnRole::TemplateTitle => self.template,
            ColumnRole::Message => self.message,
        }
    }

    /// Resolved positions in phone, template, message order, skipping gaps
    pub fn resolved(&self) -> Vec<usize> {
        ColumnRole::ALL
            .iter()
            .filter_map(|role| self.get(*role))
            .collect()
    }
}

/// Find the column for any of `names`: exact matches first, then substrings
pub fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    names
        .iter()
        .find_map(|name| lowered.iter().position(|h| h == name))
        .or_else(|| {
            names
                .iter()
                .find_map(|name| lowered.iter().position(|h| h.contains(name)))
        })
}
