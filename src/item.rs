//! Result items handed to the host launcher.
//!
//! Items are produced by the query handler and consumed immediately by the
//! host, which renders them and wires up the copy / context-menu actions.

use serde::{Deserialize, Serialize};

/// A single selectable result row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub title: String,
    pub subtitle: String,
    /// Icon reference resolved by the host.
    pub icon: String,
    /// Text placed on the clipboard when the row is copied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_text: Option<String>,
    /// Attached to conversion rows; echoed back on context-menu activation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextPayload>,
}

impl DisplayItem {
    /// A plain informational row with no copy action.
    pub fn message(title: impl Into<String>, subtitle: impl Into<String>, icon: &str) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon: icon.to_string(),
            copy_text: None,
            context: None,
        }
    }
}

/// Everything needed to re-offer copy actions for a past conversion.
///
/// Amounts are carried as displayed; nothing is recomputed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPayload {
    /// Amount as the user typed it.
    pub amount: String,
    /// Converted amount, already formatted.
    pub converted: String,
    /// Upper-case source code.
    pub source: String,
    /// Upper-case destination code.
    pub dest: String,
}
