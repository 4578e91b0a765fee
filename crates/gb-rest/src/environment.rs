//! Environment types.

use serde::{Deserialize, Serialize};

/// A GrowthBook environment such as `production` or `staging`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub toggle_on_list: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub default_state: bool,
    /// Projects the environment is limited to; empty means all.
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
}
