//! SDK connection types.

use serde::{Deserialize, Serialize};

/// A GrowthBook SDK connection.
///
/// Fields from `organization` on are computed by the server and ignored on
/// create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub environment: String,

    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub encrypt_payload: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub include_visual_experiments: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub include_draft_experiments: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub include_experiment_names: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub include_redirect_experiments: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub include_rule_ids: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub proxy_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub hash_secure_attributes: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub remote_eval_enabled: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub saved_group_references_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,
    /// Client key used by SDKs to fetch features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_signing_key: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default", skip_serializing_if = "std::ops::Not::not")]
    pub sse_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
}

impl SdkConnection {
    /// Make `language` reflect the effective language.
    ///
    /// The server reports languages as a list; the first entry wins.
    pub fn normalize(&mut self) {
        if let Some(first) = self.languages.first() {
            self.language = first.clone();
        }
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}
