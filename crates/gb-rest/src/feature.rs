//! Feature flag types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A GrowthBook feature flag.
///
/// `tags`, `prerequisites` and `environments` always serialize, as `[]` and
/// `{}` when empty; the API rejects `null` for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// `"boolean"`, `"string"`, `"number"` or `"json"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub tags: Vec<String>,
    /// Per-environment configuration, keyed by environment id.
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub environments: BTreeMap<String, FeatureEnvironmentConfig>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub prerequisites: Vec<String>,
}

/// Configuration of a feature within one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEnvironmentConfig {
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub rules: Vec<FeatureRule>,
}

/// A targeting rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub enabled: bool,
    /// `"force"`, `"rollout"` or `"experiment"`.
    #[serde(rename = "type", default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub rule_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub saved_group_targeting: Vec<FeatureSavedGroupTargeting>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<FeaturePrerequisite>,
}

/// Saved-group targeting on a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSavedGroupTargeting {
    /// `"all"`, `"any"` or `"none"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub saved_groups: Vec<String>,
}

/// A prerequisite feature and the condition it must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePrerequisite {
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub condition: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections_serialize() {
        let feature = Feature {
            id: Some("dark-mode".into()),
            value_type: Some("boolean".into()),
            default_value: Some("false".into()),
            ..Default::default()
        };

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["tags"], serde_json::json!([]));
        assert_eq!(value["prerequisites"], serde_json::json!([]));
        assert_eq!(value["environments"], serde_json::json!({}));
        assert_eq!(value["valueType"], "boolean");
        assert!(value.get("owner").is_none());
    }

    #[test]
    fn test_feature_deserialize_with_rules() {
        let json = r#"{
            "id": "checkout-v2",
            "archived": false,
            "valueType": "boolean",
            "defaultValue": "false",
            "tags": ["checkout"],
            "environments": {
                "production": {
                    "enabled": true,
                    "defaultValue": "false",
                    "rules": [{
                        "id": "fr_1",
                        "type": "force",
                        "enabled": true,
                        "condition": "{\"country\": \"US\"}",
                        "value": "true",
                        "savedGroupTargeting": [{"matchType": "all", "savedGroups": ["grp_1"]}],
                        "prerequisites": [{"id": "base-flag", "condition": "{\"value\": true}"}]
                    }]
                }
            },
            "prerequisites": []
        }"#;

        let feature: Feature = serde_json::from_str(json).unwrap();
        let production = &feature.environments["production"];
        assert!(production.enabled);

        let rule = &production.rules[0];
        assert_eq!(rule.rule_type, "force");
        assert_eq!(rule.saved_group_targeting[0].saved_groups, vec!["grp_1"]);
        assert_eq!(rule.prerequisites[0].id, "base-flag");
    }

    #[test]
    fn test_null_free_when_fields_absent() {
        let feature: Feature = serde_json::from_str(r#"{"id": "bare"}"#).unwrap();
        assert!(feature.tags.is_empty());
        assert!(feature.environments.is_empty());
        assert!(!feature.archived);
    }

    #[test]
    fn test_null_collections_default() {
        let json = r#"{
            "id": "nulls",
            "archived": null,
            "tags": null,
            "prerequisites": null,
            "environments": {
                "production": {
                    "enabled": null,
                    "rules": [{
                        "id": "fr_1",
                        "type": null,
                        "enabled": true,
                        "savedGroupTargeting": null,
                        "prerequisites": null
                    }]
                },
                "staging": {"enabled": true, "rules": null}
            }
        }"#;

        let feature: Feature = serde_json::from_str(json).unwrap();
        assert!(!feature.archived);
        assert!(feature.tags.is_empty());
        assert!(feature.prerequisites.is_empty());

        let production = &feature.environments["production"];
        assert!(!production.enabled);
        let rule = &production.rules[0];
        assert_eq!(rule.rule_type, "");
        assert!(rule.saved_group_targeting.is_empty());
        assert!(rule.prerequisites.is_empty());

        assert!(feature.environments["staging"].rules.is_empty());

        let feature: Feature = serde_json::from_str(r#"{"id": "x", "environments": null}"#).unwrap();
        assert!(feature.environments.is_empty());
    }

    #[test]
    fn test_feature_survives_envelope_decode() {
        let rule = FeatureRule {
            condition: Some(r#"{"country": "US"}"#.into()),
            description: Some("US only".into()),
            id: Some("fr_1".into()),
            enabled: true,
            rule_type: "rollout".into(),
            value: Some("true".into()),
            saved_group_targeting: vec![FeatureSavedGroupTargeting {
                match_type: Some("any".into()),
                saved_groups: vec!["grp_1".into(), "grp_2".into()],
            }],
            prerequisites: vec![FeaturePrerequisite {
                id: "base-flag".into(),
                condition: r#"{"value": true}"#.into(),
            }],
        };
        let feature = Feature {
            id: Some("checkout-v2".into()),
            archived: true,
            description: Some("New checkout".into()),
            owner: Some("payments".into()),
            project: Some("prj_abc".into()),
            value_type: Some("boolean".into()),
            default_value: Some("false".into()),
            tags: vec!["checkout".into()],
            environments: BTreeMap::from([(
                "production".to_string(),
                FeatureEnvironmentConfig {
                    enabled: true,
                    default_value: Some("false".into()),
                    definition: Some("{}".into()),
                    rules: vec![rule],
                },
            )]),
            prerequisites: vec!["base-flag".into()],
        };

        let envelope = serde_json::json!({ "feature": feature });
        let decoded: Feature =
            growthbook_client::decode_result_key(envelope.as_object().unwrap(), "feature").unwrap();
        assert_eq!(decoded, feature);
    }
}
