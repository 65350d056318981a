use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{impl_model, AdditionalProperties, ExtraPerms, Maybe};

/// A resource as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListableResource {
    pub path: String,
    pub resource_type: String,
    pub is_oauth: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    /// Resource body; shape depends on `resource_type`.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub value: Maybe<Value>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub extra_perms: Maybe<ExtraPerms>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ListableResource {
    "path",
    "resource_type",
    "is_oauth",
    "workspace_id",
    "description",
    "value",
    "extra_perms",
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::assert_declared_fields;
    use crate::Model;
    use serde_json::json;

    #[test]
    fn null_value_is_kept_as_null() {
        let raw = json!({
            "path": "f/infra/pg",
            "resource_type": "postgresql",
            "is_oauth": false,
            "value": null
        });
        let resource = ListableResource::from_value(raw.clone()).unwrap();
        assert_eq!(resource.value, Maybe::Null);
        assert_eq!(resource.to_value().unwrap(), raw);
    }

    #[test]
    fn declared_fields_are_complete() {
        let resource = ListableResource::from_value(json!({
            "path": "f/infra/pg",
            "resource_type": "postgresql",
            "is_oauth": false,
            "workspace_id": "demo",
            "description": "primary db",
            "value": { "host": "db", "port": 5432 },
            "extra_perms": {}
        }))
        .unwrap();
        assert_declared_fields(&resource);
    }
}
