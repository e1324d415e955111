//! Form descriptor exposed to the host's resource configuration UI.
//!
//! The host renders the parameter and credential schemas as a form and hands
//! the filled-in values back to [`to_resource`], which assembles the
//! descriptor. The canonical parameter shape is a single endpoint URL plus the
//! collection name:
//!
//! `url = "{endpoint without trailing /}/collection/{collection}"`

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::descriptor::{ResourceDescriptor, DSVAULT_FORMAT};
use crate::error::ConfigurationError;

pub const CATEGORY_NAME: &str = "dsvault";
pub const RESOURCE_TYPE_NAME: &str = "dsvault-collection";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormCategory {
    pub name: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormType {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// JSON schema of the connection parameters
    pub parameters: JsonValue,
    /// JSON schema of the credentials
    pub credentials: JsonValue,
}

/// Everything the host needs to offer vault collections as a resource type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceForms {
    pub categories: Vec<FormCategory>,
    pub types: Vec<FormType>,
}

/// A descriptor together with the name the operator gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: ResourceDescriptor,
}

pub fn resource_forms() -> ResourceForms {
    ResourceForms {
        categories: vec![FormCategory {
            name: CATEGORY_NAME.to_string(),
            title: "DS Vault".to_string(),
            description: "Data objects stored in a DS Vault collection.".to_string(),
        }],
        types: vec![FormType {
            name: RESOURCE_TYPE_NAME.to_string(),
            title: "DS Vault collection".to_string(),
            description: "Objects of one vault collection, accessed with the collection API key."
                .to_string(),
            tags: vec![CATEGORY_NAME.to_string()],
            parameters: json!({
                "type": "object",
                "properties": {
                    "endpoint": {
                        "type": "string",
                        "format": "uri",
                        "title": "Endpoint",
                        "description": "Vault base URL, e.g. https://vault.example.org:8000"
                    },
                    "collection": {
                        "type": "string",
                        "title": "Collection",
                        "description": "Name of the collection"
                    }
                },
                "required": ["endpoint", "collection"]
            }),
            credentials: json!({
                "type": "object",
                "properties": {
                    "apikey": {
                        "type": "string",
                        "format": "password",
                        "title": "API key",
                        "description": "Collection access key"
                    }
                },
                "required": ["apikey"]
            }),
        }],
    }
}

fn required_str<'a>(
    values: &'a JsonValue,
    field: &'static str,
) -> Result<&'a str, ConfigurationError> {
    values
        .get(field)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ConfigurationError::MissingField(field))
}

/// Assemble a descriptor from form values.
pub fn to_resource(
    type_name: &str,
    name: &str,
    params: &JsonValue,
    credentials: &JsonValue,
) -> Result<NamedResource, ConfigurationError> {
    if type_name != RESOURCE_TYPE_NAME {
        return Err(ConfigurationError::UnknownResourceType(type_name.to_string()));
    }

    let endpoint = required_str(params, "endpoint")?.trim_end_matches('/');
    let collection = required_str(params, "collection")?;
    let apikey = required_str(credentials, "apikey")?;

    Ok(NamedResource {
        name: name.to_string(),
        descriptor: ResourceDescriptor::new(
            format!("{}/collection/{}", endpoint, collection),
            DSVAULT_FORMAT,
            collection,
            apikey,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::CollectionLocation;

    #[test]
    fn test_forms_declare_one_type() {
        let forms = resource_forms();
        assert_eq!(forms.categories.len(), 1);
        assert_eq!(forms.types.len(), 1);

        let t = &forms.types[0];
        assert_eq!(t.name, RESOURCE_TYPE_NAME);
        assert_eq!(t.parameters["required"], json!(["endpoint", "collection"]));
        assert_eq!(t.credentials["required"], json!(["apikey"]));
    }

    #[test]
    fn test_forms_serialize() {
        let value = serde_json::to_value(resource_forms()).unwrap();
        assert_eq!(value["categories"][0]["name"], "dsvault");
        assert_eq!(
            value["types"][0]["credentials"]["properties"]["apikey"]["format"],
            "password"
        );
    }

    #[test]
    fn test_to_resource_assembles_url() {
        let resource = to_resource(
            RESOURCE_TYPE_NAME,
            "study1",
            &json!({"endpoint": "http://h:8000/", "collection": "c1"}),
            &json!({"apikey": "k"}),
        )
        .unwrap();

        assert_eq!(resource.name, "study1");
        assert_eq!(resource.descriptor.url, "http://h:8000/collection/c1");
        assert!(resource.descriptor.has_vault_format());
        assert_eq!(resource.descriptor.identity.as_deref(), Some("c1"));
        assert_eq!(resource.descriptor.secret.as_deref(), Some("k"));

        let location = CollectionLocation::try_from(&resource.descriptor).unwrap();
        assert_eq!(location.endpoint, "http://h:8000");
    }

    #[test]
    fn test_to_resource_rejects_unknown_type() {
        let err = to_resource("s3-bucket", "x", &json!({}), &json!({})).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownResourceType("s3-bucket".to_string())
        );
    }

    #[test]
    fn test_to_resource_requires_fields() {
        let err = to_resource(
            RESOURCE_TYPE_NAME,
            "x",
            &json!({"endpoint": "http://h"}),
            &json!({"apikey": "k"}),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingField("collection"));

        let err = to_resource(
            RESOURCE_TYPE_NAME,
            "x",
            &json!({"endpoint": "http://h", "collection": "c1"}),
            &json!({"apikey": ""}),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingField("apikey"));
    }

    #[test]
    fn test_named_resource_serializes_flat() {
        let resource = to_resource(
            RESOURCE_TYPE_NAME,
            "study1",
            &json!({"endpoint": "http://h", "collection": "c1"}),
            &json!({"apikey": "k"}),
        )
        .unwrap();
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["name"], "study1");
        assert_eq!(value["format"], DSVAULT_FORMAT);
    }
}
