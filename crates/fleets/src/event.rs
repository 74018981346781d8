//! Event: the document AppSync sends a direct Lambda resolver.
//!
//! Only `info` and `arguments` drive dispatch; the rest is carried so it
//! can be logged or inspected without re-parsing the payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header AppSync forwards with the X-Ray trace id of the request.
pub const CORRELATION_HEADER: &str = "x-amzn-trace-id";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverEvent {
    /// Named field arguments; `null` for fields that take none.
    #[serde(default)]
    pub arguments: Value,
    #[serde(default)]
    pub identity: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub request: Option<RequestContext>,
    pub info: ResolverInfo,
    #[serde(default)]
    pub prev: Option<Value>,
    #[serde(default)]
    pub stash: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub domain_name: Option<String>,
}

/// Which field of which type is being resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverInfo {
    pub parent_type_name: String,
    pub field_name: String,
    #[serde(default)]
    pub selection_set_list: Vec<String>,
    #[serde(default)]
    pub variables: Value,
}

impl ResolverEvent {
    /// Build a minimal event, as the gateway would for `type_name.field_name(arguments)`.
    pub fn new(type_name: &str, field_name: &str, arguments: Value) -> Self {
        Self {
            arguments,
            identity: None,
            source: None,
            request: None,
            info: ResolverInfo {
                parent_type_name: type_name.to_string(),
                field_name: field_name.to_string(),
                selection_set_list: Vec::new(),
                variables: Value::Null,
            },
            prev: None,
            stash: None,
        }
    }

    /// Trace id forwarded by the gateway, used to correlate log lines.
    pub fn correlation_id(&self) -> Option<&str> {
        self.request
            .as_ref()?
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(CORRELATION_HEADER))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_appsync_payload() {
        let payload = serde_json::json!({
            "arguments": { "fleetName": "Cars" },
            "identity": { "sub": "user-1", "username": "admin" },
            "source": null,
            "request": {
                "headers": { "x-amzn-trace-id": "Root=1-abc", "host": "api.example.com" },
                "domainName": null
            },
            "prev": null,
            "info": {
                "selectionSetList": ["fleetId", "fleetName", "createdAt"],
                "selectionSetGraphQL": "{ fleetId fleetName createdAt }",
                "parentTypeName": "Mutation",
                "fieldName": "addFleet",
                "variables": {}
            },
            "stash": {}
        });

        let event: ResolverEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.info.parent_type_name, "Mutation");
        assert_eq!(event.info.field_name, "addFleet");
        assert_eq!(event.info.selection_set_list.len(), 3);
        assert_eq!(event.arguments["fleetName"], "Cars");
        assert_eq!(event.correlation_id(), Some("Root=1-abc"));
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let payload = serde_json::json!({
            "info": { "parentTypeName": "Query", "fieldName": "getAllFleets" }
        });
        let event: ResolverEvent = serde_json::from_value(payload).unwrap();
        assert!(event.arguments.is_null());
        assert!(event.correlation_id().is_none());
    }

    #[test]
    fn test_correlation_header_case_insensitive() {
        let mut event = ResolverEvent::new("Query", "getAllFleets", Value::Null);
        event.request = Some(RequestContext {
            headers: HashMap::from([("X-Amzn-Trace-Id".to_string(), "Root=1-def".to_string())]),
            domain_name: None,
        });
        assert_eq!(event.correlation_id(), Some("Root=1-def"));
    }
}
