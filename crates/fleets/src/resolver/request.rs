//! Typed requests: one struct per operation, checked before any table call.
//!
//! Only required-field presence is enforced; name format and uniqueness are not checked.

use serde::{Deserialize, Serialize};

use super::error::{ResolverError, ResolverResult};

/// `Mutation.addFleet(fleetName, tracks)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFleetRequest {
    pub fleet_name: String,
    #[serde(default)]
    pub tracks: Option<Vec<String>>,
}

/// `Mutation.deleteFleet(fleetId)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFleetRequest {
    pub fleet_id: String,
}

/// `Mutation.updateFleet(fleetId, fleetName, tracks)`
///
/// `tracks` is accepted but not applied to the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFleetRequest {
    pub fleet_id: String,
    pub fleet_name: String,
    #[serde(default)]
    pub tracks: Option<Vec<String>>,
}

impl AddFleetRequest {
    pub fn validate(&self) -> ResolverResult<()> {
        require("fleetName", &self.fleet_name)
    }
}

impl DeleteFleetRequest {
    pub fn validate(&self) -> ResolverResult<()> {
        require("fleetId", &self.fleet_id)
    }
}

impl UpdateFleetRequest {
    pub fn validate(&self) -> ResolverResult<()> {
        require("fleetId", &self.fleet_id)?;
        require("fleetName", &self.fleet_name)
    }
}

fn require(field: &str, value: &str) -> ResolverResult<()> {
    if value.trim().is_empty() {
        return Err(ResolverError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_from_arguments() {
        let req: AddFleetRequest =
            serde_json::from_value(serde_json::json!({ "fleetName": "Cars" })).unwrap();
        assert_eq!(req.fleet_name, "Cars");
        assert!(req.tracks.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_add_request_null_tracks() {
        let req: AddFleetRequest =
            serde_json::from_value(serde_json::json!({ "fleetName": "Cars", "tracks": null }))
                .unwrap();
        assert!(req.tracks.is_none());
    }

    #[test]
    fn test_blank_name_rejected() {
        let req = AddFleetRequest {
            fleet_name: "   ".to_string(),
            tracks: None,
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err, ResolverError::Validation("fleetName is required".to_string()));
    }

    #[test]
    fn test_update_requires_both_fields() {
        let req = UpdateFleetRequest {
            fleet_id: String::new(),
            fleet_name: "x".to_string(),
            tracks: None,
        };
        assert!(req.validate().unwrap_err().to_string().contains("fleetId"));

        let req = UpdateFleetRequest {
            fleet_id: "f-1".to_string(),
            fleet_name: String::new(),
            tracks: None,
        };
        assert!(req.validate().unwrap_err().to_string().contains("fleetName"));
    }

    #[test]
    fn test_name_format_not_checked() {
        let req = AddFleetRequest {
            fleet_name: "🚗 fleet #1 / *".to_string(),
            tracks: Some(vec![String::new()]),
        };
        assert!(req.validate().is_ok());
    }
}
