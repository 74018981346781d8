//! Dispatch: route an AppSync event to the matching fleet operation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::event::ResolverEvent;
use super::error::{ResolverError, ResolverResult};
use super::fleet::FleetResolver;
use super::request::{AddFleetRequest, DeleteFleetRequest, UpdateFleetRequest};

/// A resolvable field, with its arguments already typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetAllFleets,
    AddFleet(AddFleetRequest),
    DeleteFleet(DeleteFleetRequest),
    UpdateFleet(UpdateFleetRequest),
}

impl Operation {
    /// Match `(parentTypeName, fieldName)` and decode `arguments`.
    pub fn from_event(event: &ResolverEvent) -> ResolverResult<Self> {
        let type_name = event.info.parent_type_name.as_str();
        let field_name = event.info.field_name.as_str();

        match (type_name, field_name) {
            ("Query", "getAllFleets") => Ok(Operation::GetAllFleets),
            ("Mutation", "addFleet") => decode(event).map(Operation::AddFleet),
            ("Mutation", "deleteFleet") => decode(event).map(Operation::DeleteFleet),
            ("Mutation", "updateFleet") => decode(event).map(Operation::UpdateFleet),
            _ => Err(ResolverError::Validation(format!(
                "No resolver registered for {}.{}",
                type_name, field_name
            ))),
        }
    }

    /// GraphQL field name, for logs.
    pub fn field_name(&self) -> &'static str {
        match self {
            Operation::GetAllFleets => "getAllFleets",
            Operation::AddFleet(_) => "addFleet",
            Operation::DeleteFleet(_) => "deleteFleet",
            Operation::UpdateFleet(_) => "updateFleet",
        }
    }
}

impl FleetResolver {
    /// Resolve one gateway event and return the JSON handed back to the gateway.
    pub async fn resolve(&self, event: ResolverEvent) -> ResolverResult<Value> {
        let operation = Operation::from_event(&event)?;
        self.execute(operation).await
    }

    pub async fn execute(&self, operation: Operation) -> ResolverResult<Value> {
        match operation {
            Operation::GetAllFleets => to_json(self.get_all_fleets().await?),
            Operation::AddFleet(request) => to_json(self.add_fleet(request).await?),
            Operation::DeleteFleet(request) => to_json(self.delete_fleet(request).await?),
            Operation::UpdateFleet(request) => to_json(self.update_fleet(request).await?),
        }
    }
}

fn decode<T: DeserializeOwned>(event: &ResolverEvent) -> ResolverResult<T> {
    let arguments = match &event.arguments {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(arguments).map_err(|e| {
        ResolverError::Validation(format!(
            "Invalid arguments for {}.{}: {}",
            event.info.parent_type_name, event.info.field_name, e
        ))
    })
}

fn to_json<T: Serialize>(value: T) -> ResolverResult<Value> {
    serde_json::to_value(value).map_err(|e| ResolverError::Internal(e.to_string()))
}
