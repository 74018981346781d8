//! Fleet table trait: abstract interface for every store operation.
//!
//! The resolver only ever sees `Arc<dyn FleetTable>`, so the DynamoDB
//! client and the in-memory table are interchangeable.

use std::pin::Pin;

use crate::model::Fleet;
use super::error::TableError;

/// Unified async interface over the backing table.
///
/// Object-safe thanks to `Pin<Box<…>>` returns. Each method maps onto a
/// single atomic store call; nothing here spans more than one item.
pub trait FleetTable: Send + Sync {
    /// Every stored record, in store order.
    fn scan_fleets(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Fleet>, TableError>> + Send + '_>>;

    /// Write the record, replacing any item with the same `fleet_id`.
    fn put_fleet<'a>(
        &'a self,
        fleet: &'a Fleet,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>>;

    /// Remove the record if present. Absent keys are not an error.
    fn delete_fleet<'a>(
        &'a self,
        fleet_id: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>>;

    /// Overwrite `fleet_name` on an existing record, leaving every other attribute.
    ///
    /// Returns [`TableError::NotFound`] when no record has `fleet_id`.
    fn update_fleet_name<'a>(
        &'a self,
        fleet_id: &'a str,
        fleet_name: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>>;
}
