//! Live: implements `FleetTable` for the SDK-backed `DynamoTable`.

use std::pin::Pin;

use crate::model::Fleet;
use super::dynamo::DynamoTable;
use super::error::TableError;
use super::ops::FleetTable;

impl FleetTable for DynamoTable {
    fn scan_fleets(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Fleet>, TableError>> + Send + '_>> {
        Box::pin(self.scan_fleets())
    }

    fn put_fleet<'a>(
        &'a self,
        fleet: &'a Fleet,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>> {
        Box::pin(self.put_fleet(fleet))
    }

    fn delete_fleet<'a>(
        &'a self,
        fleet_id: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>> {
        Box::pin(self.delete_fleet(fleet_id))
    }

    fn update_fleet_name<'a>(
        &'a self,
        fleet_id: &'a str,
        fleet_name: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>> {
        Box::pin(self.update_fleet_name(fleet_id, fleet_name))
    }
}
