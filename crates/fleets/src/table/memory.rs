//! Memory: in-process [`FleetTable`] for tests and the local gateway.
//!
//! Every call takes the mutex once, so each operation is atomic the same
//! way a single DynamoDB item call is. Nothing spans calls.

use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::model::Fleet;
use super::error::TableError;
use super::ops::FleetTable;

/// Mutable inner state protected by a mutex.
#[derive(Default)]
struct Inner {
    fleets: BTreeMap<String, Fleet>,
    /// When set, every call fails with a clone of this error.
    failure: Option<TableError>,
}

/// A fleet table held entirely in memory.
pub struct MemoryTable {
    inner: Mutex<Inner>,
    calls: AtomicUsize,
}

impl MemoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Seed a record without counting it as a call.
    pub async fn insert(&self, fleet: Fleet) {
        let mut state = self.inner.lock().await;
        state.fleets.insert(fleet.fleet_id.clone(), fleet);
    }

    /// Look up a record directly, bypassing the call counter.
    pub async fn get(&self, fleet_id: &str) -> Option<Fleet> {
        self.inner.lock().await.fleets.get(fleet_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.fleets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Make every subsequent call fail with `failure` (or succeed again with `None`).
    pub async fn set_failure(&self, failure: Option<TableError>) {
        self.inner.lock().await.failure = failure;
    }

    /// Number of `FleetTable` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for MemoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetTable for MemoryTable {
    fn scan_fleets(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Fleet>, TableError>> + Send + '_>> {
        Box::pin(async move {
            self.record_call();
            let state = self.inner.lock().await;
            if let Some(err) = &state.failure {
                return Err(err.clone());
            }
            Ok(state.fleets.values().cloned().collect())
        })
    }

    fn put_fleet<'a>(
        &'a self,
        fleet: &'a Fleet,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>> {
        Box::pin(async move {
            self.record_call();
            let mut state = self.inner.lock().await;
            if let Some(err) = &state.failure {
                return Err(err.clone());
            }
            state.fleets.insert(fleet.fleet_id.clone(), fleet.clone());
            Ok(())
        })
    }

    fn delete_fleet<'a>(
        &'a self,
        fleet_id: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>> {
        Box::pin(async move {
            self.record_call();
            let mut state = self.inner.lock().await;
            if let Some(err) = &state.failure {
                return Err(err.clone());
            }
            state.fleets.remove(fleet_id);
            Ok(())
        })
    }

    fn update_fleet_name<'a>(
        &'a self,
        fleet_id: &'a str,
        fleet_name: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TableError>> + Send + 'a>> {
        Box::pin(async move {
            self.record_call();
            let mut state = self.inner.lock().await;
            if let Some(err) = &state.failure {
                return Err(err.clone());
            }
            match state.fleets.get_mut(fleet_id) {
                Some(fleet) => {
                    fleet.fleet_name = fleet_name.to_string();
                    Ok(())
                }
                None => Err(TableError::NotFound(fleet_id.to_string())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_fleet(id: &str, name: &str) -> Fleet {
        Fleet {
            fleet_id: id.to_string(),
            fleet_name: name.to_string(),
            created_at: Some("2022-08-01T12:00:00.000000Z".to_string()),
            tracks: Some(vec!["reinvent-2018".to_string()]),
        }
    }

    #[tokio::test]
    async fn test_scan_returns_all() {
        let table = MemoryTable::new();
        table.insert(make_fleet("a", "Alpha")).await;
        table.insert(make_fleet("b", "Bravo")).await;

        let fleets = table.scan_fleets().await.unwrap();
        assert_eq!(fleets.len(), 2);
        assert_eq!(table.calls(), 1);
    }

    #[tokio::test]
    async fn test_put_replaces_same_key() {
        let table = MemoryTable::new();
        table.put_fleet(&make_fleet("a", "Alpha")).await.unwrap();
        table.put_fleet(&make_fleet("a", "Alpha 2")).await.unwrap();

        assert_eq!(table.len().await, 1);
        assert_eq!(table.get("a").await.unwrap().fleet_name, "Alpha 2");
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let table = MemoryTable::new();
        table.insert(make_fleet("a", "Alpha")).await;

        table.delete_fleet("nope").await.unwrap();
        assert_eq!(table.len().await, 1);

        table.delete_fleet("a").await.unwrap();
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_name_keeps_other_attributes() {
        let table = MemoryTable::new();
        let original = make_fleet("a", "Alpha");
        table.insert(original.clone()).await;

        table.update_fleet_name("a", "Renamed").await.unwrap();
        let updated = table.get("a").await.unwrap();
        assert_eq!(updated.fleet_name, "Renamed");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.tracks, original.tracks);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let table = MemoryTable::new();
        let err = table.update_fleet_name("ghost", "x").await.unwrap_err();
        assert_eq!(err, TableError::NotFound("ghost".to_string()));
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let table = MemoryTable::new();
        table.insert(make_fleet("a", "Alpha")).await;
        table
            .set_failure(Some(TableError::Unavailable("throttled".to_string())))
            .await;

        assert!(matches!(table.scan_fleets().await, Err(TableError::Unavailable(_))));
        assert!(table.delete_fleet("a").await.is_err());
        assert_eq!(table.len().await, 1);

        table.set_failure(None).await;
        assert!(table.scan_fleets().await.is_ok());
    }
}
