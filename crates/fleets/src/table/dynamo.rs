//! DynamoDB client: core struct, constructor and the four item operations.
//!
//! The trait glue lives in `live.rs`; this file only speaks the SDK.

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_items, to_item};
use tracing::{debug, info};

use crate::conf::TableConfig;
use crate::model::{Fleet, FLEET_ID};
use super::error::TableError;

/// Region used when neither the config nor the environment names one.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Service error codes that mean "try again later" rather than "bad request".
const UNAVAILABLE_CODES: &[&str] = &[
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "ThrottlingException",
    "InternalServerError",
    "ServiceUnavailable",
    "ResourceNotFoundException",
    "UnrecognizedClientException",
];

#[derive(Debug, Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Load the AWS SDK configuration and build a client for `config.table_name`.
    ///
    /// Region priority: `config.region` > environment/profile > [`DEFAULT_REGION`].
    pub async fn connect(config: &TableConfig) -> Self {
        let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(endpoint) = &config.endpoint_url {
            info!("Using DynamoDB endpoint override: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        info!(
            table = %config.table_name,
            region = ?sdk_config.region(),
            "DynamoDB client ready"
        );
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Scan the whole table, following `LastEvaluatedKey` until exhausted.
    pub async fn scan_fleets(&self) -> Result<Vec<Fleet>, TableError> {
        let mut fleets = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|err| classify("scan", err))?;
            pages += 1;

            if let Some(items) = output.items {
                let page: Vec<Fleet> = from_items(items)?;
                fleets.extend(page);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(count = fleets.len(), pages, "scan complete");
        Ok(fleets)
    }

    pub async fn put_fleet(&self, fleet: &Fleet) -> Result<(), TableError> {
        let item = to_item(fleet)?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| classify("put_item", err))?;
        Ok(())
    }

    pub async fn delete_fleet(&self, fleet_id: &str) -> Result<(), TableError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(FLEET_ID, AttributeValue::S(fleet_id.to_string()))
            .send()
            .await
            .map_err(|err| classify("delete_item", err))?;
        Ok(())
    }

    /// `SET fleetName = :newName`, guarded so a missing key is not upserted.
    pub async fn update_fleet_name(&self, fleet_id: &str, fleet_name: &str) -> Result<(), TableError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(FLEET_ID, AttributeValue::S(fleet_id.to_string()))
            .update_expression("SET fleetName = :newName")
            .condition_expression("attribute_exists(fleetId)")
            .expression_attribute_values(":newName", AttributeValue::S(fleet_name.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                debug!(attributes = ?output.attributes, "update_item applied");
                Ok(())
            }
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Err(TableError::NotFound(fleet_id.to_string()))
            }
            Err(err) => Err(classify("update_item", err)),
        }
    }
}

/// Map an SDK failure onto [`TableError`].
///
/// - Timeouts, dispatch and response failures → `Unavailable`
/// - Throttling, server-side faults, missing table, bad credentials → `Unavailable`
/// - Any other service error → `Rejected`
fn classify<E, R>(operation: &str, err: SdkError<E, R>) -> TableError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = match &err {
        SdkError::ServiceError(service) => service.err().code().map(str::to_string),
        _ => None,
    };
    let detail = format!("{}: {}", operation, DisplayErrorContext(&err));

    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            TableError::Unavailable(detail)
        }
        SdkError::ServiceError(_) => match code.as_deref() {
            Some(code) if is_unavailable_code(code) => TableError::Unavailable(detail),
            _ => TableError::Rejected(detail),
        },
        _ => TableError::Rejected(detail),
    }
}

fn is_unavailable_code(code: &str) -> bool {
    UNAVAILABLE_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::operation::scan::{ScanError, ScanOutput};
    use aws_sdk_dynamodb::operation::update_item::{UpdateItemError, UpdateItemOutput};
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ProvisionedThroughputExceededException,
    };
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    type Item = HashMap<String, AttributeValue>;

    fn make_fleet(id: &str, name: &str) -> Fleet {
        Fleet {
            fleet_id: id.to_string(),
            fleet_name: name.to_string(),
            created_at: Some("2022-08-01T12:00:00.000000Z".to_string()),
            tracks: None,
        }
    }

    fn make_item(id: &str, name: &str) -> Item {
        to_item(make_fleet(id, name)).unwrap()
    }

    fn key_of(id: &str) -> Item {
        HashMap::from([(FLEET_ID.to_string(), AttributeValue::S(id.to_string()))])
    }

    #[test]
    fn test_throttling_codes_are_unavailable() {
        assert!(is_unavailable_code("ProvisionedThroughputExceededException"));
        assert!(is_unavailable_code("ThrottlingException"));
        assert!(is_unavailable_code("ResourceNotFoundException"));
    }

    #[test]
    fn test_client_fault_codes_are_rejected() {
        assert!(!is_unavailable_code("ValidationException"));
        assert!(!is_unavailable_code("AccessDeniedException"));
        assert!(!is_unavailable_code("ConditionalCheckFailedException"));
    }

    #[test]
    fn test_classify_throttled_service_error() {
        let throttled = ScanError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder()
                .message("Rate exceeded")
                .meta(
                    ErrorMetadata::builder()
                        .code("ProvisionedThroughputExceededException")
                        .message("Rate exceeded")
                        .build(),
                )
                .build(),
        );
        let err = classify("scan", SdkError::service_error(throttled, ()));
        match err {
            TableError::Unavailable(detail) => assert!(detail.starts_with("scan: "), "{}", detail),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_other_service_error_is_rejected() {
        let denied = ScanError::generic(
            ErrorMetadata::builder()
                .code("AccessDeniedException")
                .message("not authorized")
                .build(),
        );
        let err = classify("scan", SdkError::service_error(denied, ()));
        assert!(matches!(err, TableError::Rejected(_)));
    }

    #[test]
    fn test_classify_timeout_is_unavailable() {
        let err = classify::<ScanError, ()>("put_item", SdkError::timeout_error("deadline elapsed"));
        assert!(matches!(err, TableError::Unavailable(ref d) if d.starts_with("put_item: ")));
    }

    #[tokio::test]
    async fn test_scan_follows_last_evaluated_key() {
        let first_page = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| req.exclusive_start_key().is_none())
            .then_output(|| {
                ScanOutput::builder()
                    .items(make_item("a", "Alpha"))
                    .set_last_evaluated_key(Some(key_of("a")))
                    .build()
            });
        let second_page = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| req.exclusive_start_key() == Some(&key_of("a")))
            .then_output(|| ScanOutput::builder().items(make_item("b", "Bravo")).build());

        let client = mock_client!(aws_sdk_dynamodb, RuleMode::Sequential, [&first_page, &second_page]);
        let table = DynamoTable::new(client, "fleets");

        let fleets = table.scan_fleets().await.unwrap();
        let ids: Vec<&str> = fleets.iter().map(|f| f.fleet_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_scan_keeps_items_without_created_at() {
        let legacy: Item = HashMap::from([
            (FLEET_ID.to_string(), AttributeValue::S("old".to_string())),
            ("fleetName".to_string(), AttributeValue::S("Renamed".to_string())),
        ]);
        let page = mock!(aws_sdk_dynamodb::Client::scan).then_output(move || {
            ScanOutput::builder()
                .items(make_item("a", "Alpha"))
                .items(legacy.clone())
                .build()
        });

        let client = mock_client!(aws_sdk_dynamodb, [&page]);
        let fleets = DynamoTable::new(client, "fleets").scan_fleets().await.unwrap();

        assert_eq!(fleets.len(), 2);
        assert_eq!(fleets[0], make_fleet("a", "Alpha"));
        assert_eq!(fleets[1].fleet_id, "old");
        assert!(fleets[1].created_at.is_none());
    }

    #[tokio::test]
    async fn test_update_sends_guarded_name_only_expression() {
        let update = mock!(aws_sdk_dynamodb::Client::update_item)
            .match_requests(|req| {
                req.update_expression() == Some("SET fleetName = :newName")
                    && req.condition_expression() == Some("attribute_exists(fleetId)")
                    && req.key() == Some(&key_of("f-1"))
            })
            .then_output(|| UpdateItemOutput::builder().build());

        let client = mock_client!(aws_sdk_dynamodb, [&update]);
        DynamoTable::new(client, "fleets")
            .update_fleet_name("f-1", "Renamed")
            .await
            .unwrap();
        assert_eq!(update.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_key_is_not_found() {
        let update = mock!(aws_sdk_dynamodb::Client::update_item).then_error(|| {
            UpdateItemError::ConditionalCheckFailedException(
                ConditionalCheckFailedException::builder()
                    .message("The conditional request failed")
                    .build(),
            )
        });

        let client = mock_client!(aws_sdk_dynamodb, [&update]);
        let err = DynamoTable::new(client, "fleets")
            .update_fleet_name("ghost", "x")
            .await
            .unwrap_err();
        assert_eq!(err, TableError::NotFound("ghost".to_string()));
    }

    #[test]
    fn test_fleet_item_round_trips_through_attribute_values() {
        let fleet = Fleet {
            tracks: Some(vec!["track-1".to_string()]),
            ..make_fleet("f-1", "Cars")
        };
        let item: Item = to_item(&fleet).unwrap();
        assert_eq!(item.get(FLEET_ID), Some(&AttributeValue::S("f-1".to_string())));
        assert!(item.contains_key("createdAt"));

        let back: Vec<Fleet> = from_items(vec![item]).unwrap();
        assert_eq!(back, vec![fleet]);
    }

    #[test]
    fn test_item_without_tracks_has_no_tracks_attribute() {
        let item: Item = to_item(make_fleet("f-2", "Trucks")).unwrap();
        assert!(!item.contains_key("tracks"));
        assert_eq!(item.len(), 3);
    }
}
