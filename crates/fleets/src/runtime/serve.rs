//! Serve: hand the resolver to the Lambda runtime and handle each invocation.

use std::sync::Arc;

use lambda_runtime::{service_fn, Diagnostic, LambdaEvent};
use serde_json::Value;
use tracing::{info_span, warn, Instrument};

use crate::event::ResolverEvent;
use crate::resolver::{FleetResolver, ResolverError};

/// Run the invocation loop until the runtime shuts the process down.
pub async fn serve(resolver: Arc<FleetResolver>) -> Result<(), lambda_runtime::Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ResolverEvent>| {
        let resolver = Arc::clone(&resolver);
        async move { handle(&resolver, event).await }
    }))
    .await
}

/// Resolve one invocation inside a span carrying its request and correlation ids.
pub async fn handle(
    resolver: &FleetResolver,
    event: LambdaEvent<ResolverEvent>,
) -> Result<Value, ResolverError> {
    let (payload, context) = event.into_parts();

    let span = info_span!(
        "resolve",
        request_id = %context.request_id,
        correlation_id = payload.correlation_id().unwrap_or("-"),
        type_name = %payload.info.parent_type_name,
        field_name = %payload.info.field_name,
    );

    async move {
        let result = resolver.resolve(payload).await;
        if let Err(err) = &result {
            warn!(code = err.code(), "resolver returned error: {}", err);
        }
        result
    }
    .instrument(span)
    .await
}

/// The gateway receives `errorType` = the resolver error code.
impl From<ResolverError> for Diagnostic {
    fn from(err: ResolverError) -> Self {
        Diagnostic {
            error_type: err.code().to_string(),
            error_message: err.to_string(),
        }
    }
}
