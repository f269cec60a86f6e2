// ============================================================================
// File: packages/ecr-cleanup/src/runtime.rs
// ----------------------------------------------------------------------------
// AWS Lambda integration: turns raw invocation payloads into lifecycle
// events and drives the handler.
// ============================================================================

use std::sync::Arc;

use lambda_runtime::{LambdaEvent, service_fn};
use log::error;
use serde_json::{Value, json};

use crate::handler::CleanupHandler;
use crate::lifecycle::{HandlerResult, InvocationContext, LifecycleEvent};

/// Serve invocations from the Lambda runtime API until the runtime stops
pub async fn run(handler: Arc<CleanupHandler>) -> Result<(), lambda_runtime::Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move { invoke(&handler, event).await }
    }))
    .await
}

/// Handle one Lambda invocation
///
/// A payload that cannot be parsed has no usable response destination, so
/// it is the only case reported to the runtime as an invocation error.
pub async fn invoke(
    handler: &CleanupHandler,
    event: LambdaEvent<Value>,
) -> Result<Value, lambda_runtime::Error> {
    let LambdaEvent { payload, context } = event;
    let ctx = InvocationContext::new(context.request_id.clone(), context.env_config.log_stream.clone());
    let result = handle_payload(handler, payload, &ctx).await?;
    Ok(summarize(&result))
}

/// Parse a raw event and run it through the handler
pub async fn handle_payload(
    handler: &CleanupHandler,
    payload: Value,
    ctx: &InvocationContext,
) -> Result<HandlerResult, serde_json::Error> {
    let event = LifecycleEvent::from_value(payload).map_err(|err| {
        let log = &**handler.logger();
        error!(logger: log, "rejecting malformed custom resource request: {err}");
        err
    })?;
    Ok(handler.handle_and_report(&event, ctx).await)
}

fn summarize(result: &HandlerResult) -> Value {
    json!({
        "Status": result.status,
        "Data": result.payload,
    })
}
