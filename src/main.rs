// ============================================================================
// File: packages/ecr-cleanup/src/main.rs
// ----------------------------------------------------------------------------
// Lambda bootstrap and local invocation CLI
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;

use ecr_cleanup::{
    CleanupHandler, EcrRegistry, HandlerConfig, HttpResponseSender, InvocationContext,
    ResponseSender, StdoutResponseSender, build_logger, runtime,
};

#[derive(Debug, Parser)]
#[command(name = "ecr-cleanup", version, about = "Force-delete ECR repositories on stack teardown")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve invocations from the AWS Lambda runtime (default)
    Serve,

    /// Handle a single custom resource request read from a file
    Invoke {
        /// Path to the JSON request
        #[arg(long, value_name = "PATH")]
        event: PathBuf,

        /// Print the response instead of sending it to the ResponseURL
        #[arg(long)]
        no_callback: bool,

        /// Log stream name reported in the response reason
        #[arg(long, default_value = "local")]
        log_stream: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = build_logger();
    let config = HandlerConfig::from_env().context("failed to load handler configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!(
                logger: &*logger,
                "starting cleanup handler: policy={:?} treat_missing_as_deleted={}",
                config.envelope_policy,
                config.treat_missing_as_deleted
            );
            let sender = HttpResponseSender::new(config.callback_timeout)?;
            let handler = Arc::new(CleanupHandler::new(
                Arc::new(EcrRegistry::new()),
                Arc::new(sender),
                logger,
                config,
            ));
            runtime::run(handler)
                .await
                .map_err(|e| anyhow!("lambda runtime stopped: {e}"))
        }
        Command::Invoke {
            event,
            no_callback,
            log_stream,
        } => {
            let raw = std::fs::read_to_string(&event)
                .with_context(|| format!("failed to read event file {}", event.display()))?;
            let payload: Value = serde_json::from_str(&raw)
                .with_context(|| format!("event file {} is not valid JSON", event.display()))?;

            let sender: Arc<dyn ResponseSender> = if no_callback {
                Arc::new(StdoutResponseSender)
            } else {
                Arc::new(HttpResponseSender::new(config.callback_timeout)?)
            };
            let handler = CleanupHandler::new(Arc::new(EcrRegistry::new()), sender, logger, config);

            let ctx = InvocationContext::new("local", log_stream);
            runtime::handle_payload(&handler, payload, &ctx)
                .await
                .context("event is not a valid custom resource request")?;
            Ok(())
        }
    }
}
