//! Ask command - one-shot lookup printed as JSON

use std::sync::Arc;

use clap::Args;

use super::load_config;
use crate::api::types::AskResponse;
use crate::domain::session::SessionId;
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Query text
    pub query: String,

    /// Similarity threshold, clamped to the configured range
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Session to record the query under
    #[arg(short, long)]
    pub session: Option<String>,

    /// Skip the simulated delays
    #[arg(long)]
    pub instant: bool,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let mut config = load_config();
    logging::init_cli_logging(&config.logging)?;

    if args.instant {
        config.latency.apply_delays = false;
    }
    config.validate()?;

    let state = crate::create_app_state(Arc::new(config));
    let session_id = SessionId::parse_or_default(args.session.as_deref())?;

    let outcome = state
        .chat_service
        .ask(&session_id, &args.query, args.threshold)
        .await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&AskResponse::from(outcome.result))?
    );

    Ok(())
}
