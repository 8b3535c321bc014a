//! `unaffiliate messages` – serve the JSON message protocol on stdin/stdout.

use anyhow::Result;
use tokio::io::BufReader;
use unaffiliate_core::background::Background;

use crate::cli::message_host;

pub async fn run_messages(bg: &mut Background) -> Result<()> {
    tracing::info!("message host listening on stdin");
    let handled =
        message_host::serve(bg, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    tracing::info!("message host done after {} request(s)", handled);
    Ok(())
}
