//! Line-delimited JSON message host.
//! Protocol: one request object per input line, one response object per output line.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use unaffiliate_core::background::Background;

/// Answers every non-blank line from `reader` on `writer` until EOF.
/// Malformed lines get an `{"error":...}` reply. Returns the number of replies.
pub async fn serve<R, W>(bg: &mut Background, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = bg.handle_line(line);
        writer.write_all(response.to_json().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        handled += 1;
    }
    Ok(handled)
}
