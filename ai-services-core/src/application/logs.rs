// ai-services-core/src/application/logs.rs

use crate::ports::{LogError, LogSource, LogTarget};
use std::future::Future;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The producer closed the stream.
    Closed { bytes: u64 },
    /// `shutdown` fired first.
    Interrupted,
}

/// Copies the followed logs of `target` into `out` until the stream ends or
/// `shutdown` completes. An interrupted stream is a normal outcome; a producer
/// that exits with a failure after closing the stream is an error.
#[instrument(skip(source, out, shutdown), fields(pod = %target.pod))]
pub async fn stream_logs<W, S>(
    source: &dyn LogSource,
    target: &LogTarget,
    out: &mut W,
    shutdown: S,
) -> Result<StreamEnd, LogError>
where
    W: AsyncWrite + Unpin + Send,
    S: Future<Output = ()>,
{
    let mut stream = source.follow(target).await?;

    let end = tokio::select! {
        copied = tokio::io::copy(stream.reader_mut(), out) => StreamEnd::Closed { bytes: copied? },
        () = shutdown => {
            info!("Log streaming interrupted");
            StreamEnd::Interrupted
        }
    };
    out.flush().await?;

    // an interrupt abandons the producer; a closed stream must come from a clean exit
    if let StreamEnd::Closed { .. } = end {
        stream.finish().await?;
    }
    debug!(?end, "Log stream finished");
    Ok(end)
}
