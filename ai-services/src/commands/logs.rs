// ai-services/src/commands/logs.rs
//
// USE CASE: Follow application logs until Ctrl+C or SIGTERM.

use super::AppContext;
use ai_services_core::application::{StreamEnd, stream_logs};
use ai_services_core::domain::RuntimeType;
use ai_services_core::infrastructure::CommandLogSource;
use ai_services_core::ports::LogTarget;
use std::future::pending;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, warn};

pub async fn execute(
    ctx: &AppContext,
    pod: String,
    container: Option<String>,
    namespace: Option<String>,
) -> anyhow::Result<()> {
    let source = match ctx.runtime() {
        RuntimeType::Podman => CommandLogSource::podman(),
        RuntimeType::OpenShift => CommandLogSource::cluster(ctx.config.cluster.cli.clone()),
    };
    let target = LogTarget::pod(pod)
        .with_container(container)
        .with_namespace(namespace);

    let mut stdout = tokio::io::stdout();
    let shutdown = shutdown_signal();

    match stream_logs(&source, &target, &mut stdout, shutdown).await? {
        StreamEnd::Closed { bytes } => debug!(bytes, "Log stream closed"),
        StreamEnd::Interrupted => eprintln!("\n👋 Stopped following logs"),
    }
    Ok(())
}

/// Completes on Ctrl+C or SIGTERM. The SIGTERM handler is installed before the
/// returned future is first polled.
fn shutdown_signal() -> impl Future<Output = ()> {
    // an unavailable signal handler leaves the stream running until it closes
    let terminate = signal(SignalKind::terminate())
        .inspect_err(|e| warn!(error = %e, "SIGTERM handler unavailable"))
        .ok();

    async move {
        let ctrl_c = async {
            if tokio::signal::ctrl_c().await.is_err() {
                pending::<()>().await;
            }
        };
        let terminate = async {
            match terminate {
                Some(mut sigterm) => {
                    sigterm.recv().await;
                }
                None => pending::<()>().await,
            }
        };
        tokio::select! {
            () = ctrl_c => debug!("Received Ctrl+C"),
            () = terminate => debug!("Received SIGTERM"),
        }
    }
}
