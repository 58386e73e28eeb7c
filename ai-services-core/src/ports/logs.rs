// ai-services-core/src/ports/logs.rs

use async_trait::async_trait;
use miette::Diagnostic;
use std::future::Future;
use std::pin::Pin;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::io::AsyncRead;

type ExitFuture = Pin<Box<dyn Future<Output = Result<(), LogError>> + Send>>;

/// A followed log: the byte stream and the outcome of its producer.
///
/// The stream ends when the producer closes it. [`LogStream::finish`] then
/// reports whether the producer exited cleanly. Dropping the stream without
/// finishing it abandons the producer.
pub struct LogStream {
    reader: Box<dyn AsyncRead + Send + Unpin>,
    exit: ExitFuture,
}

impl LogStream {
    /// Stream whose producer always ends cleanly.
    pub fn new(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            exit: Box::pin(async { Ok(()) }),
        }
    }

    pub fn with_exit(
        mut self,
        exit: impl Future<Output = Result<(), LogError>> + Send + 'static,
    ) -> Self {
        self.exit = Box::pin(exit);
        self
    }

    pub fn reader_mut(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        self.reader.as_mut()
    }

    /// Waits for the producer once the stream is drained.
    pub async fn finish(self) -> Result<(), LogError> {
        self.exit.await
    }
}

/// Pod (and optionally one container) whose logs are followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub pod: String,
    pub container: Option<String>,
    pub namespace: Option<String>,
}

impl LogTarget {
    pub fn pod(pod: impl Into<String>) -> Self {
        Self {
            pod: pod.into(),
            container: None,
            namespace: None,
        }
    }

    pub fn with_container(mut self, container: Option<String>) -> Self {
        self.container = container;
        self
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum LogError {
    #[error("failed to start '{program}': {source}")]
    #[diagnostic(
        code(ai_services::logs::spawn),
        help("Make sure '{program}' is installed and present in PATH.")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    #[diagnostic(
        code(ai_services::logs::exited),
        help("Check that the pod and container exist and that you are logged in.")
    )]
    Exited { program: String, status: ExitStatus },

    #[error("log stream interrupted: {0}")]
    #[diagnostic(code(ai_services::logs::stream))]
    Stream(#[from] std::io::Error),
}

#[async_trait]
pub trait LogSource: Send + Sync {
    /// Starts following the logs of `target`.
    async fn follow(&self, target: &LogTarget) -> Result<LogStream, LogError>;
}
