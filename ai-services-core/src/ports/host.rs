// ai-services-core/src/ports/host.rs

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

/// Captured result of an external diagnostic command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// stdout followed by stderr, the way a terminal would interleave them.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        if self.stdout.is_empty() {
            return self.stderr.clone();
        }
        format!("{}\n{}", self.stdout.trim_end(), self.stderr)
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ProbeError {
    #[error("failed to read '{path}': {source}")]
    #[diagnostic(code(ai_services::probe::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute '{program}': {source}")]
    #[diagnostic(
        code(ai_services::probe::spawn),
        help("Make sure '{program}' is installed and present in PATH.")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only view of the local host: files, diagnostic binaries, CPU architecture.
#[async_trait]
pub trait HostProbe: Send + Sync {
    async fn read_to_string(&self, path: &str) -> Result<String, ProbeError>;

    /// Runs `program` to completion. A non-zero exit is NOT an error here,
    /// callers inspect `CommandOutput::status` themselves.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError>;

    /// Architecture of the running process, in distribution naming (`ppc64le`, `x86_64`...).
    fn arch(&self) -> String;
}
