// ai-services-core/src/ports/progress.rs

/// Progress display for long running steps (one step at a time).
/// Implementations only render; they never influence the outcome.
pub trait ProgressReporter: Send + Sync {
    fn start(&self, message: &str);
    fn update(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn failure(&self, message: &str, hint: Option<&str>);
}

/// Reporter that renders nothing. Used in tests and non-interactive runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn start(&self, _message: &str) {}
    fn update(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn failure(&self, _message: &str, _hint: Option<&str>) {}
}
