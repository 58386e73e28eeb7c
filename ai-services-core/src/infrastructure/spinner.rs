// ai-services-core/src/infrastructure/spinner.rs

use crate::ports::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Terminal spinner, one line per step. A finished step leaves a
/// `✔`/`⚠`/`✘` line behind and the next `start` opens a fresh spinner.
#[derive(Default)]
pub struct SpinnerReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn finish(&self, line: String) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.take() {
            Some(pb) => pb.finish_with_message(line),
            None => eprintln!("{line}"),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn start(&self, message: &str) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            previous.finish_and_clear();
        }
        *current = Some(Self::spinner(message));
    }

    fn update(&self, message: &str) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = current.as_ref() {
            pb.set_message(message.to_string());
        }
    }

    fn success(&self, message: &str) {
        self.finish(format!("✔ {message}"));
    }

    fn warning(&self, message: &str) {
        self.finish(format!("⚠ {message}"));
    }

    fn failure(&self, message: &str, hint: Option<&str>) {
        match hint {
            Some(hint) => self.finish(format!("✘ {message}\n  HINT: {hint}")),
            None => self.finish(format!("✘ {message}")),
        }
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        let current = self.current.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = current.take() {
            pb.finish_and_clear();
        }
    }
}
