// ai-services-core/src/testing.rs
//
// Test doubles for the ports: scripted host, in-memory cluster, spy rules and a
// recording progress reporter.

#![allow(clippy::unwrap_used)]

use crate::domain::validation::{Rule, RuleError, Severity};
use crate::ports::{
    ClusterClient, ClusterError, CommandOutput, HostProbe, ProbeError, ProgressReporter,
    ResourceKind,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- SPY RULE ---

pub struct SpyRule {
    name: String,
    level: Severity,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl SpyRule {
    pub fn passing(name: &str, level: Severity) -> Self {
        Self {
            name: name.to_string(),
            level,
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str, level: Severity, cause: &str) -> Self {
        Self {
            failure: Some(cause.to_string()),
            ..Self::passing(name, level)
        }
    }

    /// Shared invocation counter, readable after the rule moved into a registry.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Rule for SpyRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Spy rule used in tests."
    }

    async fn verify(&self) -> Result<(), RuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(cause) => Err(RuleError::failed(cause.clone())),
            None => Ok(()),
        }
    }

    fn message(&self) -> String {
        format!("{} ok", self.name)
    }

    fn level(&self) -> Severity {
        self.level
    }

    fn hint(&self) -> String {
        format!("fix {}", self.name)
    }
}

// --- FAKE HOST ---

#[derive(Default)]
pub struct FakeHost {
    files: HashMap<String, String>,
    commands: HashMap<String, CommandOutput>,
    /// One-shot answers consumed before `commands`; `None` is a missing binary.
    queued: Mutex<HashMap<String, VecDeque<Option<CommandOutput>>>>,
    arch: String,
    invocations: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            arch: "ppc64le".to_string(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Scripts the output of `program` (any arguments).
    pub fn with_command(mut self, program: &str, status: i32, stdout: &str, stderr: &str) -> Self {
        self.commands.insert(
            program.to_string(),
            CommandOutput {
                status,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// The next call of `program` fails to spawn, later calls use the scripted output.
    pub fn with_missing_once(self, program: &str) -> Self {
        self.queued
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(None);
        self
    }

    pub fn with_arch(mut self, arch: &str) -> Self {
        self.arch = arch.to_string();
        self
    }

    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostProbe for FakeHost {
    async fn read_to_string(&self, path: &str) -> Result<String, ProbeError> {
        self.files.get(path).cloned().ok_or_else(|| ProbeError::Read {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
        self.invocations
            .lock()
            .unwrap()
            .push(format!("{} {}", program, args.join(" ")).trim().to_string());
        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(program)
            .and_then(VecDeque::pop_front);
        let output = match queued {
            Some(answer) => answer,
            None => self.commands.get(program).cloned(),
        };
        output.ok_or_else(|| ProbeError::Spawn {
            program: program.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
        })
    }

    fn arch(&self) -> String {
        self.arch.clone()
    }
}

// --- FAKE CLUSTER ---

#[derive(Default)]
pub struct FakeCluster {
    reachable: bool,
    objects: Mutex<HashMap<&'static str, Vec<Value>>>,
    created: Mutex<Vec<Value>>,
    applied: Mutex<Vec<PathBuf>>,
    /// Number of `get` calls that answer NotFound before objects become visible.
    not_found_gets: AtomicUsize,
    get_calls: AtomicUsize,
}

impl FakeCluster {
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_object(self, kind: &ResourceKind, object: Value) -> Self {
        self.objects
            .lock()
            .unwrap()
            .entry(kind.plural)
            .or_default()
            .push(object);
        self
    }

    pub fn hidden_for_gets(self, count: usize) -> Self {
        self.not_found_gets.store(count, Ordering::SeqCst);
        self
    }

    pub fn created(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }

    pub fn applied(&self) -> Vec<PathBuf> {
        self.applied.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn guard(&self) -> Result<(), ClusterError> {
        if self.reachable {
            Ok(())
        } else {
            Err(ClusterError::Unreachable("connection refused".into()))
        }
    }
}

fn matches_namespace(object: &Value, namespace: Option<&str>) -> bool {
    match namespace {
        None => true,
        Some(ns) => crate::ports::cluster::nested_str(object, &["metadata", "namespace"]) == Some(ns),
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn ping(&self) -> Result<String, ClusterError> {
        self.guard()?;
        Ok("v1.31.0".into())
    }

    async fn list(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<Value>, ClusterError> {
        self.guard()?;
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(kind.plural)
            .map(|items| {
                items
                    .iter()
                    .filter(|o| matches_namespace(o, namespace))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(
        &self,
        kind: &ResourceKind,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<Value, ClusterError> {
        self.guard()?;
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let hidden = self.not_found_gets.load(Ordering::SeqCst);
        if hidden > 0 {
            self.not_found_gets.store(hidden - 1, Ordering::SeqCst);
            return Err(ClusterError::NotFound {
                kind: kind.kind.to_string(),
                name: name.to_string(),
            });
        }

        self.list(kind, namespace)
            .await?
            .into_iter()
            .find(|o| crate::ports::cluster::object_name(o) == name)
            .ok_or_else(|| ClusterError::NotFound {
                kind: kind.kind.to_string(),
                name: name.to_string(),
            })
    }

    async fn create(&self, manifest: &Value) -> Result<(), ClusterError> {
        self.guard()?;
        let name = crate::ports::cluster::object_name(manifest).to_string();
        let mut created = self.created.lock().unwrap();
        if created
            .iter()
            .any(|o| crate::ports::cluster::object_name(o) == name)
        {
            return Err(ClusterError::AlreadyExists {
                kind: "object".into(),
                name,
            });
        }
        created.push(manifest.clone());
        Ok(())
    }

    async fn apply_file(&self, path: &Path) -> Result<(), ClusterError> {
        self.guard()?;
        self.applied.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

// --- RECORDING REPORTER ---

#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for RecordingReporter {
    fn start(&self, message: &str) {
        self.push(format!("start: {message}"));
    }

    fn update(&self, message: &str) {
        self.push(format!("update: {message}"));
    }

    fn success(&self, message: &str) {
        self.push(format!("success: {message}"));
    }

    fn warning(&self, message: &str) {
        self.push(format!("warning: {message}"));
    }

    fn failure(&self, message: &str, hint: Option<&str>) {
        match hint {
            Some(hint) => self.push(format!("failure: {message} (hint: {hint})")),
            None => self.push(format!("failure: {message}")),
        }
    }
}
