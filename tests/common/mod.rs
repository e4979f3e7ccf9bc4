//! Shared test doubles for gate behavior tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use db_gate::gate::Delay;
use db_gate::probe::{ConnectionProbe, ProbeError, RetryCause};

/// One scripted probe outcome.
pub enum Step {
    Ready,
    Unreachable,
    NotReady,
    Fatal(&'static str),
}

/// Probe that replays a fixed script of outcomes and records every call.
pub struct ScriptedProbe {
    // Reversed at construction so attempts pop from the back.
    script: Mutex<Vec<Step>>,
    pub calls: AtomicU32,
    pub names: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new(mut script: Vec<Step>) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: AtomicU32::new(0),
            names: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConnectionProbe for &ScriptedProbe {
    async fn attempt(&self, connection: &str) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(connection.to_string());

        match self.script.lock().unwrap().pop() {
            Some(Step::Ready) => Ok(()),
            Some(Step::Unreachable) => Err(ProbeError::Retryable {
                cause: RetryCause::ServerUnreachable,
                source: "connection refused".into(),
            }),
            Some(Step::NotReady) => Err(ProbeError::Retryable {
                cause: RetryCause::DatabaseNotReady,
                source: "database starting up".into(),
            }),
            Some(Step::Fatal(message)) => Err(ProbeError::Fatal(message.into())),
            None => panic!("probe called more times than scripted"),
        }
    }
}

/// Delay that records invocations instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub pauses: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Delay for &RecordingDelay {
    async fn pause(&self, interval: Duration) {
        self.pauses.lock().unwrap().push(interval);
    }
}
