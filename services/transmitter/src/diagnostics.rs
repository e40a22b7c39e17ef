//! Diagnostic sink
//!
//! The loop reports what it does through a [`DiagnosticSink`] handed to it
//! at construction. [`TracingSink`] forwards to `tracing`; [`RecordingSink`]
//! keeps events in memory for assertions.

use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::selector::TestCase;

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub messages_sent: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// One diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    RunStarted {
        destination: String,
        scripted_cases: Option<usize>,
        encrypted: bool,
    },
    CaseSelected {
        index: u64,
        case: TestCase,
    },
    MessageSent {
        index: u64,
        wire: String,
    },
    ResponseReceived {
        index: u64,
        peer: String,
        response: Vec<u8>,
    },
    RunFinished {
        summary: RunSummary,
        cancelled: bool,
    },
}

/// Receiver of diagnostic events
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn record(&self, event: Diagnostic) {
        (**self).record(event)
    }
}

/// Emits every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: Diagnostic) {
        match event {
            Diagnostic::RunStarted {
                destination,
                scripted_cases,
                encrypted,
            } => match scripted_cases {
                Some(cases) => info!(%destination, cases, encrypted, "Starting scripted run"),
                None => info!(%destination, encrypted, "Starting randomized run"),
            },
            Diagnostic::CaseSelected { index, case } => debug!(
                index,
                account = %case.account,
                code = case.code,
                altered_crc = case.alter_crc,
                time_offset_secs = case.time_offset.as_secs(),
                "Message with account: {}, code: {}, altered crc: {}, time offset: {:?}",
                case.account,
                case.code,
                case.alter_crc,
                case.time_offset
            ),
            Diagnostic::MessageSent { index, wire } => {
                debug!(index, bytes = wire.len(), "Sent: {}", wire.escape_debug())
            }
            Diagnostic::ResponseReceived {
                index,
                peer,
                response,
            } => debug!(
                index,
                %peer,
                bytes = response.len(),
                "Received from server: {}",
                String::from_utf8_lossy(&response).escape_debug()
            ),
            Diagnostic::RunFinished { summary, cancelled } => info!(
                messages = summary.messages_sent,
                bytes_sent = summary.bytes_sent,
                bytes_received = summary.bytes_received,
                cancelled,
                "Run finished"
            ),
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Wire strings of every message sent, in order
    pub fn sent_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Diagnostic::MessageSent { wire, .. } => Some(wire),
                _ => None,
            })
            .collect()
    }

    /// Cases in the order they were selected
    pub fn selected_cases(&self) -> Vec<TestCase> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Diagnostic::CaseSelected { case, .. } => Some(case),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
