//! Loop controller
//!
//! Runs select → build → send → wait, one message at a time. Nothing
//! overlaps: a message's connect/write/read/close always finishes before the
//! delay starts, and the next case is selected only after the delay.
//! Cancellation is only observed during the delay, so a message in flight is
//! never cut short.

use codec::{timestamp_token, CipherKey, SiaMessageBuilder};
use network::Transport;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticSink, RunSummary};
use crate::error::Result;
use crate::random::RandomSource;
use crate::selector::TestCaseSelector;

/// Drives a [`TestCaseSelector`] through a [`Transport`]
pub struct LoopController<T, S, D> {
    transport: T,
    selector: TestCaseSelector<S>,
    sink: D,
    key: Option<CipherKey>,
    delay: Duration,
}

impl<T, S, D> LoopController<T, S, D>
where
    T: Transport,
    S: RandomSource,
    D: DiagnosticSink,
{
    pub fn new(
        transport: T,
        selector: TestCaseSelector<S>,
        sink: D,
        key: Option<CipherKey>,
        delay: Duration,
    ) -> Self {
        Self {
            transport,
            selector,
            sink,
            key,
            delay,
        }
    }

    /// Run until a scripted selector is exhausted
    ///
    /// A randomized selector never finishes; use [`run_until`] to stop it.
    ///
    /// [`run_until`]: LoopController::run_until
    pub async fn run(self) -> Result<RunSummary> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Run until the selector is exhausted or `shutdown` resolves between
    /// messages
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.sink.record(Diagnostic::RunStarted {
            destination: self.transport.destination(),
            scripted_cases: self.selector.remaining(),
            encrypted: self.key.is_some(),
        });

        let mut summary = RunSummary::default();
        let mut cancelled = false;
        let mut index = 0u64;

        while let Some(case) = self.selector.next() {
            let timestamp = timestamp_token(case.time_offset);
            let frame = SiaMessageBuilder::new(&case.account, case.code, &timestamp)
                .key(self.key.as_ref())
                .corrupt_checksum(case.alter_crc)
                .build(self.selector.frame_rng());
            let wire = frame.to_wire();
            debug!(index, checksum_valid = frame.has_valid_checksum(), "Index: {}", index);

            self.sink.record(Diagnostic::CaseSelected { index, case });

            let exchange = self.transport.exchange(wire.as_bytes()).await?;
            summary.messages_sent += 1;
            summary.bytes_sent += exchange.bytes_sent as u64;
            summary.bytes_received += exchange.response.len() as u64;

            self.sink.record(Diagnostic::MessageSent { index, wire });
            self.sink.record(Diagnostic::ResponseReceived {
                index,
                peer: exchange.peer,
                response: exchange.response,
            });
            index += 1;

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    cancelled = true;
                    break;
                }
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        self.sink.record(Diagnostic::RunFinished { summary, cancelled });
        Ok(summary)
    }
}
