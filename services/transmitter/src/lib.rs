//! SIA DC-09 transmitter simulator
//!
//! Emits a controllable stream of well-formed, malformed and edge-case
//! alarm messages at a receiver, one TCP connection per message.
//!
//! ```text
//! TestCaseSelector → codec (content, cipher, frame) → Transport → delay → ...
//!        ↑                                                           │
//!        └───────────────────── LoopController ──────────────────────┘
//! ```

pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod random;
pub mod selector;

pub use controller::LoopController;
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, RunSummary, TracingSink};
pub use error::{Result, TransmitterError};
pub use random::{RandomSource, RngSource};
pub use selector::{TestCase, TestCaseSelector};
