//! Test case selection
//!
//! Two modes, fixed when the selector is built:
//!
//! - **Scripted**: replays an ordered list of [`TestCaseOverride`] records,
//!   one per message, then yields `None`.
//! - **Randomized**: draws every decision independently and never ends.
//!
//! In both modes each decision is an edge-case flag resolved against a
//! default. Scripted flags come from the record; randomized flags are drawn
//! with [`SUBSTITUTION_PROBABILITY`]. The base event code is always drawn
//! uniformly from the vocabulary.

use codec::{EventCode, INVALID_ACCOUNT, INVALID_EVENT_CODE};
use rand::RngCore;
use std::time::Duration;
use transmitter_config::service::fuzz::{
    MAX_RANDOM_OFFSET_SECS, SCRIPTED_TIME_OFFSET, SUBSTITUTION_PROBABILITY,
};
use transmitter_config::TestCaseOverride;

use crate::random::RandomSource;

/// Resolved decisions for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub code: &'static str,
    pub account: String,
    pub alter_crc: bool,
    /// How far in the past the event claims to have happened
    pub time_offset: Duration,
}

/// Pick the edge-case value when forced, the default otherwise
fn resolve<T>(forced: bool, edge: T, default: T) -> T {
    if forced {
        edge
    } else {
        default
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Scripted {
        cases: Vec<TestCaseOverride>,
        index: usize,
    },
    Randomized,
}

/// Yields one [`TestCase`] per message until the script runs out
#[derive(Debug)]
pub struct TestCaseSelector<S> {
    mode: Mode,
    account: String,
    random: S,
}

impl<S: RandomSource> TestCaseSelector<S> {
    /// Replay `cases` in order; an empty list falls back to randomized mode
    pub fn scripted(cases: Vec<TestCaseOverride>, account: impl Into<String>, random: S) -> Self {
        let mode = if cases.is_empty() {
            Mode::Randomized
        } else {
            Mode::Scripted { cases, index: 0 }
        };
        Self {
            mode,
            account: account.into(),
            random,
        }
    }

    pub fn randomized(account: impl Into<String>, random: S) -> Self {
        Self {
            mode: Mode::Randomized,
            account: account.into(),
            random,
        }
    }

    /// Scripted when `cases` is `Some` and non-empty, randomized otherwise
    pub fn from_cases(
        cases: Option<Vec<TestCaseOverride>>,
        account: impl Into<String>,
        random: S,
    ) -> Self {
        Self::scripted(cases.unwrap_or_default(), account, random)
    }

    /// Messages left in a scripted run; `None` when randomized
    pub fn remaining(&self) -> Option<usize> {
        match &self.mode {
            Mode::Scripted { cases, index } => Some(cases.len() - index),
            Mode::Randomized => None,
        }
    }

    /// Generator for the frame built from the case just yielded
    pub fn frame_rng(&mut self) -> &mut dyn RngCore {
        self.random.frame_rng()
    }
}

impl<S: RandomSource> Iterator for TestCaseSelector<S> {
    type Item = TestCase;

    fn next(&mut self) -> Option<TestCase> {
        let (flags, default_offset) = match &mut self.mode {
            Mode::Scripted { cases, index } => {
                let flags = *cases.get(*index)?;
                *index += 1;
                (flags, Duration::ZERO)
            }
            Mode::Randomized => {
                let flags = TestCaseOverride {
                    crc: self.random.chance(SUBSTITUTION_PROBABILITY),
                    code: self.random.chance(SUBSTITUTION_PROBABILITY),
                    account: self.random.chance(SUBSTITUTION_PROBABILITY),
                    time: false,
                };
                let offset = Duration::from_secs(self.random.up_to(MAX_RANDOM_OFFSET_SECS));
                (flags, offset)
            }
        };

        let drawn = EventCode::ALL[self.random.index(EventCode::ALL.len())].as_str();
        Some(TestCase {
            code: resolve(flags.code, INVALID_EVENT_CODE, drawn),
            account: resolve(flags.account, INVALID_ACCOUNT, self.account.as_str()).to_string(),
            alter_crc: resolve(flags.crc, true, false),
            time_offset: resolve(flags.time, SCRIPTED_TIME_OFFSET, default_offset),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}
