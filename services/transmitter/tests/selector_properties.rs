//! Test case selector properties

use codec::{INVALID_ACCOUNT, INVALID_EVENT_CODE};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sia_transmitter::{RandomSource, RngSource, TestCaseSelector};
use std::time::Duration;
use transmitter_config::TestCaseOverride;

fn override_record() -> impl Strategy<Value = TestCaseOverride> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(crc, code, account, time)| TestCaseOverride {
            crc,
            code,
            account,
            time,
        },
    )
}

/// Source that always answers "substitute" and the largest offset
struct AlwaysSubstitute(StdRng);

impl RandomSource for AlwaysSubstitute {
    fn chance(&mut self, _probability: f64) -> bool {
        true
    }

    fn index(&mut self, len: usize) -> usize {
        len - 1
    }

    fn up_to(&mut self, max: u64) -> u64 {
        max
    }

    fn frame_rng(&mut self) -> &mut dyn RngCore {
        &mut self.0
    }
}

#[test]
fn injected_source_drives_randomized_choices() {
    let mut selector =
        TestCaseSelector::randomized("1111", AlwaysSubstitute(StdRng::seed_from_u64(0)));
    let case = selector.next().unwrap();

    assert!(case.alter_crc);
    assert_eq!(case.code, INVALID_EVENT_CODE);
    assert_eq!(case.account, INVALID_ACCOUNT);
    assert_eq!(case.time_offset, Duration::from_secs(60));
}

proptest! {
    #[test]
    fn scripted_cases_are_consumed_in_order(
        records in prop::collection::vec(override_record(), 1..40),
        seed in any::<u64>(),
    ) {
        let selector = TestCaseSelector::scripted(records.clone(), "1111", RngSource::seeded(seed));
        let cases: Vec<_> = selector.collect();
        prop_assert_eq!(cases.len(), records.len());

        for (case, record) in cases.iter().zip(&records) {
            prop_assert_eq!(case.alter_crc, record.crc);
            prop_assert_eq!(case.code == INVALID_EVENT_CODE, record.code);
            prop_assert_eq!(case.account == INVALID_ACCOUNT, record.account);
            let offset = if record.time { 100 } else { 0 };
            prop_assert_eq!(case.time_offset, Duration::from_secs(offset));
        }
    }

    #[test]
    fn randomized_selection_is_reproducible(seed in any::<u64>()) {
        let a: Vec<_> = TestCaseSelector::randomized("1111", RngSource::seeded(seed)).take(50).collect();
        let b: Vec<_> = TestCaseSelector::randomized("1111", RngSource::seeded(seed)).take(50).collect();
        prop_assert_eq!(a, b);
    }
}
