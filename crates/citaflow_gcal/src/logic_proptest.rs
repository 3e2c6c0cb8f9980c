#[cfg(test)]
mod tests {
    use crate::logic::{candidate_slots, compute_availability, free_slots, weekday_window};
    use chrono::{Datelike, Duration, NaiveDate, Weekday};
    use proptest::prelude::*;
    use std::collections::HashSet;

    // Arbitrary dates across a few years, built from a day offset so every
    // generated value is valid.
    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..(4 * 365)).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
        })
    }

    fn arb_busy() -> impl Strategy<Value = HashSet<String>> {
        proptest::collection::hash_set((0u32..24, prop_oneof![Just(0u32), Just(30u32)]), 0..12)
            .prop_map(|set| {
                set.into_iter()
                    .map(|(h, m)| format!("{h:02}:{m:02}"))
                    .collect()
            })
    }

    proptest! {
        // free ∪ (busy ∩ candidates) partitions the candidate list
        #[test]
        fn free_and_blocked_partition_the_candidates(busy in arb_busy()) {
            let candidates = candidate_slots(9, 18);
            let free = free_slots(&candidates, &busy);
            let blocked = candidates.iter().filter(|c| busy.contains(c.as_str())).count();
            prop_assert_eq!(free.len() + blocked, candidates.len());
            for slot in &free {
                prop_assert!(!busy.contains(slot.as_str()));
            }
        }

        // free slots keep the candidate ordering
        #[test]
        fn free_slots_preserve_candidate_order(busy in arb_busy()) {
            let candidates = candidate_slots(9, 18);
            let free = free_slots(&candidates, &busy);
            let positions: Vec<usize> = free
                .iter()
                .map(|slot| candidates.iter().position(|c| c == slot).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        // no window, wherever it starts, may contain a weekend
        #[test]
        fn window_never_contains_weekends(start in arb_date(), days in 0u32..30) {
            for date in weekday_window(start, days) {
                prop_assert!(!matches!(date.weekday(), Weekday::Sat | Weekday::Sun));
            }
        }

        // every weekday of the window gets an entry, even when fully booked
        #[test]
        fn availability_keys_match_the_weekday_window(start in arb_date(), days in 0u32..30) {
            let candidates = candidate_slots(9, 18);
            let availability = compute_availability(start, days, &candidates, |_| {
                candidates.iter().cloned().collect()
            });
            let expected: Vec<NaiveDate> = weekday_window(start, days);
            let actual: Vec<NaiveDate> = availability.keys().copied().collect();
            prop_assert_eq!(actual, expected);
            prop_assert!(availability.values().all(Vec::is_empty));
        }
    }
}
