//! Property-based tests for rule boundaries and error aggregation

use chrono::{Duration, TimeZone, Utc};
use fieldwise::prelude::*;
use proptest::prelude::*;

#[derive(Debug)]
struct Record {
    label: String,
    score: i64,
    ratio: Option<f64>,
}

fields!(Record { label, score, ratio });

fn check<V: FieldValidator>(v: V) -> Result<(), ValidationError> {
    v.validate(&Context::background())
}

proptest! {
    #[test]
    fn prop_range_is_inclusive(value in any::<i32>(), a in any::<i32>(), b in any::<i32>()) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let result = check(number(&value).range(min, max));
        prop_assert_eq!(result.is_ok(), min <= value && value <= max);
    }

    #[test]
    fn prop_min_max_agree_with_range(value in -1000i64..1000, min in -1000i64..0, max in 0i64..1000) {
        let combined = check(number(&value).min(min).max(max)).is_ok();
        let ranged = check(number(&value).range(min, max)).is_ok();
        prop_assert_eq!(combined, ranged);
    }

    #[test]
    fn prop_length_counts_chars(text in "\\PC{0,20}", min in 0usize..10, extra in 0usize..10) {
        let max = min + extra;
        let count = text.chars().count();
        let result = check(string(&text).length(min, max));
        prop_assert_eq!(result.is_ok(), count >= min && count <= max);
    }

    #[test]
    fn prop_between_excludes_endpoints(offset in -10i64..10) {
        let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::seconds(5);
        let value = start + Duration::seconds(offset);

        let result = check(time(&value).between(start, end));
        prop_assert_eq!(result.is_ok(), offset > 0 && offset < 5);
        if let Err(err) = result {
            let is_range = matches!(err, ValidationError::Range { .. });
            prop_assert!(is_range);
        }
    }

    #[test]
    fn prop_absent_value_runs_no_rules(optional in any::<bool>(), rules in 0usize..5) {
        let absent: Option<String> = None;
        let mut v = string(&absent);
        if optional {
            v = v.optional();
        }
        for _ in 0..rules {
            v = v.check(|_: &str| panic!("rule must not run on an absent value"), "unreachable");
        }

        let result = check(v);
        if optional || rules == 0 {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert_eq!(result, Err(ValidationError::FieldRequired));
        }
    }

    #[test]
    fn prop_collect_all_reports_each_failing_field_once(
        label in "[a-z]{0,6}",
        score in -5i64..5,
        ratio in proptest::option::of(-1.0f64..2.0),
    ) {
        let record = Record { label, score, ratio };
        let v = structure(&record)
            .field(string(&record.label).min_length(3))
            .field(number(&record.score).min(0))
            .field(number(&record.ratio).optional().range(0.0, 1.0));

        let mut expected = Vec::new();
        if record.label.chars().count() < 3 {
            expected.push("label");
        }
        if record.score < 0 {
            expected.push("score");
        }
        if record.ratio.is_some_and(|r| !(0.0..=1.0).contains(&r)) {
            expected.push("ratio");
        }

        match check(&v) {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(err) => {
                let paths: Vec<String> = err.flatten().into_iter().map(|(p, _)| p).collect();
                prop_assert_eq!(paths, expected);
            }
        }
    }

    #[test]
    fn prop_fail_fast_returns_first_of_collect_all(
        label in "[a-z]{0,6}",
        score in -5i64..5,
    ) {
        let record = Record { label, score, ratio: None };
        let build = |fail_fast: bool| {
            structure(&record)
                .set_fail_fast(fail_fast)
                .field(string(&record.label).min_length(3))
                .field(number(&record.score).min(0))
        };

        let all = check(build(false));
        let first = check(build(true));
        match (all, first) {
            (Ok(()), Ok(())) => {}
            (Err(all), Err(first)) => {
                let all = all.as_multi().cloned().expect("collect-all yields a multi error");
                prop_assert_eq!(&all.errors()[0], &first);
            }
            (all, first) => prop_assert!(false, "disagree: {:?} vs {:?}", all, first),
        }
    }
}
