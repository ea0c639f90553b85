//! Pipeline state transitions.

use super::common::{as_ints, ints, is_even};
use collkit::{Callback, Error, Pipeline, SortOptions, Value};

#[test]
fn failing_second_of_four_steps_sticks() {
    let double = Callback::from_fn(|n: i64| n * 2);
    let p = Pipeline::new(ints(&[3, 1, 2]))
        .map(&double)
        .take(-1)
        .sort(SortOptions::ascending())
        .reverse();

    assert!(p.is_error());
    let err = p.error().unwrap();
    assert_eq!(err.step, 2);
    assert_eq!(err.operation, "take");
    assert_eq!(
        err.source,
        Error::ArgumentOutOfRange {
            name: "n",
            reason: "must be non-negative, got -1".to_string()
        }
    );
    // Step 1's output, untouched by the skipped sort and reverse.
    assert_eq!(as_ints(p.result()), vec![6, 2, 4]);
    assert_eq!(p.last_operation(), Some("reverse"));
}

#[test]
fn terminals_do_not_mutate() {
    let p = Pipeline::new(ints(&[1, 2, 3, 4])).filter(&is_even());
    let first = p.result().clone();
    let _ = p.result_and_error();
    let _ = p.error();
    let _ = p.is_error();
    assert_eq!(p.result(), &first);
    assert_eq!(p.into_result().unwrap(), ints(&[2, 4]));
}

#[test]
fn then_runs_custom_steps() {
    let p = Pipeline::new(ints(&[1, 2, 3])).then("sum", |v| {
        let total: i64 = v
            .as_seq()
            .map(|s| s.items().iter().filter_map(Value::as_int).sum())
            .unwrap_or(0);
        Ok(Value::Int(total))
    });
    assert_eq!(p.result(), &Value::Int(6));
    assert_eq!(p.last_operation(), Some("sum"));
}

#[test]
fn fault_on_first_step_keeps_the_input() {
    let p = Pipeline::new(Value::Int(9)).chunk(2).compact();
    assert!(matches!(
        p.error().map(|e| &e.source),
        Some(Error::WrongShape { .. })
    ));
    assert_eq!(p.result(), &Value::Int(9));
    assert_eq!(p.steps(), 2);
}
