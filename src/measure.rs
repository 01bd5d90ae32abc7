//! Timing and verification of sorts against recorded expectations

use crate::dataset::load_case;
use crate::dispatch::{classify, Dispatcher, SortPlan};
use crate::error::{SortError, SortResult};
use crate::fallback::compare_values;
use crate::value::Value;
use itertools::Itertools;
use log::info;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of comparing a sort result with the expected output.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Match,
    LengthMismatch { actual: usize, expected: usize },
    ValueMismatch { index: usize, actual: Value, expected: Value },
}

impl Verification {
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Match => write!(f, "ok"),
            Verification::LengthMismatch { actual, expected } => {
                write!(f, "length {actual}, expected {expected}")
            }
            Verification::ValueMismatch {
                index,
                actual,
                expected,
            } => write!(f, "index {index}: got {actual}, expected {expected}"),
        }
    }
}

/// Timings and validity of one measured case.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub len: usize,
    pub plan: SortPlan,
    pub iterations: usize,
    pub total: Duration,
    pub verification: Verification,
}

impl Measurement {
    pub fn mean(&self) -> Duration {
        if self.iterations == 0 {
            return Duration::ZERO;
        }
        self.total.div_f64(self.iterations as f64)
    }

    pub fn is_valid(&self) -> bool {
        self.verification.is_match()
    }
}

/// Element equality for verification: ints and floats compare by numeric
/// value, NaN matches NaN, everything else by variant and content.
pub fn values_equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) if x.is_nan() || y.is_nan() => {
            x.is_nan() && y.is_nan()
        }
        _ if a.is_numeric() && b.is_numeric() => compare_values(a, b) == Ordering::Equal,
        _ => a == b,
    }
}

/// Compare a sort result with the expected output element by element.
pub fn verify(actual: &[Value], expected: &[Value]) -> Verification {
    if actual.len() != expected.len() {
        return Verification::LengthMismatch {
            actual: actual.len(),
            expected: expected.len(),
        };
    }

    match actual
        .iter()
        .zip(expected.iter())
        .find_position(|(a, e)| !values_equivalent(a, e))
    {
        Some((index, (a, e))) => Verification::ValueMismatch {
            index,
            actual: a.clone(),
            expected: e.clone(),
        },
        None => Verification::Match,
    }
}

/// Whether `values` is non-decreasing under the fallback ordering.
pub fn is_non_decreasing(values: &[Value]) -> bool {
    values
        .iter()
        .tuple_windows()
        .all(|(a, b)| compare_values(a, b) != Ordering::Greater)
}

/// Sort `input` `iterations` times, timing only the sort calls, and
/// verify the last result against `expected`.
pub fn measure(
    dispatcher: &Dispatcher,
    input: &[Value],
    expected: &[Value],
    iterations: usize,
) -> SortResult<Measurement> {
    if iterations == 0 {
        return Err(SortError::invalid_config("iterations must be positive"));
    }

    let mut total = Duration::ZERO;
    let mut sorted = Vec::new();
    for _ in 0..iterations {
        let start = Instant::now();
        sorted = dispatcher.sort(input)?;
        total += start.elapsed();
    }

    let measurement = Measurement {
        len: input.len(),
        plan: classify(input),
        iterations,
        total,
        verification: verify(&sorted, expected),
    };
    info!(
        "measured {} values via {:?}: mean {:?}, {}",
        measurement.len,
        measurement.plan,
        measurement.mean(),
        measurement.verification
    );
    Ok(measurement)
}

/// Load a case directory and [`measure`] it.
pub fn measure_case(dir: &Path, iterations: usize, dispatcher: &Dispatcher) -> SortResult<Measurement> {
    let case = load_case(dir)?;
    measure(dispatcher, &case.input, &case.expected, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{save_values, EXPECTED_FILE, INPUT_FILE};
    use tempfile::TempDir;

    #[test]
    fn test_verify_numeric_equivalence() {
        assert!(verify(&[Value::Int(1)], &[Value::Float(1.0)]).is_match());
        assert!(verify(&[Value::Float(f64::NAN)], &[Value::Float(f64::NAN)]).is_match());
        assert!(verify(&[Value::Float(-0.0)], &[Value::Float(0.0)]).is_match());
        assert!(!verify(&[Value::from("1")], &[Value::Int(1)]).is_match());
    }

    #[test]
    fn test_verify_reports_first_mismatch() {
        let actual = vec![Value::Int(1), Value::Int(3), Value::Int(2)];
        let expected = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(
            verify(&actual, &expected),
            Verification::ValueMismatch {
                index: 1,
                actual: Value::Int(3),
                expected: Value::Int(2),
            }
        );
        assert_eq!(
            verify(&actual[..2], &expected),
            Verification::LengthMismatch { actual: 2, expected: 3 }
        );
    }

    #[test]
    fn test_is_non_decreasing() {
        assert!(is_non_decreasing(&[]));
        assert!(is_non_decreasing(&[Value::Int(1), Value::Float(1.0), Value::from("a")]));
        assert!(!is_non_decreasing(&[Value::from("a"), Value::Int(1)]));
    }

    #[test]
    fn test_measure_case() -> SortResult<()> {
        let dir = TempDir::new()?;
        let input = vec![Value::Int(5), Value::Int(1), Value::Int(4)];
        let expected = vec![Value::Int(1), Value::Int(4), Value::Int(5)];
        save_values(&dir.path().join(INPUT_FILE), &input)?;
        save_values(&dir.path().join(EXPECTED_FILE), &expected)?;

        let measurement = measure_case(dir.path(), 3, &Dispatcher::default())?;
        assert!(measurement.is_valid());
        assert_eq!(measurement.len, 3);
        assert_eq!(measurement.plan, SortPlan::IntegerRadix);
        assert_eq!(measurement.iterations, 3);
        assert!(measurement.mean() <= measurement.total);
        Ok(())
    }

    #[test]
    fn test_mean_over_large_iteration_counts() {
        let measurement = |iterations: usize| Measurement {
            len: 0,
            plan: SortPlan::Trivial,
            iterations,
            total: Duration::from_secs(8),
            verification: Verification::Match,
        };
        assert_eq!(measurement(4).mean(), Duration::from_secs(2));
        assert_eq!(measurement(0).mean(), Duration::ZERO);

        // Counts past u32::MAX must not wrap to a zero divisor.
        let huge = usize::MAX;
        assert!(measurement(huge).mean() < Duration::from_micros(1));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(measurement(1 << 32).mean(), Duration::from_secs(8).div_f64(4294967296.0));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = measure(&Dispatcher::default(), &[], &[], 0);
        assert!(matches!(result, Err(SortError::InvalidConfig { .. })));
    }
}
