//! Comparator-based sort for sequences no fast path accepts
//!
//! Ordering rule: values are grouped by class name, where `int` and
//! `float` share the class `number`. Classes order by name
//! (`bool < null < number < string`). Inside `number`, ints and floats
//! compare exactly by numeric value; strings compare byte-wise; `false`
//! sorts before `true`.

use crate::value::Value;
use std::cmp::Ordering;

/// 2^63, the first float above every `i64`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// A total order over [`Value`]s, used when dispatch finds no fast path.
pub trait FallbackSort: Send + Sync {
    fn sort_values(&self, values: &mut [Value]);
}

/// Stable merge sort driven by [`compare_values`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ComparatorFallback;

impl FallbackSort for ComparatorFallback {
    fn sort_values(&self, values: &mut [Value]) {
        values.sort_by(compare_values);
    }
}

/// Name used to order values of different classes.
pub fn class_name(value: &Value) -> &'static str {
    if value.is_numeric() {
        "number"
    } else {
        value.type_name()
    }
}

/// Total order used by the fallback sort.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let by_class = class_name(a).cmp(class_name(b));
    if by_class != Ordering::Equal {
        return by_class;
    }

    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::Str(x), Value::Str(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Numeric order with `-0.0 == 0.0`; NaNs sit past the infinities on
/// the side of their sign bit.
fn compare_floats(x: f64, y: f64) -> Ordering {
    if x.is_nan() || y.is_nan() {
        return x.total_cmp(&y);
    }
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Exact comparison of an `i64` with an `f64`, without rounding the
/// integer through a float.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return (i as f64).total_cmp(&f);
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f).unwrap_or(Ordering::Equal),
        other => other,
    }
}
