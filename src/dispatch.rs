//! Type dispatch for dynamically typed sequences
//!
//! A sequence is classified once per call. Homogeneous ints, floats and
//! strings go to their fast path; anything else goes to the configured
//! [`FallbackSort`], or fails with [`SortError::UnsupportedType`] when no
//! fallback is installed. The input slice is never modified: a new,
//! sorted `Vec` of the same variants is returned.

use crate::config::SortConfig;
use crate::error::{try_reserve, SortError, SortResult};
use crate::fallback::{ComparatorFallback, FallbackSort};
use crate::keys::SignedKey;
use crate::radix_sort;
use crate::three_way::StringSorter;
use crate::value::Value;
use itertools::Itertools;
use log::debug;
use std::mem::discriminant;

/// Which kernel a sequence is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPlan {
    /// Fewer than two elements; returned unchanged.
    Trivial,
    IntegerRadix,
    FloatRadix,
    StringQuicksort,
    Fallback,
}

/// Pick the kernel for `values`.
pub fn classify(values: &[Value]) -> SortPlan {
    let first = match values {
        [] | [_] => return SortPlan::Trivial,
        [first, ..] => first,
    };

    let kind = discriminant(first);
    if !values.iter().all(|v| discriminant(v) == kind) {
        return SortPlan::Fallback;
    }

    match first {
        Value::Int(_) => SortPlan::IntegerRadix,
        Value::Float(_) => SortPlan::FloatRadix,
        Value::Str(_) => SortPlan::StringQuicksort,
        Value::Bool(_) | Value::Null => SortPlan::Fallback,
    }
}

/// Human-readable element type of a sequence, e.g. `bool` or
/// `mixed(int, string)`.
pub fn describe_element_type(values: &[Value]) -> String {
    let names: Vec<&str> = values.iter().map(Value::type_name).unique().collect();
    match names.as_slice() {
        [] => "empty".to_string(),
        [single] => single.to_string(),
        many => format!("mixed({})", many.iter().join(", ")),
    }
}

/// Entry point routing sequences to the type-specific kernels.
pub struct Dispatcher {
    config: SortConfig,
    strings: StringSorter,
    fallback: Option<Box<dyn FallbackSort>>,
}

impl Dispatcher {
    /// Build a dispatcher; installs [`ComparatorFallback`] unless the
    /// configuration disables fallback. A dedicated string-sort pool, if
    /// configured, is created here and shared by every later call.
    pub fn new(config: SortConfig) -> SortResult<Self> {
        let strings = StringSorter::new(config.clone())?;
        let fallback: Option<Box<dyn FallbackSort>> = if config.use_fallback {
            Some(Box::new(ComparatorFallback))
        } else {
            None
        };
        Ok(Self {
            config,
            strings,
            fallback,
        })
    }

    /// Replace the fallback sort.
    pub fn with_fallback(mut self, fallback: Box<dyn FallbackSort>) -> Self {
        self.config.use_fallback = true;
        self.fallback = Some(fallback);
        self
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn string_sorter(&self) -> &StringSorter {
        &self.strings
    }

    /// Sort a dynamically typed sequence into a new `Vec`.
    pub fn sort(&self, values: &[Value]) -> SortResult<Vec<Value>> {
        let plan = classify(values);
        debug!("dispatching {} values to {:?}", values.len(), plan);

        match plan {
            SortPlan::Trivial => Ok(values.to_vec()),
            SortPlan::IntegerRadix => {
                let mut ints: Vec<i64> = Vec::new();
                try_reserve(&mut ints, values.len())?;
                ints.extend(values.iter().filter_map(Value::as_int));
                radix_sort::sort_integers(&mut ints)?;
                Ok(ints.into_iter().map(Value::Int).collect())
            }
            SortPlan::FloatRadix => {
                let mut floats: Vec<f64> = Vec::new();
                try_reserve(&mut floats, values.len())?;
                floats.extend(values.iter().filter_map(Value::as_float));
                radix_sort::sort_floats(&mut floats)?;
                Ok(floats.into_iter().map(Value::Float).collect())
            }
            SortPlan::StringQuicksort => {
                // Sort borrowed keys; only the final output is cloned.
                let mut keys: Vec<&str> = Vec::new();
                try_reserve(&mut keys, values.len())?;
                keys.extend(values.iter().filter_map(Value::as_str));
                self.strings.sort(&mut keys)?;
                Ok(keys.into_iter().map(Value::from).collect())
            }
            SortPlan::Fallback => match &self.fallback {
                Some(fallback) => {
                    debug!(
                        "no fast path for {}, using fallback sort",
                        describe_element_type(values)
                    );
                    let mut sorted = values.to_vec();
                    fallback.sort_values(&mut sorted);
                    Ok(sorted)
                }
                None => Err(SortError::unsupported_type(&describe_element_type(values))),
            },
        }
    }

    /// Sort fixed-width signed integers in place.
    pub fn sort_integers<T: SignedKey>(&self, values: &mut [T]) -> SortResult<()> {
        radix_sort::sort_integers(values)
    }

    /// Sort floats in place.
    pub fn sort_floats(&self, values: &mut [f64]) -> SortResult<()> {
        radix_sort::sort_floats(values)
    }

    /// Sort byte strings in place using this dispatcher's parallel settings.
    pub fn sort_strings<S: AsRef<[u8]> + Send>(&self, values: &mut [S]) -> SortResult<()> {
        self.strings.sort(values)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            config: SortConfig::default(),
            strings: StringSorter::default(),
            fallback: Some(Box::new(ComparatorFallback)),
        }
    }
}

/// Sort a dynamically typed sequence with the default configuration.
pub fn sort(values: &[Value]) -> SortResult<Vec<Value>> {
    Dispatcher::default().sort(values)
}
