//! Polymorphic sorting engine
//!
//! Picks a sorting strategy from the element type of the input:
//! order-preserving bit transforms plus an LSB-first radix sort for
//! signed integers and `f64`, a parallel three-way quicksort for byte
//! strings, and a comparator fallback for mixed or unrecognized
//! sequences.
//!
//! ```
//! use polysort::{sort, Value};
//!
//! let input = vec![Value::Int(3), Value::from("a"), Value::Float(2.5), Value::Int(1)];
//! let sorted = sort(&input).unwrap();
//! assert_eq!(sorted, vec![Value::Int(1), Value::Float(2.5), Value::Int(3), Value::from("a")]);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

// Sorting kernels
pub mod keys;
pub mod radix_sort;
pub mod three_way;

// Dynamic dispatch
pub mod value;
pub mod fallback;
pub mod dispatch;

// Test data and measurement
pub mod dataset;
pub mod measure;
pub mod generate;

// Re-export commonly used types
pub use config::{SortConfig, SortConfigBuilder};
pub use dispatch::{classify, sort, Dispatcher, SortPlan};
pub use error::{SortError, SortResult};
pub use fallback::{ComparatorFallback, FallbackSort};
pub use radix_sort::{sort_floats, sort_integers, sort_unsigned};
pub use three_way::{sort_strings, sort_strings_with, StringSorter};
pub use value::Value;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;
