//! Three-way (Dutch national flag) quicksort for byte-string keys
//!
//! Keys are compared byte-wise through `AsRef<[u8]>`, so `String`, `&str`
//! and `Vec<u8>` all sort the same way. Large inputs split once on the
//! calling thread and sort the three resulting ranges as rayon tasks;
//! everything below that first split is sequential.

use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use log::{debug, trace};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::cmp::Ordering;
use std::ops::Range;

/// Result of one three-way partition over a slice of length `len`.
///
/// `[0, lt)` holds keys below the pivot, `[lt, gt)` keys equal to it and
/// `[gt, len)` keys above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub lt: usize,
    pub gt: usize,
}

impl Partition {
    pub fn less(&self) -> Range<usize> {
        0..self.lt
    }

    pub fn equal(&self) -> Range<usize> {
        self.lt..self.gt
    }

    pub fn greater(&self, len: usize) -> Range<usize> {
        self.gt..len
    }
}

/// Insertion sort for short ranges
pub fn insertion_sort<S: AsRef<[u8]>>(values: &mut [S]) {
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 && values[j - 1].as_ref() > values[j].as_ref() {
            values.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Order the first, middle and last keys with three compare-and-swaps so
/// the median lands in the middle. Returns the middle index.
pub fn median_of_three<S: AsRef<[u8]>>(values: &mut [S]) -> usize {
    let mid = values.len() / 2;
    if values.is_empty() {
        return mid;
    }
    let last = values.len() - 1;

    if values[last].as_ref() < values[0].as_ref() {
        values.swap(0, last);
    }
    if values[mid].as_ref() < values[0].as_ref() {
        values.swap(0, mid);
    }
    if values[last].as_ref() < values[mid].as_ref() {
        values.swap(mid, last);
    }
    mid
}

/// Partition `values` around the key at `pivot` into less / equal /
/// greater regions in a single scan.
pub fn partition_three_way<S: AsRef<[u8]>>(values: &mut [S], pivot: usize) -> Partition {
    if values.is_empty() {
        return Partition { lt: 0, gt: 0 };
    }

    // values[lt] is always a pivot-equal key: [lt, i) is never empty.
    values.swap(0, pivot);
    let mut lt = 0;
    let mut i = 1;
    let mut gt = values.len();

    while i < gt {
        match values[i].as_ref().cmp(values[lt].as_ref()) {
            Ordering::Less => {
                values.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                values.swap(i, gt);
            }
            Ordering::Equal => {
                i += 1;
            }
        }
    }

    Partition { lt, gt }
}

/// Sequential three-way quicksort.
///
/// Recurses into the smaller unequal side and loops on the larger one, so
/// stack depth stays logarithmic even on adversarial input.
pub fn quicksort_sequential<S: AsRef<[u8]>>(values: &mut [S], insertion_threshold: usize) {
    let mut values = values;
    loop {
        if values.len() <= insertion_threshold.max(1) {
            insertion_sort(values);
            return;
        }

        let pivot = median_of_three(values);
        let partition = partition_three_way(values, pivot);

        let (less, rest) = std::mem::take(&mut values).split_at_mut(partition.lt);
        let greater = &mut rest[partition.gt - partition.lt..];

        if less.len() < greater.len() {
            quicksort_sequential(less, insertion_threshold);
            values = greater;
        } else {
            quicksort_sequential(greater, insertion_threshold);
            values = less;
        }
    }
}

/// Whether a sort of `len` keys splits across workers: at least two
/// workers, and each worker's share strictly exceeds `parallel_grain`.
pub fn fans_out(len: usize, config: &SortConfig) -> bool {
    let workers = config.effective_parallelism();
    workers >= 2 && len / workers > config.parallel_grain
}

/// String sorter bound to one configuration.
///
/// An explicit `parallelism` of two or more gets a dedicated rayon pool,
/// built once here and reused by every [`StringSorter::sort`] call.
/// Without one, fan-out runs on the global rayon pool.
pub struct StringSorter {
    config: SortConfig,
    pool: Option<ThreadPool>,
}

impl StringSorter {
    pub fn new(config: SortConfig) -> SortResult<Self> {
        config.validate()?;
        let pool = match config.parallelism {
            Some(threads) if threads >= 2 => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("polysort-{i}"))
                    .build()
                    .map_err(|e| SortError::thread_pool(&e.to_string()))?,
            ),
            _ => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Dedicated worker pool, if the configuration asked for one.
    pub fn pool(&self) -> Option<&ThreadPool> {
        self.pool.as_ref()
    }

    /// Sort byte-string keys ascending in place.
    ///
    /// Returns once all three sub-sorts have joined.
    pub fn sort<S: AsRef<[u8]> + Send>(&self, values: &mut [S]) -> SortResult<()> {
        if values.len() < 2 {
            return Ok(());
        }

        let threshold = self.config.insertion_threshold;
        if !fans_out(values.len(), &self.config) {
            debug!(
                "sequential string sort: {} keys, {} workers, grain {}",
                values.len(),
                self.config.effective_parallelism(),
                self.config.parallel_grain
            );
            quicksort_sequential(values, threshold);
            return Ok(());
        }

        debug!(
            "parallel string sort: {} keys across {} workers",
            values.len(),
            self.config.effective_parallelism()
        );
        match &self.pool {
            Some(pool) => pool.install(|| fan_out(values, threshold)),
            None => fan_out(values, threshold),
        }
        Ok(())
    }
}

impl Default for StringSorter {
    fn default() -> Self {
        Self {
            config: SortConfig::default(),
            pool: None,
        }
    }
}

/// Sort byte-string keys ascending in place with the default configuration.
pub fn sort_strings<S: AsRef<[u8]> + Send>(values: &mut [S]) -> SortResult<()> {
    StringSorter::default().sort(values)
}

/// Sort byte-string keys ascending in place under `config`.
///
/// A dedicated pool is only built when this call actually fans out, and
/// is dropped on return. Hold a [`StringSorter`] to sort repeatedly.
pub fn sort_strings_with<S: AsRef<[u8]> + Send>(
    values: &mut [S],
    config: &SortConfig,
) -> SortResult<()> {
    config.validate()?;
    if values.len() < 2 {
        return Ok(());
    }
    if !fans_out(values.len(), config) {
        quicksort_sequential(values, config.insertion_threshold);
        return Ok(());
    }
    StringSorter::new(config.clone())?.sort(values)
}

/// Split once, then sort the three disjoint ranges concurrently.
fn fan_out<S: AsRef<[u8]> + Send>(values: &mut [S], insertion_threshold: usize) {
    let pivot = median_of_three(values);
    let partition = partition_three_way(values, pivot);
    trace!(
        "top-level split: less={} equal={} greater={}",
        partition.lt,
        partition.gt - partition.lt,
        values.len() - partition.gt
    );

    let (less, rest) = values.split_at_mut(partition.lt);
    let (equal, greater) = rest.split_at_mut(partition.gt - partition.lt);

    rayon::scope(|s| {
        s.spawn(move |_| quicksort_sequential(less, insertion_threshold));
        s.spawn(move |_| quicksort_sequential(equal, insertion_threshold));
        s.spawn(move |_| quicksort_sequential(greater, insertion_threshold));
    });
}
