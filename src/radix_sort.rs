//! LSB-first byte-wise radix sort over unsigned keys
//!
//! Integers and floats are mapped onto unsigned keys by [`crate::keys`],
//! sorted here with one stable counting pass per byte, and mapped back.
//! Every buffer a sort needs is reserved before the caller's slice is
//! written, so an allocation failure leaves the input untouched.

use crate::error::{try_reserve, SortResult};
use crate::keys::{decode_float_key, decode_signed_key, encode_float_key, encode_signed_key, SignedKey};

const RADIX: usize = 256;
const MAX_KEY_BYTES: usize = 8;

/// Fixed-width unsigned key digestible by [`RadixSorter`].
pub trait RadixKey: Copy + Default + Ord + Send {
    /// Number of 8-bit digits, i.e. passes.
    const BYTES: usize;

    /// Digit `pass`, counting from the least significant byte.
    fn byte(self, pass: usize) -> usize;
}

macro_rules! impl_radix_key {
    ($($t:ty),*) => {
        $(
            impl RadixKey for $t {
                const BYTES: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn byte(self, pass: usize) -> usize {
                    ((self >> (pass * 8)) & 0xFF) as usize
                }
            }
        )*
    };
}

impl_radix_key!(u8, u16, u32, u64);

/// Radix sorter owning its scratch buffer.
///
/// The scratch is allocated up front by [`RadixSorter::with_capacity`];
/// sorting a slice no longer than that capacity performs no allocation.
pub struct RadixSorter<K> {
    scratch: Vec<K>,
}

impl<K: RadixKey> RadixSorter<K> {
    /// Reserve scratch space for slices of up to `len` keys.
    pub fn with_capacity(len: usize) -> SortResult<Self> {
        let mut scratch = Vec::new();
        try_reserve(&mut scratch, len)?;
        scratch.resize(len, K::default());
        Ok(Self { scratch })
    }

    /// Largest slice this sorter handles without growing its scratch.
    pub fn capacity(&self) -> usize {
        self.scratch.len()
    }

    /// Sort `keys` ascending.
    ///
    /// Grows the scratch first if `keys` is longer than the current
    /// capacity; on failure `keys` has not been modified.
    pub fn sort(&mut self, keys: &mut [K]) -> SortResult<()> {
        let n = keys.len();
        if n < 2 {
            return Ok(());
        }
        if n > self.scratch.len() {
            let additional = n - self.scratch.len();
            try_reserve(&mut self.scratch, additional)?;
            self.scratch.resize(n, K::default());
        }

        // Digit histograms do not depend on key order, so one read of the
        // input serves every pass.
        let mut counts = [[0usize; RADIX]; MAX_KEY_BYTES];
        for &key in keys.iter() {
            for (pass, histogram) in counts.iter_mut().enumerate().take(K::BYTES) {
                histogram[key.byte(pass)] += 1;
            }
        }

        let scratch = &mut self.scratch[..n];
        let mut in_scratch = false;
        for (pass, histogram) in counts.iter().enumerate().take(K::BYTES) {
            // Every key shares this digit: the pass would be the identity.
            if histogram.iter().any(|&count| count == n) {
                continue;
            }

            let mut offsets = [0usize; RADIX];
            let mut running = 0;
            for (offset, &count) in offsets.iter_mut().zip(histogram.iter()) {
                *offset = running;
                running += count;
            }

            if in_scratch {
                scatter(scratch, keys, pass, &mut offsets);
            } else {
                scatter(keys, scratch, pass, &mut offsets);
            }
            in_scratch = !in_scratch;
        }

        if in_scratch {
            keys.copy_from_slice(scratch);
        }
        Ok(())
    }
}

/// Stable placement of `src` into `dst` by digit `pass`.
#[inline]
fn scatter<K: RadixKey>(src: &[K], dst: &mut [K], pass: usize, offsets: &mut [usize; RADIX]) {
    for &key in src {
        let digit = key.byte(pass);
        dst[offsets[digit]] = key;
        offsets[digit] += 1;
    }
}

/// Sort unsigned keys ascending in place.
pub fn sort_unsigned<K: RadixKey>(keys: &mut [K]) -> SortResult<()> {
    if keys.len() < 2 {
        return Ok(());
    }
    RadixSorter::with_capacity(keys.len())?.sort(keys)
}

/// Sort signed integers of any width ascending in place.
///
/// Values are shifted by the slice minimum into 64-bit unsigned keys,
/// radix sorted, then shifted back to their declared width. Narrow value
/// ranges leave the high digits constant, and those passes are skipped.
pub fn sort_integers<T: SignedKey>(values: &mut [T]) -> SortResult<()> {
    let min = match values.iter().min() {
        Some(&min) if values.len() >= 2 => min,
        _ => return Ok(()),
    };

    let mut keys: Vec<u64> = Vec::new();
    try_reserve(&mut keys, values.len())?;
    let mut sorter = RadixSorter::with_capacity(values.len())?;

    keys.extend(values.iter().map(|&v| encode_signed_key(v, min)));
    sorter.sort(&mut keys)?;

    for (slot, &key) in values.iter_mut().zip(keys.iter()) {
        *slot = decode_signed_key(key, min);
    }
    Ok(())
}

/// Sort `f64` values ascending in place.
///
/// `-0.0` sorts directly before `+0.0`. NaNs are kept, bit for bit, at
/// the ends of the slice according to their sign bit.
pub fn sort_floats(values: &mut [f64]) -> SortResult<()> {
    if values.len() < 2 {
        return Ok(());
    }

    let mut keys: Vec<u64> = Vec::new();
    try_reserve(&mut keys, values.len())?;
    let mut sorter = RadixSorter::with_capacity(values.len())?;

    keys.extend(values.iter().map(|&v| encode_float_key(v)));
    sorter.sort(&mut keys)?;

    for (slot, &key) in values.iter_mut().zip(keys.iter()) {
        *slot = decode_float_key(key);
    }
    Ok(())
}
