//! Order-preserving bit transforms
//!
//! Maps floats and signed integers onto unsigned keys so that ascending
//! unsigned order equals the natural ascending order of the source domain.
//! The radix kernel only ever sees the unsigned side.

const SIGN_BIT: u64 = 1 << 63;

/// Encode an `f64` as an order-preserving `u64` key.
///
/// Negative values have every bit inverted, which reverses their
/// magnitude order and clears the sign bit. Non-negative values get the
/// sign bit set, lifting them above every negative key. The resulting
/// order is `-NaN < -inf < .. < -0.0 < +0.0 < .. < +inf < +NaN`.
#[inline]
pub fn encode_float_key(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & SIGN_BIT != 0 {
        !bits
    } else {
        bits | SIGN_BIT
    }
}

/// Exact inverse of [`encode_float_key`], bit for bit.
#[inline]
pub fn decode_float_key(key: u64) -> f64 {
    let bits = if key & SIGN_BIT != 0 {
        key & !SIGN_BIT
    } else {
        !key
    };
    f64::from_bits(bits)
}

/// Fixed-width signed integers that can be widened to `i64` and back
/// without loss.
pub trait SignedKey: Copy + Ord + Send + Sync {
    const BITS: u32;

    fn to_i64(self) -> i64;

    /// Narrow back to the declared width. Only called with values that
    /// originally came from `to_i64` on the same type.
    fn from_i64(value: i64) -> Self;
}

macro_rules! impl_signed_key {
    ($($t:ty),*) => {
        $(
            impl SignedKey for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn to_i64(self) -> i64 {
                    self as i64
                }

                #[inline]
                fn from_i64(value: i64) -> Self {
                    debug_assert!(value >= <$t>::MIN as i64 && value <= <$t>::MAX as i64);
                    value as $t
                }
            }
        )*
    };
}

impl_signed_key!(i8, i16, i32, i64, isize);

/// Shift `x` by `-min` so the sequence minimum maps to key 0.
///
/// The difference of two `i64` values with `x >= min` always fits in a
/// `u64`, so the wrapping subtraction is exact.
#[inline]
pub fn encode_signed_key<T: SignedKey>(x: T, min: T) -> u64 {
    debug_assert!(x >= min);
    x.to_i64().wrapping_sub(min.to_i64()) as u64
}

/// Undo [`encode_signed_key`] with the same `min`.
#[inline]
pub fn decode_signed_key<T: SignedKey>(key: u64, min: T) -> T {
    T::from_i64(min.to_i64().wrapping_add(key as i64))
}
