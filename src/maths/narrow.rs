//! Fixed-width unsigned arithmetic

use crate::maths::{Breach, Fail, NarrowError, OverflowPolicy, ParseNarrowError, Policy, Result, Saturate, Wrap};
use num_traits::{
    Bounded, CheckedAdd, CheckedDiv, CheckedMul, CheckedRem, CheckedShl, CheckedShr, CheckedSub,
    Num, One,
    SaturatingAdd, SaturatingMul, SaturatingSub, WrappingAdd, WrappingMul, WrappingSub, Zero,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::marker::PhantomData;
use std::num::TryFromIntError;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};
use std::result;
use std::str::FromStr;

/// An unsigned integer exactly `N` bits wide.
///
/// `N` may be anything from 1 to 64; instantiating any other width is a
/// compile error. The value is stored in a `u64` and never exceeds
/// `Self::MAX`.
///
/// `P` selects what happens when construction, assignment, or arithmetic
/// produces a value outside `0..=MAX`: see `Wrap`, `Saturate`, and `Fail`.
/// Each operation comes in two forms:
///
///  * `try_*` methods, which return `NarrowError` when the policy refuses a
///    result or a division by zero is attempted. On error the receiver is left
///    unchanged.
///  * The operator traits (`+`, `-=`, and so on), which behave like the
///    primitive integers do: they panic where the `try_*` form would error.
///    With `Wrap` or `Saturate` this can only happen for division by zero.
///
/// Bitwise operators (including shifts) always truncate to `N` bits and never
/// consult the policy.
///
/// Arithmetic and comparison operators also accept any primitive unsigned
/// integer on either side. The primitive is widened rather than truncated, and
/// the narrow type is always the result.
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64", bound = "P: Policy")]
pub struct NarrowInt<const N: u32, P = Wrap> {
    v: u64,
    policy: PhantomData<P>,
}

impl<const N: u32, P> Clone for NarrowInt<N, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const N: u32, P> Copy for NarrowInt<N, P> {}

/// Compile-time proof that one width can hold another.
struct Widening<const FROM: u32, const TO: u32>;

impl<const FROM: u32, const TO: u32> Widening<FROM, TO> {
    const OK: () = assert!(FROM <= TO, "zero extension cannot narrow an integer");
}

/// Unwraps the result of a panicking operator form.
///
/// This is the only place a narrow integer operation panics.
#[inline]
#[track_caller]
fn or_panic<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

impl<const N: u32, P> NarrowInt<N, P> {
    const WIDTH_OK: () = assert!(N >= 1 && N <= 64, "narrow integers must be 1 to 64 bits wide");

    /// The width of this type, in bits.
    pub const BITS: u32 = N;

    /// The largest representable value, `2^N - 1`.
    pub const MAX: u64 = if N >= 64 { u64::MAX } else { (1 << N) - 1 };

    /// Mask selecting the bits this type can hold. Identical to `MAX`.
    pub const MASK: u64 = Self::MAX;

    pub const ZERO: Self = {
        let () = Self::WIDTH_OK;

        NarrowInt {
            v: 0,
            policy: PhantomData,
        }
    };

    /// Construct a value by keeping only the low `N` bits of `v`.
    ///
    /// This ignores the overflow policy; it is the truncating extraction used
    /// when unpacking bit fields.
    #[inline]
    pub const fn from_masked(v: u64) -> Self {
        let () = Self::WIDTH_OK;

        NarrowInt {
            v: v & Self::MASK,
            policy: PhantomData,
        }
    }

    /// The stored value, zero-extended to 64 bits.
    #[inline]
    pub const fn value(self) -> u64 {
        self.v
    }

    /// Reinterpret this value under a different overflow policy.
    pub fn into_policy<Q>(self) -> NarrowInt<N, Q> {
        NarrowInt::from_masked(self.v)
    }

    /// Widen into a type of at least the same width.
    pub fn zero_extend<const M: u32>(self) -> NarrowInt<M, P> {
        let () = Widening::<N, M>::OK;

        NarrowInt::from_masked(self.v)
    }

    /// Keep only the low `M` bits.
    pub fn truncate<const M: u32>(self) -> NarrowInt<M, P> {
        NarrowInt::from_masked(self.v)
    }

    /// Test bit `i`. Bits at or above `N` are always clear.
    pub fn bit(self, i: u32) -> bool {
        i < N && (self.v >> i) & 1 == 1
    }

    /// Copy of this value with bit `i` set or cleared. Bits at or above `N`
    /// do not exist and are ignored.
    pub fn with_bit(self, i: u32, set: bool) -> Self {
        if i >= N {
            return self;
        }

        if set {
            Self::from_masked(self.v | (1 << i))
        } else {
            Self::from_masked(self.v & !(1 << i))
        }
    }

    pub fn count_ones(self) -> u32 {
        self.v.count_ones()
    }

    /// Number of zero bits within the `N`-bit width.
    pub fn count_zeros(self) -> u32 {
        N - self.v.count_ones()
    }

    /// Number of leading zero bits within the `N`-bit width.
    pub fn leading_zeros(self) -> u32 {
        self.v.leading_zeros() - (64 - N)
    }

    pub fn rotate_left(self, n: u32) -> Self {
        let n = n % N;
        if n == 0 {
            return self;
        }

        Self::from_masked((self.v << n) | (self.v >> (N - n)))
    }

    pub fn rotate_right(self, n: u32) -> Self {
        self.rotate_left(N - n % N)
    }

    fn shifted_left(self, amount: u128) -> Self {
        if amount >= 64 {
            return Self::ZERO;
        }

        Self::from_masked(self.v << amount)
    }

    fn shifted_right(self, amount: u128) -> Self {
        if amount >= 64 {
            return Self::ZERO;
        }

        Self::from_masked(self.v >> amount)
    }

    /// Reduce a wide, non-negative result under policy `Q`.
    ///
    /// `carried` indicates the result already overflowed `u128`, in which case
    /// `wide` holds it modulo `2^128`.
    fn settle<Q: Policy>(wide: u128, carried: bool) -> Option<u64> {
        if !carried && wide <= Self::MAX as u128 {
            return Some(wide as u64);
        }

        Q::resolve(Breach::Overflow, wide as u64 & Self::MASK, Self::MAX)
    }

    fn add_raw<Q: Policy>(lhs: u128, rhs: u128) -> Result<u64> {
        let (sum, carried) = lhs.overflowing_add(rhs);

        Self::settle::<Q>(sum, carried).ok_or(NarrowError::Overflow { bits: N })
    }

    fn sub_raw<Q: Policy>(lhs: u128, rhs: u128) -> Result<u64> {
        if lhs >= rhs {
            return Self::settle::<Q>(lhs - rhs, false).ok_or(NarrowError::Overflow { bits: N });
        }

        let wrapped = lhs.wrapping_sub(rhs) as u64 & Self::MASK;
        Q::resolve(Breach::Underflow, wrapped, Self::MAX).ok_or(NarrowError::Underflow { bits: N })
    }

    fn mul_raw<Q: Policy>(lhs: u128, rhs: u128) -> Result<u64> {
        let (product, carried) = lhs.overflowing_mul(rhs);

        Self::settle::<Q>(product, carried).ok_or(NarrowError::Overflow { bits: N })
    }

    fn div_raw<Q: Policy>(lhs: u128, rhs: u128) -> Result<u64> {
        if rhs == 0 {
            return Err(NarrowError::DivisionByZero);
        }

        Self::settle::<Q>(lhs / rhs, false).ok_or(NarrowError::Overflow { bits: N })
    }

    fn rem_raw<Q: Policy>(lhs: u128, rhs: u128) -> Result<u64> {
        if rhs == 0 {
            return Err(NarrowError::DivisionByZero);
        }

        Self::settle::<Q>(lhs % rhs, false).ok_or(NarrowError::Overflow { bits: N })
    }
}

impl<const N: u32, P: Policy> NarrowInt<N, P> {
    /// The overflow policy this type was instantiated with.
    pub fn policy() -> OverflowPolicy {
        P::KIND
    }

    /// Construct a value, applying the overflow policy if `v` is too wide.
    ///
    /// # Panics
    ///
    /// Panics under the `Fail` policy if `v > MAX`. Use `try_new` to handle
    /// that case.
    #[track_caller]
    pub fn new(v: u64) -> Self {
        or_panic(Self::try_new(v))
    }

    /// Construct a value, applying the overflow policy if `v` is too wide.
    ///
    /// Only the `Fail` policy returns an error, `OutOfRange`.
    pub fn try_new(v: u64) -> Result<Self> {
        Self::try_new_wide(v as u128)
    }

    fn try_new_wide(v: u128) -> Result<Self> {
        let () = Self::WIDTH_OK;

        if v <= Self::MAX as u128 {
            return Ok(Self::from_masked(v as u64));
        }

        P::resolve(Breach::Overflow, v as u64 & Self::MASK, Self::MAX)
            .map(Self::from_masked)
            .ok_or(NarrowError::OutOfRange { value: v, bits: N })
    }

    /// Assign a new value under the same rules as `new`.
    #[track_caller]
    pub fn set(&mut self, v: u64) {
        *self = Self::new(v);
    }

    /// Assign a new value under the same rules as `try_new`. The receiver is
    /// unchanged on error.
    pub fn try_set(&mut self, v: u64) -> Result<()> {
        *self = Self::try_new(v)?;
        Ok(())
    }

    fn add_wide(lhs: u128, rhs: u128) -> Result<Self> {
        Self::add_raw::<P>(lhs, rhs).map(Self::from_masked)
    }

    fn sub_wide(lhs: u128, rhs: u128) -> Result<Self> {
        Self::sub_raw::<P>(lhs, rhs).map(Self::from_masked)
    }

    fn mul_wide(lhs: u128, rhs: u128) -> Result<Self> {
        Self::mul_raw::<P>(lhs, rhs).map(Self::from_masked)
    }

    fn div_wide(lhs: u128, rhs: u128) -> Result<Self> {
        Self::div_raw::<P>(lhs, rhs).map(Self::from_masked)
    }

    fn rem_wide(lhs: u128, rhs: u128) -> Result<Self> {
        Self::rem_raw::<P>(lhs, rhs).map(Self::from_masked)
    }

    pub fn try_add(self, rhs: Self) -> Result<Self> {
        Self::add_wide(self.v as u128, rhs.v as u128)
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self> {
        Self::sub_wide(self.v as u128, rhs.v as u128)
    }

    pub fn try_mul(self, rhs: Self) -> Result<Self> {
        Self::mul_wide(self.v as u128, rhs.v as u128)
    }

    /// Divide, failing with `DivisionByZero` under every policy.
    pub fn try_div(self, rhs: Self) -> Result<Self> {
        Self::div_wide(self.v as u128, rhs.v as u128)
    }

    /// Remainder, failing with `DivisionByZero` under every policy.
    pub fn try_rem(self, rhs: Self) -> Result<Self> {
        Self::rem_wide(self.v as u128, rhs.v as u128)
    }

    /// Negate within the unsigned domain.
    ///
    /// Under `Wrap` this is the two's complement `(2^N - v) mod 2^N`. Any
    /// nonzero value underflows, so `Saturate` yields zero and `Fail` errors.
    pub fn try_neg(self) -> Result<Self> {
        Self::sub_wide(0, self.v as u128)
    }

    pub fn try_add_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.try_add(rhs)?;
        Ok(())
    }

    pub fn try_sub_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.try_sub(rhs)?;
        Ok(())
    }

    pub fn try_mul_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.try_mul(rhs)?;
        Ok(())
    }

    pub fn try_div_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.try_div(rhs)?;
        Ok(())
    }

    pub fn try_rem_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.try_rem(rhs)?;
        Ok(())
    }

    /// Add one in place; `MAX` overflows according to the policy.
    pub fn try_increment(&mut self) -> Result<()> {
        *self = Self::add_wide(self.v as u128, 1)?;
        Ok(())
    }

    /// Subtract one in place; zero underflows according to the policy.
    pub fn try_decrement(&mut self) -> Result<()> {
        *self = Self::sub_wide(self.v as u128, 1)?;
        Ok(())
    }

    #[track_caller]
    pub fn increment(&mut self) {
        or_panic(self.try_increment())
    }

    #[track_caller]
    pub fn decrement(&mut self) {
        or_panic(self.try_decrement())
    }
}

impl<const N: u32, P> Default for NarrowInt<N, P> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: u32, P> fmt::Debug for NarrowInt<N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}u{}", self.v, N)
    }
}

fmt_forward_impl!(Display, LowerHex, UpperHex, Binary, Octal);

impl<const N: u32, P: Policy> FromStr for NarrowInt<N, P> {
    type Err = ParseNarrowError;

    /// Parse a decimal literal, or a hex/binary/octal one with a `0x`, `0b`,
    /// or `0o` prefix. Underscores are not accepted.
    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            (hex, 16)
        } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
            (bin, 2)
        } else if let Some(oct) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
            (oct, 8)
        } else {
            (s, 10)
        };

        Self::from_str_radix(digits, radix)
    }
}

impl<const N: u32, P> From<NarrowInt<N, P>> for u64 {
    fn from(t: NarrowInt<N, P>) -> Self {
        t.v
    }
}

impl<const N: u32, P> From<NarrowInt<N, P>> for u128 {
    fn from(t: NarrowInt<N, P>) -> Self {
        t.v as u128
    }
}

narrow_tryconv_impl!(u8, u16, u32, u64, u128, usize);
narrow_unwrap_impl!(u8, u16, u32, usize);

arith_op_impl!(Add, add, AddAssign, add_assign, add_wide; u8, u16, u32, u64, u128, usize);
arith_op_impl!(Sub, sub, SubAssign, sub_assign, sub_wide; u8, u16, u32, u64, u128, usize);
arith_op_impl!(Mul, mul, MulAssign, mul_assign, mul_wide; u8, u16, u32, u64, u128, usize);
arith_op_impl!(Div, div, DivAssign, div_assign, div_wide; u8, u16, u32, u64, u128, usize);
arith_op_impl!(Rem, rem, RemAssign, rem_assign, rem_wide; u8, u16, u32, u64, u128, usize);

bitwise_op_impl!(BitAnd, bitand, BitAndAssign, bitand_assign; u8, u16, u32, u64, u128, usize);
bitwise_op_impl!(BitOr, bitor, BitOrAssign, bitor_assign; u8, u16, u32, u64, u128, usize);
bitwise_op_impl!(BitXor, bitxor, BitXorAssign, bitxor_assign; u8, u16, u32, u64, u128, usize);

shift_op_impl!(Shl, shl, ShlAssign, shl_assign, shifted_left; u8, u16, u32, u64, u128, usize);
shift_op_impl!(Shr, shr, ShrAssign, shr_assign, shifted_right; u8, u16, u32, u64, u128, usize);

cmp_prim_impl!(u8, u16, u32, u64, u128, usize);

impl<const N: u32, P> Not for NarrowInt<N, P> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_masked(!self.v)
    }
}

impl<const N: u32, P: Policy> Neg for NarrowInt<N, P> {
    type Output = Self;

    #[track_caller]
    fn neg(self) -> Self {
        or_panic(self.try_neg())
    }
}

impl<const N: u32, P: Policy> Zero for NarrowInt<N, P> {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.v == 0
    }
}

impl<const N: u32, P: Policy> One for NarrowInt<N, P> {
    fn one() -> Self {
        Self::from_masked(1)
    }
}

impl<const N: u32, P> Bounded for NarrowInt<N, P> {
    fn min_value() -> Self {
        Self::ZERO
    }

    fn max_value() -> Self {
        Self::from_masked(Self::MAX)
    }
}

impl<const N: u32, P: Policy> Num for NarrowInt<N, P> {
    type FromStrRadixErr = ParseNarrowError;

    fn from_str_radix(src: &str, radix: u32) -> result::Result<Self, ParseNarrowError> {
        if !(2..=36).contains(&radix) {
            return Err(ParseNarrowError::Radix(radix));
        }

        let wide = u128::from_str_radix(src, radix)?;

        Ok(Self::try_new_wide(wide)?)
    }
}

checked_impl!(CheckedAdd, checked_add, add_raw);
checked_impl!(CheckedSub, checked_sub, sub_raw);
checked_impl!(CheckedMul, checked_mul, mul_raw);
checked_impl!(CheckedDiv, checked_div, div_raw);
checked_impl!(CheckedRem, checked_rem, rem_raw);

fixed_policy_impl!(WrappingAdd, wrapping_add, Wrap, add_raw);
fixed_policy_impl!(WrappingSub, wrapping_sub, Wrap, sub_raw);
fixed_policy_impl!(WrappingMul, wrapping_mul, Wrap, mul_raw);
fixed_policy_impl!(SaturatingAdd, saturating_add, Saturate, add_raw);
fixed_policy_impl!(SaturatingSub, saturating_sub, Saturate, sub_raw);
fixed_policy_impl!(SaturatingMul, saturating_mul, Saturate, mul_raw);

impl<const N: u32, P: Policy> CheckedShl for NarrowInt<N, P> {
    /// Shift left, returning `None` if `rhs` is not smaller than the width.
    fn checked_shl(&self, rhs: u32) -> Option<Self> {
        if rhs >= N {
            return None;
        }

        Some(self.shifted_left(rhs as u128))
    }
}

impl<const N: u32, P: Policy> CheckedShr for NarrowInt<N, P> {
    fn checked_shr(&self, rhs: u32) -> Option<Self> {
        if rhs >= N {
            return None;
        }

        Some(self.shifted_right(rhs as u128))
    }
}

pub type U1 = NarrowInt<1>;
pub type U3 = NarrowInt<3>;
pub type U5 = NarrowInt<5>;
pub type U6 = NarrowInt<6>;
pub type U7 = NarrowInt<7>;
pub type U12 = NarrowInt<12>;
pub type U20 = NarrowInt<20>;
