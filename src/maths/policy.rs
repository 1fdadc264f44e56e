//! Overflow policies for narrow integers

use std::fmt;
use std::hash::Hash;

/// The direction in which an operation left the representable range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Breach {
    /// The true result was larger than `MAX`.
    Overflow,

    /// The true result was smaller than zero.
    Underflow,
}

/// Runtime name of an overflow policy.
///
/// Policies themselves are types (see `Policy`); this enumeration exists so
/// that generic code can inspect or print which one it was instantiated with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverflowPolicy {
    Wrap,
    Saturate,
    Fail,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Wrap => write!(f, "wrap"),
            OverflowPolicy::Saturate => write!(f, "saturate"),
            OverflowPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// A strategy for resolving results that do not fit in a narrow integer.
///
/// A policy is chosen once, as a type parameter of `NarrowInt`, and is then
/// consulted by every mutating operation of that type: construction,
/// assignment, and all arithmetic. Bitwise operations never consult the
/// policy; they truncate like hardware does.
///
/// The policy is handed the kind of breach, the result already reduced modulo
/// `2^N`, and the type's `MAX`. It returns the value to store, or `None` if
/// the operation must fail instead. Division by zero never reaches a policy.
pub trait Policy: Copy + Clone + Default + fmt::Debug + PartialEq + Eq + Hash + PartialOrd + Ord {
    const KIND: OverflowPolicy;

    fn resolve(breach: Breach, wrapped: u64, max: u64) -> Option<u64>;
}

/// Modular truncation: keep the low `N` bits of the true result.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wrap;

impl Policy for Wrap {
    const KIND: OverflowPolicy = OverflowPolicy::Wrap;

    #[inline]
    fn resolve(_breach: Breach, wrapped: u64, _max: u64) -> Option<u64> {
        Some(wrapped)
    }
}

/// Clamp to the nearest representable bound.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Saturate;

impl Policy for Saturate {
    const KIND: OverflowPolicy = OverflowPolicy::Saturate;

    #[inline]
    fn resolve(breach: Breach, _wrapped: u64, max: u64) -> Option<u64> {
        match breach {
            Breach::Overflow => Some(max),
            Breach::Underflow => Some(0),
        }
    }
}

/// Refuse the operation and leave the receiver untouched.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fail;

impl Policy for Fail {
    const KIND: OverflowPolicy = OverflowPolicy::Fail;

    #[inline]
    fn resolve(_breach: Breach, _wrapped: u64, _max: u64) -> Option<u64> {
        None
    }
}
