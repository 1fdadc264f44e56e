//! Error type for narrow integer maths

use std::num::ParseIntError;
use std::result;
use thiserror::Error;

/// Error type for operations on narrow integers.
///
/// Only `DivisionByZero` can be produced by a `Wrap` or `Saturate` integer;
/// every other variant is how the `Fail` policy reports a breach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum NarrowError {
    /// A constructed or assigned value does not fit in the integer's width.
    #[error("value {value} does not fit in {bits} bits")]
    OutOfRange { value: u128, bits: u32 },

    /// An arithmetic result exceeded the maximum value of the width.
    #[error("arithmetic overflow in {bits}-bit integer")]
    Overflow { bits: u32 },

    /// An arithmetic result fell below zero.
    #[error("arithmetic underflow in {bits}-bit integer")]
    Underflow { bits: u32 },

    /// Division or remainder by zero, under any policy.
    #[error("division by zero")]
    DivisionByZero,
}

/// Error type for parsing narrow integers from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseNarrowError {
    /// The text is not an unsigned integer at all.
    #[error("invalid integer literal: {0}")]
    Int(#[from] ParseIntError),

    /// The requested radix is outside `2..=36`.
    #[error("radix {0} is not between 2 and 36")]
    Radix(u32),

    /// The text is a valid integer but the policy refused it.
    #[error(transparent)]
    Range(#[from] NarrowError),
}

pub type Result<T> = result::Result<T, NarrowError>;
