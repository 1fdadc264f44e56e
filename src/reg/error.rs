//! Error type for register file access

use std::result;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// A raw register number above 31.
    #[error("register index {0} is out of range")]
    IndexOutOfRange(usize),

    /// A register name that is neither an ABI name nor `x0` through `x31`.
    #[error("unknown register name `{0}`")]
    UnknownName(String),
}

pub type Result<T> = result::Result<T, RegisterError>;
