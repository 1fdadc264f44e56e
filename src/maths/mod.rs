//! Fixed-width unsigned integers and the policies that govern their overflow

#[macro_use]
mod macros;
mod error;
mod narrow;
mod policy;

pub use error::{NarrowError, ParseNarrowError, Result};
pub use narrow::{NarrowInt, U1, U12, U20, U3, U5, U6, U7};
pub use policy::{Breach, Fail, OverflowPolicy, Policy, Saturate, Wrap};

#[cfg(test)]
mod tests;
