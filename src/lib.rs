//! Bit-exact building blocks for modeling RISC-V hardware state: unsigned
//! integers of any width from 1 to 64 bits with a selectable overflow policy,
//! the R-type instruction layout, and the integer register file.

#![forbid(unsafe_code)]

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

pub mod arch;
pub mod maths;
pub mod reg;
