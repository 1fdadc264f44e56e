//! Types which model the RISC-V integer register file.

mod error;
mod file;
mod traits;

pub use crate::arch::riscv::name_to_index;
pub use error::{RegisterError, Result};
pub use file::{RegisterFile, RegisterFile32, RegisterFile64, REGISTER_COUNT};
pub use traits::*;
