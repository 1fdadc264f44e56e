//! The RISC-V base integer instruction set

mod instr;
mod types;

pub use instr::*;
pub use types::*;
