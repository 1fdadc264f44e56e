//! Traits used by register file types

use crate::arch::riscv::Register;
use crate::maths::NarrowInt;
use num_traits::{PrimInt, Unsigned};
use std::fmt;

mod private {
    pub trait Sealed {}

    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// The machine word of an integer register file.
///
/// XLEN is 32 for RV32 and 64 for RV64, and nothing else: this trait is
/// sealed to `u32` and `u64`.
pub trait Xlen:
    PrimInt + Unsigned + Default + fmt::Debug + fmt::LowerHex + private::Sealed
{
    const BITS: u32;
}

impl Xlen for u32 {
    const BITS: u32 = 32;
}

impl Xlen for u64 {
    const BITS: u32 = 64;
}

/// Anything that names an integer register and is known to be in range.
///
/// Raw `usize` indices are deliberately not `RegisterIndex`; they go through
/// the fallible `try_read` and `try_write` instead.
pub trait RegisterIndex {
    fn register_index(self) -> usize;
}

impl RegisterIndex for Register {
    fn register_index(self) -> usize {
        self.index()
    }
}

impl<P> RegisterIndex for NarrowInt<5, P> {
    fn register_index(self) -> usize {
        self.value() as usize
    }
}
