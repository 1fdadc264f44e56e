//! The integer register file.

use crate::arch::riscv::{Register, ALL_REGISTERS};
use crate::reg::{RegisterError, RegisterIndex, Result, Xlen};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::trace;

/// Number of integer registers, including the zero register.
pub const REGISTER_COUNT: usize = 32;

/// Represents the 32 integer registers of a RISC-V hart.
///
/// `x0` is hard-wired to zero: writes to it are accepted and discarded, and
/// reads from it always yield zero. Every other register holds whatever was
/// last written to it, and all registers start out zero.
///
/// Registers may be addressed by anything implementing `RegisterIndex`, such
/// as a `Register` or a decoded `RegField`. Names are only a way of producing
/// a `Register`; storage is always by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile<W> {
    regs: [W; REGISTER_COUNT],
}

pub type RegisterFile32 = RegisterFile<u32>;
pub type RegisterFile64 = RegisterFile<u64>;

impl<W> RegisterFile<W>
where
    W: Xlen,
{
    pub fn new() -> Self {
        RegisterFile {
            regs: [W::zero(); REGISTER_COUNT],
        }
    }

    /// Build a register file from raw register contents.
    ///
    /// Whatever is given for `x0` is ignored.
    pub fn from_array(mut regs: [W; REGISTER_COUNT]) -> Self {
        regs[0] = W::zero();

        RegisterFile { regs }
    }

    pub fn read(&self, index: impl RegisterIndex) -> W {
        match index.register_index() {
            0 => W::zero(),
            i => self.regs[i],
        }
    }

    pub fn write(&mut self, index: impl RegisterIndex, value: W) {
        match index.register_index() {
            0 => trace!(value = ?value, "discarding write to zero register"),
            i => self.regs[i] = value,
        }
    }

    /// Read a register by raw number.
    pub fn try_read(&self, index: usize) -> Result<W> {
        Register::from_index(index)
            .map(|reg| self.read(reg))
            .ok_or(RegisterError::IndexOutOfRange(index))
    }

    /// Write a register by raw number.
    ///
    /// An out-of-range index leaves the register file unchanged.
    pub fn try_write(&mut self, index: usize, value: W) -> Result<()> {
        let reg = Register::from_index(index).ok_or(RegisterError::IndexOutOfRange(index))?;
        self.write(reg, value);

        Ok(())
    }

    /// Read a register by any name `Register` accepts.
    pub fn read_named(&self, name: &str) -> Result<W> {
        Ok(self.read(name.parse::<Register>()?))
    }

    /// Write a register by any name `Register` accepts.
    pub fn write_named(&mut self, name: &str, value: W) -> Result<()> {
        self.write(name.parse::<Register>()?, value);

        Ok(())
    }

    /// Return every register to zero.
    pub fn reset(&mut self) {
        trace!(xlen = W::BITS, "resetting register file");

        self.regs = [W::zero(); REGISTER_COUNT];
    }

    /// Iterate over every register and its current value, in order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, W)> + '_ {
        ALL_REGISTERS.iter().map(move |reg| (*reg, self.read(*reg)))
    }

    /// The raw register contents, with `x0` reading as zero.
    pub fn to_array(&self) -> [W; REGISTER_COUNT] {
        let mut regs = self.regs;
        regs[0] = W::zero();

        regs
    }
}

impl<W> Default for RegisterFile<W>
where
    W: Xlen,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Dumps the register file four registers to a line, by ABI name.
impl<W> fmt::Display for RegisterFile<W>
where
    W: Xlen,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = W::BITS as usize / 4 + 2;

        for (i, (reg, value)) in self.iter().enumerate() {
            if i % 4 != 0 {
                write!(f, "  ")?;
            }

            write!(f, "{:>4}: {:#0width$x}", reg, value, width = width)?;

            if i % 4 == 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl<W> Serialize for RegisterFile<W>
where
    W: Xlen + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de, W> Deserialize<'de> for RegisterFile<W>
where
    W: Xlen + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[W; REGISTER_COUNT]>::deserialize(deserializer).map(Self::from_array)
    }
}
