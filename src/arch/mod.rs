//! Processor architectures whose encodings rvbits models.
//!
//! Each architecture is implemented as a child module to this one. Only the
//! RISC-V base integer ISA is provided, in its 32- and 64-bit register widths.

pub mod riscv;

use serde::Serialize;
use std::str;

/// Enumeration of the base integer ISAs.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
pub enum ArchName {
    RV32I,
    RV64I,
}

impl ArchName {
    /// The width of an integer register, in bits.
    pub fn xlen(self) -> u32 {
        match self {
            ArchName::RV32I => 32,
            ArchName::RV64I => 64,
        }
    }
}

impl str::FromStr for ArchName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "rv32" => Ok(ArchName::RV32I),
            "rv32i" => Ok(ArchName::RV32I),
            "riscv32" => Ok(ArchName::RV32I),
            "rv64" => Ok(ArchName::RV64I),
            "rv64i" => Ok(ArchName::RV64I),
            "riscv64" => Ok(ArchName::RV64I),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(ArchName, "valid architecture name");
