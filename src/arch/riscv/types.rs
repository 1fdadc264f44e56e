//! Types used in modeling RISC-V integer registers and instruction fields

use crate::maths::{Fail, NarrowInt};
use crate::reg::RegisterError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The 7-bit major opcode that selects an instruction format.
pub type Opcode = NarrowInt<7, Fail>;

/// A 5-bit register specifier, as found in `rd`, `rs1`, and `rs2`.
pub type RegField = NarrowInt<5, Fail>;

/// The 3-bit minor opcode.
pub type Funct3 = NarrowInt<3, Fail>;

/// The 7-bit function selector of R-type instructions.
pub type Funct7 = NarrowInt<7, Fail>;

/// Enumerates the RISC-V integer registers by their ABI names.
///
/// Variant discriminants are the architectural register numbers, so
/// `Register::S0 as usize == 8`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    Zero = 0,
    Ra,
    Sp,
    Gp,
    Tp,
    T0,
    T1,
    T2,
    S0,
    S1,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    T3,
    T4,
    T5,
    T6,
}

use Register::*;

/// Every register, in architectural order.
pub const ALL_REGISTERS: [Register; 32] = [
    Zero, Ra, Sp, Gp, Tp, T0, T1, T2, S0, S1, A0, A1, A2, A3, A4, A5, A6, A7, S2, S3, S4, S5, S6,
    S7, S8, S9, S10, S11, T3, T4, T5, T6,
];

lazy_static! {
    /// Every name a register may be written as: ABI names, the `fp` alias
    /// for `s0`, and the numeric `x0` through `x31` forms.
    pub static ref REGISTER_NAMES: HashMap<String, Register> = {
        let mut names = HashMap::new();

        for reg in ALL_REGISTERS.iter() {
            names.insert(reg.name().to_string(), *reg);
            names.insert(format!("x{}", reg.index()), *reg);
        }

        names.insert("fp".to_string(), S0);

        names
    };
}

impl Register {
    /// Look up a register by its architectural number.
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_REGISTERS.get(index).copied()
    }

    /// Look up a register by any of its accepted names.
    ///
    /// Lookup is exact; `SP` is not `sp`.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTER_NAMES.get(name).copied()
    }

    /// Decode a register specifier from an instruction field.
    ///
    /// Every 5-bit value names a register, so this never fails.
    pub fn from_field(field: RegField) -> Self {
        ALL_REGISTERS[field.value() as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn field(self) -> RegField {
        RegField::from_masked(self as u64)
    }

    /// The canonical ABI name of this register.
    pub fn name(self) -> &'static str {
        match self {
            Zero => "zero",
            Ra => "ra",
            Sp => "sp",
            Gp => "gp",
            Tp => "tp",
            T0 => "t0",
            T1 => "t1",
            T2 => "t2",
            S0 => "s0",
            S1 => "s1",
            A0 => "a0",
            A1 => "a1",
            A2 => "a2",
            A3 => "a3",
            A4 => "a4",
            A5 => "a5",
            A6 => "a6",
            A7 => "a7",
            S2 => "s2",
            S3 => "s3",
            S4 => "s4",
            S5 => "s5",
            S6 => "s6",
            S7 => "s7",
            S8 => "s8",
            S9 => "s9",
            S10 => "s10",
            S11 => "s11",
            T3 => "t3",
            T4 => "t4",
            T5 => "t5",
            T6 => "t6",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Register {
    type Err = RegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RegisterError::UnknownName(s.to_string()))
    }
}

derive_deserialize_from_str!(Register, "valid RISC-V register name");
derive_serialize_from_display!(Register);

/// Resolve a register name to its architectural number.
pub fn name_to_index(name: &str) -> Option<usize> {
    Register::from_name(name).map(Register::index)
}
