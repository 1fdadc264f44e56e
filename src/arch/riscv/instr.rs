//! R-type instruction encoding

use crate::arch::riscv::{Funct3, Funct7, Opcode, RegField, Register};
use crate::maths::NarrowInt;
use std::fmt;
use tracing::debug;

/// Where a single field lives within a 32-bit instruction word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: u32,
    pub width: u32,
}

impl FieldLayout {
    pub const fn mask(&self) -> u32 {
        (((1u64 << self.width) - 1) as u32) << self.offset
    }
}

pub const OPCODE: FieldLayout = FieldLayout {
    name: "opcode",
    offset: 0,
    width: 7,
};

pub const RD: FieldLayout = FieldLayout {
    name: "rd",
    offset: 7,
    width: 5,
};

pub const FUNCT3: FieldLayout = FieldLayout {
    name: "funct3",
    offset: 12,
    width: 3,
};

pub const RS1: FieldLayout = FieldLayout {
    name: "rs1",
    offset: 15,
    width: 5,
};

pub const RS2: FieldLayout = FieldLayout {
    name: "rs2",
    offset: 20,
    width: 5,
};

pub const FUNCT7: FieldLayout = FieldLayout {
    name: "funct7",
    offset: 25,
    width: 7,
};

/// The R-type fields from least to most significant bit.
pub const RTYPE_FIELDS: [FieldLayout; 6] = [OPCODE, RD, FUNCT3, RS1, RS2, FUNCT7];

/// Check that a field table tiles a 32-bit word exactly: each field starts
/// where the previous one ended and the last one ends at bit 32.
const fn tiles_word(fields: &[FieldLayout]) -> bool {
    let mut next = 0;
    let mut i = 0;

    while i < fields.len() {
        if fields[i].offset != next {
            return false;
        }

        next += fields[i].width;
        i += 1;
    }

    next == 32
}

const _: () = assert!(tiles_word(&RTYPE_FIELDS), "R-type fields must tile 32 bits");
const _: () = assert!(Opcode::BITS == OPCODE.width && Funct7::BITS == FUNCT7.width);
const _: () = assert!(RegField::BITS == RD.width && RegField::BITS == RS1.width);
const _: () = assert!(RegField::BITS == RS2.width && Funct3::BITS == FUNCT3.width);

/// Major opcode values of the RV32I/RV64I base instruction set.
pub mod opcodes {
    pub const LOAD: u64 = 0b000_0011;
    pub const OP_IMM: u64 = 0b001_0011;
    pub const AUIPC: u64 = 0b001_0111;
    pub const STORE: u64 = 0b010_0011;
    pub const OP: u64 = 0b011_0011;
    pub const LUI: u64 = 0b011_0111;
    pub const BRANCH: u64 = 0b110_0011;
    pub const JALR: u64 = 0b110_0111;
    pub const JAL: u64 = 0b110_1111;
    pub const SYSTEM: u64 = 0b111_0011;
}

/// The base instruction formats, distinguished by major opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InstructionFormat {
    Register,
    Immediate,
    Store,
    Branch,
    UpperImmediate,
    Jump,
}

impl InstructionFormat {
    /// Determine which format a major opcode uses.
    ///
    /// Returns `None` for opcodes outside the base integer ISA.
    pub fn from_opcode(opcode: Opcode) -> Option<Self> {
        use self::opcodes::*;

        match opcode.value() {
            OP => Some(InstructionFormat::Register),
            OP_IMM | LOAD | JALR | SYSTEM => Some(InstructionFormat::Immediate),
            STORE => Some(InstructionFormat::Store),
            BRANCH => Some(InstructionFormat::Branch),
            LUI | AUIPC => Some(InstructionFormat::UpperImmediate),
            JAL => Some(InstructionFormat::Jump),
            _ => None,
        }
    }
}

/// Register-register ALU operations encoded under the `OP` opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegOp {
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
}

const FUNCT7_BASE: u64 = 0b000_0000;
const FUNCT7_ALT: u64 = 0b010_0000;

impl RegOp {
    pub fn funct3(self) -> Funct3 {
        Funct3::from_masked(match self {
            RegOp::Add | RegOp::Sub => 0b000,
            RegOp::Sll => 0b001,
            RegOp::Slt => 0b010,
            RegOp::Sltu => 0b011,
            RegOp::Xor => 0b100,
            RegOp::Srl | RegOp::Sra => 0b101,
            RegOp::Or => 0b110,
            RegOp::And => 0b111,
        })
    }

    pub fn funct7(self) -> Funct7 {
        Funct7::from_masked(match self {
            RegOp::Sub | RegOp::Sra => FUNCT7_ALT,
            _ => FUNCT7_BASE,
        })
    }

    /// Decode an operation from its minor opcode fields.
    pub fn from_fields(funct3: Funct3, funct7: Funct7) -> Option<Self> {
        match (funct3.value(), funct7.value()) {
            (0b000, FUNCT7_BASE) => Some(RegOp::Add),
            (0b000, FUNCT7_ALT) => Some(RegOp::Sub),
            (0b001, FUNCT7_BASE) => Some(RegOp::Sll),
            (0b010, FUNCT7_BASE) => Some(RegOp::Slt),
            (0b011, FUNCT7_BASE) => Some(RegOp::Sltu),
            (0b100, FUNCT7_BASE) => Some(RegOp::Xor),
            (0b101, FUNCT7_BASE) => Some(RegOp::Srl),
            (0b101, FUNCT7_ALT) => Some(RegOp::Sra),
            (0b110, FUNCT7_BASE) => Some(RegOp::Or),
            (0b111, FUNCT7_BASE) => Some(RegOp::And),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            RegOp::Add => "add",
            RegOp::Sub => "sub",
            RegOp::Sll => "sll",
            RegOp::Slt => "slt",
            RegOp::Sltu => "sltu",
            RegOp::Xor => "xor",
            RegOp::Srl => "srl",
            RegOp::Sra => "sra",
            RegOp::Or => "or",
            RegOp::And => "and",
        }
    }
}

impl fmt::Display for RegOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// A decoded R-type instruction.
///
/// Each field carries its own width in its type, and fields use the `Fail`
/// policy: an out-of-range field can only be built through `try_new` and is
/// rejected there rather than silently corrupting a neighbouring field.
/// Packing and unpacking are therefore total.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RType {
    pub opcode: Opcode,
    pub rd: RegField,
    pub funct3: Funct3,
    pub rs1: RegField,
    pub rs2: RegField,
    pub funct7: Funct7,
}

fn place<const N: u32, P>(field: NarrowInt<N, P>, layout: FieldLayout) -> u32 {
    (field.value() as u32) << layout.offset
}

fn extract<const N: u32, P>(word: u32, layout: FieldLayout) -> NarrowInt<N, P> {
    NarrowInt::from_masked(((word & layout.mask()) >> layout.offset) as u64)
}

impl RType {
    pub fn new(
        opcode: Opcode,
        rd: RegField,
        funct3: Funct3,
        rs1: RegField,
        rs2: RegField,
        funct7: Funct7,
    ) -> Self {
        RType {
            opcode,
            rd,
            funct3,
            rs1,
            rs2,
            funct7,
        }
    }

    /// Build a register-register ALU instruction.
    pub fn from_op(op: RegOp, rd: Register, rs1: Register, rs2: Register) -> Self {
        RType {
            opcode: Opcode::from_masked(opcodes::OP),
            rd: rd.field(),
            funct3: op.funct3(),
            rs1: rs1.field(),
            rs2: rs2.field(),
            funct7: op.funct7(),
        }
    }

    /// Encode into a 32-bit instruction word.
    pub fn pack(&self) -> u32 {
        place(self.opcode, OPCODE)
            | place(self.rd, RD)
            | place(self.funct3, FUNCT3)
            | place(self.rs1, RS1)
            | place(self.rs2, RS2)
            | place(self.funct7, FUNCT7)
    }

    /// Decode a 32-bit instruction word.
    ///
    /// Every word decodes; whether it is a meaningful R-type instruction is
    /// a question for `format` and `op`.
    pub fn unpack(word: u32) -> Self {
        RType {
            opcode: extract(word, OPCODE),
            rd: extract(word, RD),
            funct3: extract(word, FUNCT3),
            rs1: extract(word, RS1),
            rs2: extract(word, RS2),
            funct7: extract(word, FUNCT7),
        }
    }

    pub fn format(&self) -> Option<InstructionFormat> {
        InstructionFormat::from_opcode(self.opcode)
    }

    /// Identify the ALU operation, if this is a valid `OP` instruction.
    pub fn op(&self) -> Option<RegOp> {
        if self.opcode.value() != opcodes::OP {
            return None;
        }

        let op = RegOp::from_fields(self.funct3, self.funct7);
        if op.is_none() {
            debug!(
                funct3 = self.funct3.value(),
                funct7 = self.funct7.value(),
                "unrecognized register-register operation"
            );
        }

        op
    }

    pub fn rd(&self) -> Register {
        Register::from_field(self.rd)
    }

    pub fn rs1(&self) -> Register {
        Register::from_field(self.rs1)
    }

    pub fn rs2(&self) -> Register {
        Register::from_field(self.rs2)
    }
}

impl From<u32> for RType {
    fn from(word: u32) -> Self {
        RType::unpack(word)
    }
}

impl From<RType> for u32 {
    fn from(instr: RType) -> Self {
        instr.pack()
    }
}

impl fmt::Display for RType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op() {
            Some(op) => write!(f, "{} {}, {}, {}", op, self.rd(), self.rs1(), self.rs2()),
            None => write!(
                f,
                ".insn r {:#x}, {:#x}, {:#x}, {}, {}, {}",
                self.opcode,
                self.funct3,
                self.funct7,
                self.rd(),
                self.rs1(),
                self.rs2()
            ),
        }
    }
}
