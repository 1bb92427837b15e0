// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Instruction views
//!
//! A MIPS instruction is a plain 32-bit word. The three canonical encodings
//! share the same bits and are told apart only by which view a handler
//! chooses to construct:
//!
//! ```text
//! R-type: | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
//! I-type: | op (6) | rs (5) | rt (5) |          immediate (16)        |
//! J-type: | op (6) |                  address (26)                    |
//! ```
//!
//! Every accessor is a fixed shift-and-mask. Any 32-bit pattern decodes;
//! whether it is a legal instruction is decided by the dispatch tables.
//!
//! # Example
//! ```
//! use mipscore::core::instruction::{Instruction, RsRt};
//!
//! let lw = Instruction::new(0x8C010004);
//! assert_eq!(lw.opcode(), 0x23);
//!
//! let i = lw.as_i_type();
//! assert_eq!(i.rs(), 0);
//! assert_eq!(i.rt(), 1);
//! assert_eq!(i.immediate(), 4);
//! ```

use std::fmt;

mod builder;
#[cfg(test)]
mod tests;

pub use builder::{
    IInstructionBuilder, InstructionBuilder, JInstructionBuilder, OpCodeBuilder,
    RInstructionBuilder, RsRtBuilder, RsRtInstructionBuilder,
};

/// A named bit field of an instruction word
///
/// This is the complete capability set shared by all encodings. Fields of
/// different encodings overlap (e.g. `Immediate` covers `Rd`, `Shamt` and
/// `Funct`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Primary opcode, bits [31:26]
    OpCode,
    /// First source register, bits [25:21]
    Rs,
    /// Second source / target register, bits [20:16]
    Rt,
    /// Destination register, bits [15:11]
    Rd,
    /// Shift amount, bits [10:6]
    Shamt,
    /// R-type function code, bits [5:0]
    Funct,
    /// I-type immediate, bits [15:0]
    Immediate,
    /// J-type jump address, bits [25:0]
    Address,
}

impl Field {
    /// Every field, in encoding order
    pub const ALL: [Field; 8] = [
        Field::OpCode,
        Field::Rs,
        Field::Rt,
        Field::Rd,
        Field::Shamt,
        Field::Funct,
        Field::Immediate,
        Field::Address,
    ];

    /// Bit position of the field's least significant bit
    pub const fn shift(self) -> u32 {
        match self {
            Field::OpCode => 26,
            Field::Rs => 21,
            Field::Rt => 16,
            Field::Rd => 11,
            Field::Shamt => 6,
            Field::Funct | Field::Immediate | Field::Address => 0,
        }
    }

    /// Width of the field in bits
    pub const fn width(self) -> u32 {
        match self {
            Field::OpCode | Field::Funct => 6,
            Field::Rs | Field::Rt | Field::Rd | Field::Shamt => 5,
            Field::Immediate => 16,
            Field::Address => 26,
        }
    }

    /// Largest value the field can hold
    pub const fn max_value(self) -> u32 {
        (1 << self.width()) - 1
    }

    /// Mask of the field's bits in place
    pub const fn mask(self) -> u32 {
        self.max_value() << self.shift()
    }

    /// Read the field out of `word`
    #[inline(always)]
    pub const fn extract(self, word: u32) -> u32 {
        (word >> self.shift()) & self.max_value()
    }

    /// Write `value` into the field of `word`
    ///
    /// Returns `None` if `value` does not fit the field. All bits outside
    /// [`Field::mask`] are preserved.
    ///
    /// # Example
    /// ```
    /// use mipscore::core::instruction::Field;
    ///
    /// assert_eq!(Field::Rt.insert(0, 31), Some(0x001F_0000));
    /// assert_eq!(Field::Rt.insert(0, 32), None);
    /// ```
    #[inline(always)]
    pub const fn insert(self, word: u32, value: u32) -> Option<u32> {
        if value > self.max_value() {
            return None;
        }
        Some((word & !self.mask()) | (value << self.shift()))
    }
}

/// A raw 32-bit MIPS instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Instruction(u32);

impl Instruction {
    /// Wrap a raw instruction word
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw instruction word
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Primary opcode, bits [31:26]
    #[inline(always)]
    pub const fn opcode(self) -> u8 {
        Field::OpCode.extract(self.0) as u8
    }

    /// View this word as an instruction carrying rs/rt only
    pub const fn as_rs_rt(self) -> RsRtInstruction {
        RsRtInstruction(self)
    }

    /// View this word as an R-type instruction
    pub const fn as_r_type(self) -> RInstruction {
        RInstruction(self)
    }

    /// View this word as an I-type instruction
    pub const fn as_i_type(self) -> IInstruction {
        IInstruction(self)
    }

    /// View this word as a J-type instruction
    pub const fn as_j_type(self) -> JInstruction {
        JInstruction(self)
    }
}

impl From<u32> for Instruction {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Instruction> for u32 {
    fn from(instruction: Instruction) -> Self {
        instruction.0
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Common access to the underlying word of every typed view
pub trait InstructionView: Copy {
    /// The untyped instruction this view projects
    fn instruction(&self) -> Instruction;

    /// The raw instruction word
    #[inline(always)]
    fn raw(&self) -> u32 {
        self.instruction().raw()
    }

    /// Primary opcode, bits [31:26]
    #[inline(always)]
    fn opcode(&self) -> u8 {
        self.instruction().opcode()
    }
}

/// The rs/rt pair shared by the R-type and I-type encodings
///
/// Both encodings place rs and rt at the same bits, so the extraction lives
/// here once and every implementor inherits it.
pub trait RsRt: InstructionView {
    /// First source register, bits [25:21]
    #[inline(always)]
    fn rs(&self) -> u8 {
        Field::Rs.extract(self.raw()) as u8
    }

    /// Second source / target register, bits [20:16]
    #[inline(always)]
    fn rt(&self) -> u8 {
        Field::Rt.extract(self.raw()) as u8
    }
}

impl InstructionView for Instruction {
    #[inline(always)]
    fn instruction(&self) -> Instruction {
        *self
    }
}

/// Instruction viewed only through its rs/rt fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RsRtInstruction(Instruction);

/// R-type (register) instruction view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RInstruction(Instruction);

/// I-type (immediate) instruction view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IInstruction(Instruction);

/// J-type (jump) instruction view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JInstruction(Instruction);

macro_rules! impl_view {
    ($($view:ident),+) => {
        $(
            impl $view {
                /// Construct the view over `instruction`
                pub const fn new(instruction: Instruction) -> Self {
                    Self(instruction)
                }
            }

            impl InstructionView for $view {
                #[inline(always)]
                fn instruction(&self) -> Instruction {
                    self.0
                }
            }

            impl From<Instruction> for $view {
                fn from(instruction: Instruction) -> Self {
                    Self(instruction)
                }
            }

            impl From<$view> for Instruction {
                fn from(view: $view) -> Self {
                    view.0
                }
            }
        )+
    };
}

impl_view!(RsRtInstruction, RInstruction, IInstruction, JInstruction);

impl RsRt for RsRtInstruction {}
impl RsRt for RInstruction {}
impl RsRt for IInstruction {}

impl RInstruction {
    /// Destination register, bits [15:11]
    #[inline(always)]
    pub fn rd(&self) -> u8 {
        Field::Rd.extract(self.raw()) as u8
    }

    /// Shift amount, bits [10:6]
    #[inline(always)]
    pub fn shamt(&self) -> u8 {
        Field::Shamt.extract(self.raw()) as u8
    }

    /// Function code, bits [5:0]
    #[inline(always)]
    pub fn funct(&self) -> u8 {
        Field::Funct.extract(self.raw()) as u8
    }
}

impl IInstruction {
    /// Immediate, bits [15:0], zero-extended
    #[inline(always)]
    pub fn immediate(&self) -> u16 {
        Field::Immediate.extract(self.raw()) as u16
    }

    /// Immediate, bits [15:0], as a signed 16-bit value
    #[inline(always)]
    pub fn signed_immediate(&self) -> i16 {
        self.immediate() as i16
    }
}

impl JInstruction {
    /// Jump address, bits [25:0]
    ///
    /// Returned as stored. Shifting and combining with the upper PC bits is
    /// left to the jump semantics.
    #[inline(always)]
    pub fn address(&self) -> u32 {
        Field::Address.extract(self.raw())
    }
}
