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

//! Instruction builders
//!
//! Builders hold a word under construction and set one field at a time.
//! A setter returns `false` and leaves the word untouched when the value
//! does not fit the field; overflow is an ordinary outcome while assembling
//! test programs, not an error.
//!
//! # Example
//! ```
//! use mipscore::core::instruction::{Instruction, OpCodeBuilder, RInstructionBuilder, RsRtBuilder};
//! use mipscore::core::opcodes::{function, opcode};
//!
//! // ADD r3, r1, r2
//! let mut builder = RInstructionBuilder::default();
//! assert!(builder.set_opcode(opcode::SPECIAL));
//! assert!(builder.set_rs(1));
//! assert!(builder.set_rt(2));
//! assert!(builder.set_rd(3));
//! assert!(builder.set_funct(function::ADD));
//! assert_eq!(builder.word(), 0x00221820);
//!
//! // Out of range: rejected, word unchanged
//! assert!(!builder.set_rd(32));
//! assert_eq!(builder.word(), 0x00221820);
//! ```

use super::{Field, IInstruction, Instruction, JInstruction, RInstruction, RsRtInstruction};

/// Builder capability for the opcode field, present in every encoding
pub trait OpCodeBuilder {
    /// Mutable access to the word under construction
    fn word_mut(&mut self) -> &mut u32;

    /// Set `field` to `value` if it fits
    ///
    /// On failure the word is left bit-for-bit unchanged.
    fn set_field(&mut self, field: Field, value: u32) -> bool {
        let word = self.word_mut();
        match field.insert(*word, value) {
            Some(updated) => {
                *word = updated;
                true
            }
            None => false,
        }
    }

    /// Set the opcode, bits [31:26]
    fn set_opcode(&mut self, value: u8) -> bool {
        self.set_field(Field::OpCode, value.into())
    }
}

/// Builder capability for the rs/rt fields shared by R and I encodings
pub trait RsRtBuilder: OpCodeBuilder {
    /// Set rs, bits [25:21]
    fn set_rs(&mut self, value: u8) -> bool {
        self.set_field(Field::Rs, value.into())
    }

    /// Set rt, bits [20:16]
    fn set_rt(&mut self, value: u8) -> bool {
        self.set_field(Field::Rt, value.into())
    }
}

/// Builder for an untyped [`Instruction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstructionBuilder {
    word: u32,
}

impl InstructionBuilder {
    /// Start from `instruction`
    pub const fn new(instruction: Instruction) -> Self {
        Self {
            word: instruction.raw(),
        }
    }

    /// The word built so far
    pub const fn word(&self) -> u32 {
        self.word
    }

    /// Finish as an untyped instruction
    pub const fn build(&self) -> Instruction {
        Instruction::new(self.word)
    }
}

impl OpCodeBuilder for InstructionBuilder {
    fn word_mut(&mut self) -> &mut u32 {
        &mut self.word
    }
}

/// Builder for an [`RsRtInstruction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsRtInstructionBuilder {
    base: InstructionBuilder,
}

impl RsRtInstructionBuilder {
    /// Start from `instruction`
    pub const fn new(instruction: RsRtInstruction) -> Self {
        Self {
            base: InstructionBuilder::new(instruction.0),
        }
    }

    /// The word built so far
    pub const fn word(&self) -> u32 {
        self.base.word()
    }

    /// Finish as an rs/rt view
    pub const fn build(&self) -> RsRtInstruction {
        RsRtInstruction(self.base.build())
    }
}

impl OpCodeBuilder for RsRtInstructionBuilder {
    fn word_mut(&mut self) -> &mut u32 {
        self.base.word_mut()
    }
}

impl RsRtBuilder for RsRtInstructionBuilder {}

/// Builder for an [`RInstruction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RInstructionBuilder {
    rs_rt: RsRtInstructionBuilder,
}

impl RInstructionBuilder {
    /// Start from `instruction`
    pub const fn new(instruction: RInstruction) -> Self {
        Self {
            rs_rt: RsRtInstructionBuilder::new(RsRtInstruction(instruction.0)),
        }
    }

    /// The word built so far
    pub const fn word(&self) -> u32 {
        self.rs_rt.word()
    }

    /// Set rd, bits [15:11]
    pub fn set_rd(&mut self, value: u8) -> bool {
        self.set_field(Field::Rd, value.into())
    }

    /// Set the shift amount, bits [10:6]
    pub fn set_shamt(&mut self, value: u8) -> bool {
        self.set_field(Field::Shamt, value.into())
    }

    /// Set the function code, bits [5:0]
    pub fn set_funct(&mut self, value: u8) -> bool {
        self.set_field(Field::Funct, value.into())
    }

    /// Finish as an R-type view
    pub const fn build(&self) -> RInstruction {
        RInstruction(Instruction::new(self.word()))
    }
}

impl OpCodeBuilder for RInstructionBuilder {
    fn word_mut(&mut self) -> &mut u32 {
        self.rs_rt.word_mut()
    }
}

impl RsRtBuilder for RInstructionBuilder {}

/// Builder for an [`IInstruction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IInstructionBuilder {
    rs_rt: RsRtInstructionBuilder,
}

impl IInstructionBuilder {
    /// Start from `instruction`
    pub const fn new(instruction: IInstruction) -> Self {
        Self {
            rs_rt: RsRtInstructionBuilder::new(RsRtInstruction(instruction.0)),
        }
    }

    /// The word built so far
    pub const fn word(&self) -> u32 {
        self.rs_rt.word()
    }

    /// Set the immediate, bits [15:0]
    ///
    /// Takes the zero-extended value; callers holding a signed offset pass
    /// `offset as u16 as u32`.
    pub fn set_immediate(&mut self, value: u32) -> bool {
        self.set_field(Field::Immediate, value)
    }

    /// Finish as an I-type view
    pub const fn build(&self) -> IInstruction {
        IInstruction(Instruction::new(self.word()))
    }
}

impl OpCodeBuilder for IInstructionBuilder {
    fn word_mut(&mut self) -> &mut u32 {
        self.rs_rt.word_mut()
    }
}

impl RsRtBuilder for IInstructionBuilder {}

/// Builder for a [`JInstruction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JInstructionBuilder {
    base: InstructionBuilder,
}

impl JInstructionBuilder {
    /// Start from `instruction`
    pub const fn new(instruction: JInstruction) -> Self {
        Self {
            base: InstructionBuilder::new(instruction.0),
        }
    }

    /// The word built so far
    pub const fn word(&self) -> u32 {
        self.base.word()
    }

    /// Set the jump address, bits [25:0]
    pub fn set_address(&mut self, value: u32) -> bool {
        self.set_field(Field::Address, value)
    }

    /// Finish as a J-type view
    pub const fn build(&self) -> JInstruction {
        JInstruction(self.base.build())
    }
}

impl OpCodeBuilder for JInstructionBuilder {
    fn word_mut(&mut self) -> &mut u32 {
        self.base.word_mut()
    }
}
