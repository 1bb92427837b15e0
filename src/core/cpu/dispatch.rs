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

//! Instruction dispatch tables
//!
//! Dispatch is two-level, mirroring the encoding: the primary 6-bit opcode
//! selects an entry of the processor's [`OpcodeTable`]. Opcodes that group a
//! family of instructions (SPECIAL, REGIMM) install an adapter that performs
//! a second 64-way lookup on a secondary field.
//!
//! Handlers ignore the field that selected them. A handler that decides the
//! word is not really its instruction returns [`ActionOutcome::Unknown`];
//! the processor then raises a reserved-instruction exception.
//!
//! # Example
//! ```
//! use mipscore::core::cpu::dispatch::{self, ActionOutcome, FunctionTable};
//! use mipscore::core::instruction::RsRt;
//! use mipscore::core::opcodes::{function, opcode};
//!
//! let mut special = FunctionTable::new();
//! special
//!     .set(function::ADDU, dispatch::r_action(|cpu, instr| {
//!         let sum = cpu.reg(instr.rs()).wrapping_add(cpu.reg(instr.rt()));
//!         cpu.set_reg(instr.rd(), sum);
//!         Ok(ActionOutcome::Handled)
//!     }))
//!     .unwrap();
//!
//! let adapter = dispatch::run_from_function_table(special);
//! # let _ = (adapter, opcode::SPECIAL);
//! ```

use std::fmt;
use std::rc::Rc;

use super::Processor;
use crate::core::error::{ProcessorError, Result};
use crate::core::instruction::{IInstruction, Instruction, RInstruction, RsRt};

use super::cop0::ExceptionCause;

/// Result of running an instruction handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The handler executed the instruction
    Handled,
    /// The handler does not implement this word
    Unknown(Instruction),
}

/// Handler for a primary opcode
pub type InstructionAction = Rc<dyn Fn(&mut Processor, Instruction) -> Result<ActionOutcome>>;

/// Handler for an R-type function code
pub type RInstructionAction = Rc<dyn Fn(&mut Processor, RInstruction) -> Result<ActionOutcome>>;

/// Handler for a REGIMM branch-condition code
pub type IInstructionAction = Rc<dyn Fn(&mut Processor, IInstruction) -> Result<ActionOutcome>>;

/// Last-resort handler for exceptions raised by the engine
///
/// Invoked after coprocessor 0 holds the faulting context. Returning
/// `Ok(())` means the exception was handled.
pub type ErrorHandler = Rc<dyn Fn(&mut Processor, ExceptionCause) -> Result<()>>;

/// Primary opcode table
pub type OpcodeTable = DispatchTable<InstructionAction>;

/// SPECIAL function table, keyed by the funct field
pub type FunctionTable = DispatchTable<RInstructionAction>;

/// REGIMM table, keyed by the rt field
pub type BranchConditionTable = DispatchTable<IInstructionAction>;

/// Wrap a closure as an [`InstructionAction`]
pub fn action<F>(f: F) -> InstructionAction
where
    F: Fn(&mut Processor, Instruction) -> Result<ActionOutcome> + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as an [`RInstructionAction`]
pub fn r_action<F>(f: F) -> RInstructionAction
where
    F: Fn(&mut Processor, RInstruction) -> Result<ActionOutcome> + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as an [`IInstructionAction`]
pub fn i_action<F>(f: F) -> IInstructionAction
where
    F: Fn(&mut Processor, IInstruction) -> Result<ActionOutcome> + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as an [`ErrorHandler`]
pub fn error_handler<F>(f: F) -> ErrorHandler
where
    F: Fn(&mut Processor, ExceptionCause) -> Result<()> + 'static,
{
    Rc::new(f)
}

/// Fixed table of 64 optional handlers indexed by a 6-bit code
pub struct DispatchTable<H> {
    slots: [Option<H>; 64],
}

impl<H> DispatchTable<H> {
    /// Number of slots, one per 6-bit code
    pub const SIZE: usize = 64;

    /// Create an empty table
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Handler installed for `code`
    ///
    /// Codes above 63 have no handler.
    #[inline(always)]
    pub fn get(&self, code: u8) -> Option<&H> {
        self.slots.get(code as usize).and_then(Option::as_ref)
    }

    /// Install `handler` for `code`, returning the handler it replaces
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::InvalidDispatchCode` if `code` is above 63.
    pub fn set(&mut self, code: u8, handler: H) -> Result<Option<H>> {
        let slot = self
            .slots
            .get_mut(code as usize)
            .ok_or(ProcessorError::InvalidDispatchCode(code))?;
        Ok(slot.replace(handler))
    }

    /// Remove the handler for `code`
    pub fn remove(&mut self, code: u8) -> Option<H> {
        self.slots.get_mut(code as usize).and_then(Option::take)
    }

    /// Install `handler` in every slot
    pub fn fill(&mut self, handler: H)
    where
        H: Clone,
    {
        for slot in &mut self.slots {
            *slot = Some(handler.clone());
        }
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no slot is populated
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Populated slots in code order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &H)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(code, slot)| slot.as_ref().map(|handler| (code as u8, handler)))
    }
}

impl<H> Default for DispatchTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone> Clone for DispatchTable<H> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<H> fmt::Debug for DispatchTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|(code, _)| code))
            .finish()
    }
}

/// Turn a function-code table into a single opcode handler
///
/// The resulting handler decodes the R-type view and runs
/// `functions[funct]`. A missing entry yields
/// `ActionOutcome::Unknown` carrying the original instruction, without
/// running anything.
pub fn run_from_function_table(functions: FunctionTable) -> InstructionAction {
    action(move |processor, instruction| {
        let r = instruction.as_r_type();
        match functions.get(r.funct()) {
            Some(callback) => callback(processor, r),
            None => Ok(ActionOutcome::Unknown(instruction)),
        }
    })
}

/// Turn a REGIMM branch-condition table into a single opcode handler
///
/// Same contract as [`run_from_function_table`], keyed by the rt field of
/// the I-type view.
pub fn run_from_branch_condition_table(conditions: BranchConditionTable) -> InstructionAction {
    action(move |processor, instruction| {
        let i = instruction.as_i_type();
        match conditions.get(i.rt()) {
            Some(callback) => callback(processor, i),
            None => Ok(ActionOutcome::Unknown(instruction)),
        }
    })
}
