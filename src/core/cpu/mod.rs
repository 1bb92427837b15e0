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

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::ProcessorConfig;
use crate::core::error::{ProcessorError, Result};
use crate::core::instruction::Instruction;
use crate::core::memory::{ByteOrder, MemoryHandle};
use crate::core::register::{
    float_registers, general_purpose_registers, FloatRegisterHandle, RegisterHandle,
};

// Module declarations
mod cop0;
mod delay;
mod disassembler;
pub mod dispatch;
#[cfg(test)]
mod tests;

// Re-exports
pub use cop0::{Coprocessor, CoprocessorHandle, ExceptionCause, SystemControl};
pub use delay::{DelayKind, DelayedAction};
pub use disassembler::Disassembler;
pub use dispatch::{ActionOutcome, DispatchTable, ErrorHandler, InstructionAction, OpcodeTable};

/// Anything that executes instructions one step at a time
pub trait Simulator {
    /// Execute one instruction
    fn step(&mut self) -> Result<()>;

    /// Execute up to `max_steps` instructions
    ///
    /// Stops at the first error and returns it; otherwise returns the number
    /// of steps executed.
    fn run(&mut self, max_steps: usize) -> Result<usize> {
        for _ in 0..max_steps {
            self.step()?;
        }
        Ok(max_steps)
    }
}

/// MIPS processor core
///
/// Owns the opcode table, the exception handler and the delay slot. Memory,
/// registers and coprocessors are shared handles supplied by the caller; the
/// processor only references them.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use mipscore::core::cpu::dispatch::{self, ActionOutcome};
/// use mipscore::core::cpu::Processor;
/// use mipscore::core::instruction::RsRt;
/// use mipscore::core::memory::{ByteOrder, Memory, Ram};
/// use mipscore::core::opcodes::opcode;
///
/// let mut ram = Ram::new(64);
/// ram.write_word(0, ByteOrder::Big, 0x3C011234).unwrap(); // LUI r1, 0x1234
///
/// let mut cpu = Processor::new(Rc::new(RefCell::new(ram)));
/// cpu.set_action(opcode::LUI, dispatch::action(|cpu, instr| {
///     let i = instr.as_i_type();
///     cpu.set_reg(i.rt(), u32::from(i.immediate()) << 16);
///     Ok(ActionOutcome::Handled)
/// }))
/// .unwrap();
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.reg(1), 0x12340000);
/// assert_eq!(cpu.pc(), 4);
/// ```
pub struct Processor {
    /// Byte order for instruction fetch
    byte_order: ByteOrder,

    /// Instruction memory
    memory: MemoryHandle,

    /// Primary opcode dispatch table
    actions: OpcodeTable,

    /// Last-resort exception handler
    error_handler: Option<ErrorHandler>,

    /// General purpose registers (r0-r31)
    registers: [RegisterHandle; 32],

    /// Floating-point registers (f0-f31)
    float_registers: [FloatRegisterHandle; 32],

    /// Coprocessors 0-3
    coprocessors: [Option<CoprocessorHandle>; 4],

    /// HI register (multiplication/division result upper 32 bits)
    hi: u32,

    /// LO register (multiplication/division result lower 32 bits)
    lo: u32,

    /// Program counter
    pc: u32,

    /// Branch delay slot flag
    in_branch_delay: bool,

    /// Action scheduled for the next instruction
    delay_slot: Option<DelayedAction>,

    /// Action taken from the delay slot, run once the current instruction
    /// completes
    executing_delay: Option<DelayedAction>,

    /// Address the current instruction was fetched from
    current_pc: u32,

    /// Current instruction (for exceptions and debugging)
    current_instruction: Instruction,
}

impl Processor {
    /// Create a processor fetching from `memory`
    ///
    /// Starts with PC 0, big-endian fetch, an empty opcode table, no
    /// exception handler, no coprocessors, and the conventional register
    /// files (r0 hardwired to zero).
    pub fn new(memory: MemoryHandle) -> Self {
        ProcessorBuilder::new(memory).build()
    }

    /// Start building a processor fetching from `memory`
    pub fn builder(memory: MemoryHandle) -> ProcessorBuilder {
        ProcessorBuilder::new(memory)
    }

    /// Execute one instruction
    ///
    /// 1. Fetch the word at PC
    /// 2. Advance PC by 4
    /// 3. Take the delayed action scheduled by the previous instruction
    /// 4. Dispatch on the opcode; unknown words raise a reserved-instruction
    ///    exception
    /// 5. Run the delayed action taken in step 3, unless an exception
    ///    handler cancelled it
    ///
    /// # Errors
    ///
    /// Fetch errors are returned before any state changes. Otherwise the
    /// result of the handler (or of exception resolution) is returned after
    /// the delayed action has run.
    pub fn step(&mut self) -> Result<()> {
        // Instruction fetch
        let pc = self.pc;
        let word = self.memory.borrow().read_word(pc, self.byte_order)?;
        let instruction = Instruction::new(word);
        log::trace!("PC=0x{:08X} instruction=0x{:08X}", pc, word);

        self.current_pc = pc;
        self.current_instruction = instruction;
        self.pc = pc.wrapping_add(4);

        // Handlers of this step may schedule their own action
        self.executing_delay = self.delay_slot.take();
        self.in_branch_delay = self
            .executing_delay
            .as_ref()
            .is_some_and(DelayedAction::is_branch);

        let result = match self.dispatch(instruction) {
            Ok(ActionOutcome::Handled) => Ok(()),
            Ok(ActionOutcome::Unknown(unknown)) => self.handle_unknown_instruction(unknown),
            Err(e) => Err(e),
        };

        if let Some(delayed) = self.executing_delay.take() {
            delayed.run(self);
        }
        self.in_branch_delay = false;

        result
    }

    fn dispatch(&mut self, instruction: Instruction) -> Result<ActionOutcome> {
        match self.actions.get(instruction.opcode()).cloned() {
            Some(action) => action(self, instruction),
            None => Ok(ActionOutcome::Unknown(instruction)),
        }
    }

    fn handle_unknown_instruction(&mut self, instruction: Instruction) -> Result<()> {
        log::debug!(
            "Unknown instruction 0x{:08X} (opcode 0x{:02X}) at PC=0x{:08X}",
            instruction.raw(),
            instruction.opcode(),
            self.current_pc
        );
        self.raise(ExceptionCause::ReservedInstruction, instruction)
    }

    /// Raise an exception for the instruction currently executing
    ///
    /// Records the cause, the branch delay flag and EPC in coprocessor 0 (if
    /// one is installed), then hands off to the error handler. EPC is the
    /// fetch address of the current instruction, or of the branch when the
    /// instruction sits in a delay slot. A handler that vectors elsewhere
    /// should call [`Processor::cancel_pending`] so the branch does not
    /// override its PC.
    ///
    /// # Errors
    ///
    /// Returns whatever the error handler returns. Without a handler, a
    /// reserved instruction is reported as
    /// `ProcessorError::UnknownInstruction` carrying the raw word, and any
    /// other cause as `ProcessorError::Exception`.
    pub fn exception(&mut self, cause: ExceptionCause) -> Result<()> {
        self.raise(cause, self.current_instruction)
    }

    fn raise(&mut self, cause: ExceptionCause, instruction: Instruction) -> Result<()> {
        let epc = if self.in_branch_delay {
            self.current_pc.wrapping_sub(4) // branch instruction address
        } else {
            self.current_pc
        };

        if let Some(cop0) = &self.coprocessors[0] {
            let mut cop0 = cop0.borrow_mut();
            let mut cause_reg = cop0.load_word(SystemControl::CAUSE, 0);
            cause_reg = (cause_reg & !SystemControl::CAUSE_EXC_CODE_MASK)
                | (cause.code() << SystemControl::CAUSE_EXC_CODE_SHIFT);
            if self.in_branch_delay {
                cause_reg |= SystemControl::CAUSE_BD;
            } else {
                cause_reg &= !SystemControl::CAUSE_BD;
            }
            cop0.store_word(SystemControl::CAUSE, 0, cause_reg);
            cop0.store_word(SystemControl::EPC, 0, epc);
        }

        log::warn!(
            "EXCEPTION: cause={:?}, EPC=0x{:08X}, in_delay={}, instruction=0x{:08X}",
            cause,
            epc,
            self.in_branch_delay,
            instruction.raw()
        );

        match self.error_handler.clone() {
            Some(handler) => handler(self, cause),
            None if cause == ExceptionCause::ReservedInstruction => {
                Err(ProcessorError::UnknownInstruction(instruction.raw()))
            }
            None => Err(ProcessorError::Exception(cause)),
        }
    }

    /// Schedule `action` to run after the next instruction
    ///
    /// Replaces any action already pending.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce(&mut Processor) + 'static,
    {
        self.schedule_delayed(DelayedAction::new(DelayKind::Other, action));
    }

    /// Schedule a prepared [`DelayedAction`], replacing any pending one
    pub fn schedule_delayed(&mut self, delayed: DelayedAction) {
        if let Some(replaced) = self.delay_slot.replace(delayed) {
            log::trace!("Replacing pending {:?} action", replaced.kind());
        }
    }

    /// Jump to `target` after the delay slot instruction
    pub fn schedule_branch(&mut self, target: u32) {
        self.schedule_delayed(DelayedAction::branch(target));
    }

    /// Write `value` to register `index` after the next instruction
    pub fn schedule_load(&mut self, index: u8, value: u32) {
        self.schedule_delayed(DelayedAction::load(index, value));
    }

    /// Whether an action is waiting for the next instruction
    pub fn has_pending_action(&self) -> bool {
        self.delay_slot.is_some()
    }

    /// Kind of the pending action, if any
    pub fn pending_kind(&self) -> Option<DelayKind> {
        self.delay_slot.as_ref().map(DelayedAction::kind)
    }

    /// Drop every action that has not run yet
    ///
    /// Covers the action scheduled for the next instruction and, while an
    /// instruction is executing, the one taken for its delay slot. Returns
    /// the scheduled action if there was one, otherwise the delay slot one.
    pub fn cancel_pending(&mut self) -> Option<DelayedAction> {
        let executing = self.cancel_delay_slot_effect();
        self.delay_slot.take().or(executing)
    }

    /// Drop the action taken for the instruction currently executing
    ///
    /// Only meaningful from inside a handler; between steps nothing is in
    /// flight.
    pub fn cancel_delay_slot_effect(&mut self) -> Option<DelayedAction> {
        self.executing_delay.take()
    }

    /// Check if currently executing a branch delay slot instruction
    pub fn in_delay_slot(&self) -> bool {
        self.in_branch_delay
    }

    /// Read from general purpose register
    ///
    /// # Panics
    ///
    /// Panics if `index` is above 31.
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        self.registers[index as usize].borrow().value32()
    }

    /// Write to general purpose register
    ///
    /// Returns `false` if the register discarded the write (r0).
    ///
    /// # Panics
    ///
    /// Panics if `index` is above 31.
    #[inline(always)]
    pub fn set_reg(&mut self, index: u8, value: u32) -> bool {
        self.registers[index as usize].borrow_mut().set_value32(value)
    }

    /// Handle of general purpose register `index`
    pub fn register(&self, index: u8) -> Result<&RegisterHandle> {
        self.registers
            .get(index as usize)
            .ok_or(ProcessorError::InvalidRegister { index })
    }

    /// Handle of floating-point register `index`
    pub fn float_register(&self, index: u8) -> Result<&FloatRegisterHandle> {
        self.float_registers
            .get(index as usize)
            .ok_or(ProcessorError::InvalidRegister { index })
    }

    /// Handle of coprocessor `index` (0-3), if installed
    pub fn coprocessor(&self, index: usize) -> Option<&CoprocessorHandle> {
        self.coprocessors.get(index).and_then(Option::as_ref)
    }

    /// Install or remove coprocessor `index` (0-3)
    ///
    /// Indices above 3 are ignored.
    pub fn set_coprocessor(&mut self, index: usize, coprocessor: Option<CoprocessorHandle>) {
        if let Some(slot) = self.coprocessors.get_mut(index) {
            *slot = coprocessor;
        }
    }

    /// Install `action` for `opcode`, returning the one it replaces
    pub fn set_action(
        &mut self,
        opcode: u8,
        action: InstructionAction,
    ) -> Result<Option<InstructionAction>> {
        self.actions.set(opcode, action)
    }

    /// Primary opcode table
    pub fn actions(&self) -> &OpcodeTable {
        &self.actions
    }

    /// Mutable primary opcode table
    ///
    /// Handlers may rewrite the table while running; the change takes effect
    /// from the next dispatch.
    pub fn actions_mut(&mut self) -> &mut OpcodeTable {
        &mut self.actions
    }

    /// Install or remove the last-resort exception handler
    pub fn set_error_handler(&mut self, handler: Option<ErrorHandler>) {
        self.error_handler = handler;
    }

    /// Get current PC value
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Set PC
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// HI register
    pub fn hi(&self) -> u32 {
        self.hi
    }

    /// Set HI register
    pub fn set_hi(&mut self, value: u32) {
        self.hi = value;
    }

    /// LO register
    pub fn lo(&self) -> u32 {
        self.lo
    }

    /// Set LO register
    pub fn set_lo(&mut self, value: u32) {
        self.lo = value;
    }

    /// Byte order used for instruction fetch
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Memory collaborator
    pub fn memory(&self) -> &MemoryHandle {
        &self.memory
    }

    /// Instruction fetched by the most recent step
    pub fn current_instruction(&self) -> Instruction {
        self.current_instruction
    }

    /// Fetch address of the most recent step's instruction
    pub fn current_pc(&self) -> u32 {
        self.current_pc
    }

    /// Dump all CPU registers to the log for debugging
    pub fn dump_registers(&self) {
        log::info!(
            "PC: 0x{:08X}  HI: 0x{:08X}  LO: 0x{:08X}",
            self.pc,
            self.hi,
            self.lo
        );
        for row in 0..8u8 {
            let base = row * 4;
            log::info!(
                "r{:2}: 0x{:08X}  r{:2}: 0x{:08X}  r{:2}: 0x{:08X}  r{:2}: 0x{:08X}",
                base,
                self.reg(base),
                base + 1,
                self.reg(base + 1),
                base + 2,
                self.reg(base + 2),
                base + 3,
                self.reg(base + 3)
            );
        }
    }
}

impl Simulator for Processor {
    fn step(&mut self) -> Result<()> {
        Processor::step(self)
    }
}

/// Step-by-step construction of a [`Processor`]
pub struct ProcessorBuilder {
    memory: MemoryHandle,
    byte_order: ByteOrder,
    pc: u32,
    actions: OpcodeTable,
    error_handler: Option<ErrorHandler>,
    registers: Option<[RegisterHandle; 32]>,
    float_registers: Option<[FloatRegisterHandle; 32]>,
    coprocessors: [Option<CoprocessorHandle>; 4],
}

impl ProcessorBuilder {
    /// Start with defaults, fetching from `memory`
    pub fn new(memory: MemoryHandle) -> Self {
        Self {
            memory,
            byte_order: ByteOrder::default(),
            pc: 0,
            actions: OpcodeTable::new(),
            error_handler: None,
            registers: None,
            float_registers: None,
            coprocessors: [None, None, None, None],
        }
    }

    /// Start from a configuration, fetching from `memory`
    pub fn from_config(config: &ProcessorConfig, memory: MemoryHandle) -> Self {
        Self::new(memory)
            .byte_order(config.byte_order)
            .pc(config.reset_vector)
    }

    /// Byte order for instruction fetch
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Initial program counter
    pub fn pc(mut self, pc: u32) -> Self {
        self.pc = pc;
        self
    }

    /// Install a handler for one opcode
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::InvalidDispatchCode` if `opcode` is above 63.
    pub fn action(mut self, opcode: u8, action: InstructionAction) -> Result<Self> {
        self.actions.set(opcode, action)?;
        Ok(self)
    }

    /// Replace the whole opcode table
    pub fn actions(mut self, actions: OpcodeTable) -> Self {
        self.actions = actions;
        self
    }

    /// Last-resort exception handler
    pub fn error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }

    /// Integer register handles
    pub fn registers(mut self, registers: [RegisterHandle; 32]) -> Self {
        self.registers = Some(registers);
        self
    }

    /// Floating-point register handles
    pub fn float_registers(mut self, registers: [FloatRegisterHandle; 32]) -> Self {
        self.float_registers = Some(registers);
        self
    }

    /// Install coprocessor `index` (0-3); other indices are ignored
    pub fn coprocessor(mut self, index: usize, coprocessor: CoprocessorHandle) -> Self {
        if let Some(slot) = self.coprocessors.get_mut(index) {
            *slot = Some(coprocessor);
        }
        self
    }

    /// Install a fresh [`SystemControl`] as coprocessor 0
    pub fn system_control(self) -> Self {
        self.coprocessor(0, Rc::new(RefCell::new(SystemControl::new())))
    }

    /// Finish construction
    pub fn build(self) -> Processor {
        Processor {
            byte_order: self.byte_order,
            memory: self.memory,
            actions: self.actions,
            error_handler: self.error_handler,
            registers: self.registers.unwrap_or_else(general_purpose_registers),
            float_registers: self.float_registers.unwrap_or_else(float_registers),
            coprocessors: self.coprocessors,
            hi: 0,
            lo: 0,
            pc: self.pc,
            in_branch_delay: false,
            delay_slot: None,
            executing_delay: None,
            current_pc: self.pc,
            current_instruction: Instruction::default(),
        }
    }
}
