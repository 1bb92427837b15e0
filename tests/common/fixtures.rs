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

//! Test fixtures for common test scenarios
//!
//! [`create_processor`] wires a small integer subset of MIPS I onto the
//! dispatch tables, enough to run the programs in `test_roms`.

use std::cell::RefCell;
use std::rc::Rc;

use mipscore::core::cpu::dispatch::{
    self, ActionOutcome, BranchConditionTable, FunctionTable, OpcodeTable,
};
use mipscore::core::cpu::{ExceptionCause, Processor};
use mipscore::core::error::{ProcessorError, Result};
use mipscore::core::instruction::{IInstruction, RsRt};
use mipscore::core::memory::{ByteOrder, MemoryHandle, Ram};
use mipscore::core::opcodes::{branch_condition, function, opcode};

/// Create RAM of `size` bytes holding `program` at address 0
#[allow(dead_code)]
pub fn create_memory(size: usize, program: &[u32]) -> MemoryHandle {
    let mut ram = Ram::new(size);
    ram.load_words(0, ByteOrder::Big, program)
        .expect("Failed to load program");
    Rc::new(RefCell::new(ram))
}

/// Create a processor at PC 0 over `program` with the test instruction set
#[allow(dead_code)]
pub fn create_processor(program: &[u32]) -> Processor {
    let memory = create_memory(0x1000, program);
    Processor::builder(memory)
        .actions(test_instruction_set())
        .system_control()
        .build()
}

/// Branch target relative to the delay slot
fn branch_target(cpu: &Processor, i: IInstruction) -> u32 {
    let offset = (i32::from(i.signed_immediate()) << 2) as u32;
    cpu.pc().wrapping_add(offset)
}

fn branch_if(cpu: &mut Processor, i: IInstruction, taken: bool) -> Result<ActionOutcome> {
    if taken {
        let target = branch_target(cpu, i);
        cpu.schedule_branch(target);
    }
    Ok(ActionOutcome::Handled)
}

fn effective_address(cpu: &Processor, i: IInstruction) -> u32 {
    cpu.reg(i.rs())
        .wrapping_add(i32::from(i.signed_immediate()) as u32)
}

/// Opcode table for ADDIU, LUI, ORI, LW, SW, BEQ, BNE, J, JAL and the
/// SPECIAL/REGIMM subsets below
#[allow(dead_code)]
pub fn test_instruction_set() -> OpcodeTable {
    let mut table = OpcodeTable::new();

    table
        .set(opcode::SPECIAL, dispatch::run_from_function_table(special_functions()))
        .unwrap();
    table
        .set(
            opcode::REGIMM,
            dispatch::run_from_branch_condition_table(branch_conditions()),
        )
        .unwrap();

    table
        .set(
            opcode::ADDIU,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                let value = cpu
                    .reg(i.rs())
                    .wrapping_add(i32::from(i.signed_immediate()) as u32);
                cpu.set_reg(i.rt(), value);
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::LUI,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                cpu.set_reg(i.rt(), u32::from(i.immediate()) << 16);
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::ORI,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                cpu.set_reg(i.rt(), cpu.reg(i.rs()) | u32::from(i.immediate()));
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::LW,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                let address = effective_address(cpu, i);
                let value = cpu.memory().borrow().read_word(address, cpu.byte_order())?;
                cpu.schedule_load(i.rt(), value);
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::SW,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                let address = effective_address(cpu, i);
                let value = cpu.reg(i.rt());
                cpu.memory()
                    .borrow_mut()
                    .write_word(address, cpu.byte_order(), value)?;
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::BEQ,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                let taken = cpu.reg(i.rs()) == cpu.reg(i.rt());
                branch_if(cpu, i, taken)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::BNE,
            dispatch::action(|cpu, instr| {
                let i = instr.as_i_type();
                let taken = cpu.reg(i.rs()) != cpu.reg(i.rt());
                branch_if(cpu, i, taken)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::J,
            dispatch::action(|cpu, instr| {
                let target = (cpu.pc() & 0xF000_0000) | (instr.as_j_type().address() << 2);
                cpu.schedule_branch(target);
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    table
        .set(
            opcode::JAL,
            dispatch::action(|cpu, instr| {
                let target = (cpu.pc() & 0xF000_0000) | (instr.as_j_type().address() << 2);
                cpu.set_reg(31, cpu.pc().wrapping_add(4));
                cpu.schedule_branch(target);
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();

    table
}

fn special_functions() -> FunctionTable {
    let mut functions = FunctionTable::new();

    functions
        .set(
            function::SLL,
            dispatch::r_action(|cpu, r| {
                cpu.set_reg(r.rd(), cpu.reg(r.rt()) << r.shamt());
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    functions
        .set(
            function::ADDU,
            dispatch::r_action(|cpu, r| {
                cpu.set_reg(r.rd(), cpu.reg(r.rs()).wrapping_add(cpu.reg(r.rt())));
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    functions
        .set(
            function::SUBU,
            dispatch::r_action(|cpu, r| {
                cpu.set_reg(r.rd(), cpu.reg(r.rs()).wrapping_sub(cpu.reg(r.rt())));
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    functions
        .set(
            function::OR,
            dispatch::r_action(|cpu, r| {
                cpu.set_reg(r.rd(), cpu.reg(r.rs()) | cpu.reg(r.rt()));
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    functions
        .set(
            function::JR,
            dispatch::r_action(|cpu, r| {
                let target = cpu.reg(r.rs());
                cpu.schedule_branch(target);
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();
    functions
        .set(
            function::SYSCALL,
            dispatch::r_action(|cpu, _| {
                cpu.exception(ExceptionCause::Syscall)?;
                Ok(ActionOutcome::Handled)
            }),
        )
        .unwrap();

    functions
}

fn branch_conditions() -> BranchConditionTable {
    let mut conditions = BranchConditionTable::new();

    conditions
        .set(
            branch_condition::BLTZ,
            dispatch::i_action(|cpu, i| {
                let taken = (cpu.reg(i.rs()) as i32) < 0;
                branch_if(cpu, i, taken)
            }),
        )
        .unwrap();
    conditions
        .set(
            branch_condition::BGEZ,
            dispatch::i_action(|cpu, i| {
                let taken = (cpu.reg(i.rs()) as i32) >= 0;
                branch_if(cpu, i, taken)
            }),
        )
        .unwrap();

    conditions
}

/// Step until a SYSCALL stops the processor, returning the steps taken
///
/// Panics on any other error or if `max_steps` is reached first.
#[allow(dead_code)]
pub fn run_until_syscall(cpu: &mut Processor, max_steps: usize) -> usize {
    for executed in 1..=max_steps {
        match cpu.step() {
            Ok(()) => {}
            Err(ProcessorError::Exception(ExceptionCause::Syscall)) => return executed,
            Err(e) => panic!("Step {} failed at PC=0x{:08X}: {}", executed, cpu.pc(), e),
        }
    }
    panic!("No SYSCALL within {} steps", max_steps);
}
