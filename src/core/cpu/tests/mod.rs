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

//! Processor test modules
//!
//! - `basic`: construction, registers, coprocessor slots
//! - `step`: fetch, PC advance and dispatch
//! - `tables`: function and branch-condition tables
//! - `delay_slot`: delayed actions and branch delay tracking
//! - `exceptions`: unknown instructions and the error handler


use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::dispatch::{action, ActionOutcome};
use super::*;
use crate::core::memory::Ram;

/// Big-endian RAM holding `program` from address 0, with room to spare
fn ram_with_program(program: &[u32]) -> MemoryHandle {
    let mut ram = Ram::new(0x1000);
    ram.load_words(0, ByteOrder::Big, program)
        .expect("program fits in test RAM");
    Rc::new(RefCell::new(ram))
}

/// Processor at PC 0 over `program`
fn processor_with_program(program: &[u32]) -> Processor {
    Processor::new(ram_with_program(program))
}

/// Install a handler for `opcode` that only counts invocations
fn counting_action(processor: &mut Processor, opcode: u8) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    processor
        .set_action(
            opcode,
            action(move |_, _| {
                seen.set(seen.get() + 1);
                Ok(ActionOutcome::Handled)
            }),
        )
        .expect("valid opcode");
    count
}

#[test]
fn test_memory_helper_is_big_endian() {
    let memory = ram_with_program(&[0x8C010004]);
    assert_eq!(memory.borrow().read_word(0, ByteOrder::Big).unwrap(), 0x8C010004);
}
