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

//! MIPS processor core library
//!
//! This library provides the instruction decode, dispatch and delay-slot
//! machinery of a MIPS simulator. Instruction semantics are supplied by the
//! host as handlers in 64-entry dispatch tables; memory, registers and
//! coprocessors are pluggable collaborators.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use mipscore::core::cpu::dispatch::{self, ActionOutcome};
//! use mipscore::core::memory::{ByteOrder, Ram};
//! use mipscore::core::opcodes::opcode;
//! use mipscore::core::Processor;
//!
//! let mut ram = Ram::new(16);
//! ram.load_words(0, ByteOrder::Big, &[0x00000000]).unwrap(); // NOP
//!
//! let mut cpu = Processor::new(Rc::new(RefCell::new(ram)));
//! cpu.set_action(opcode::SPECIAL, dispatch::action(|_, _| Ok(ActionOutcome::Handled)))
//!     .unwrap();
//!
//! // Execute one instruction
//! cpu.step().unwrap();
//! assert_eq!(cpu.pc(), 4);
//! ```

pub mod core;
