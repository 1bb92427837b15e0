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

/// A MIPS coprocessor as seen from the processor
///
/// Registers are selected by a 5-bit register number and a 3-bit bank
/// (the `sel` field of MIPS32 `MFC0`/`MTC0`). Implementations mask both
/// selectors to their width.
pub trait Coprocessor {
    /// Read a register
    fn load_word(&self, register: u8, bank: u8) -> u32;

    /// Write a register
    fn store_word(&mut self, register: u8, bank: u8, value: u32);
}

/// Shared handle to a coprocessor
pub type CoprocessorHandle = Rc<RefCell<dyn Coprocessor>>;

/// Coprocessor 0 (System Control) register file
///
/// Plain storage with the architectural register indices named. The
/// processor writes CAUSE and EPC here before handing an exception to the
/// configured error handler; any further system-control behavior is up to
/// the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemControl {
    /// Registers, indexed by `[bank][register]`
    regs: [[u32; 32]; 8],
}

impl SystemControl {
    /// Bad Virtual Address
    pub const BADA: u8 = 8;
    /// Status Register
    pub const SR: u8 = 12;
    /// Cause Register
    pub const CAUSE: u8 = 13;
    /// Exception PC
    pub const EPC: u8 = 14;
    /// Processor ID
    pub const PRID: u8 = 15;

    /// Exception code field of CAUSE, bits [6:2]
    pub const CAUSE_EXC_CODE_MASK: u32 = 0x7C;
    /// Shift of the exception code within CAUSE
    pub const CAUSE_EXC_CODE_SHIFT: u32 = 2;
    /// Branch delay flag of CAUSE, bit 31
    pub const CAUSE_BD: u32 = 1 << 31;

    /// Create a register file with every register cleared
    pub fn new() -> Self {
        Self {
            regs: [[0u32; 32]; 8],
        }
    }

    /// Create a register file reporting `prid` as its processor ID
    pub fn with_processor_id(prid: u32) -> Self {
        let mut cop0 = Self::new();
        cop0.regs[0][Self::PRID as usize] = prid;
        cop0
    }

    /// Exception code currently recorded in CAUSE
    pub fn exception_code(&self) -> u32 {
        (self.regs[0][Self::CAUSE as usize] & Self::CAUSE_EXC_CODE_MASK)
            >> Self::CAUSE_EXC_CODE_SHIFT
    }

    /// Whether CAUSE records the exception as taken in a branch delay slot
    pub fn branch_delay(&self) -> bool {
        self.regs[0][Self::CAUSE as usize] & Self::CAUSE_BD != 0
    }
}

impl Default for SystemControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Coprocessor for SystemControl {
    fn load_word(&self, register: u8, bank: u8) -> u32 {
        self.regs[(bank & 0x7) as usize][(register & 0x1F) as usize]
    }

    fn store_word(&mut self, register: u8, bank: u8, value: u32) {
        self.regs[(bank & 0x7) as usize][(register & 0x1F) as usize] = value;
    }
}

/// Exception cause codes
///
/// These correspond to the exception codes stored in the CAUSE register
/// when a CPU exception occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ExceptionCause {
    /// Interrupt (external or internal)
    Interrupt = 0,
    /// TLB modification (write to read-only page)
    TlbModified = 1,
    /// TLB miss on load or instruction fetch
    TlbLoad = 2,
    /// TLB miss on store
    TlbStore = 3,
    /// Address error on load
    AddressErrorLoad = 4,
    /// Address error on store
    AddressErrorStore = 5,
    /// Bus error on instruction fetch
    BusErrorInstruction = 6,
    /// Bus error on data access
    BusErrorData = 7,
    /// Syscall instruction executed
    Syscall = 8,
    /// Breakpoint instruction executed
    Breakpoint = 9,
    /// Reserved or illegal instruction
    ReservedInstruction = 10,
    /// Coprocessor unusable
    CoprocessorUnusable = 11,
    /// Arithmetic overflow
    Overflow = 12,
    /// Trap instruction condition met
    Trap = 13,
    /// Floating-point division by zero
    DivideByZero = 15,
    /// Floating-point overflow (shares its code with underflow)
    FloatOverflow = 16,
}

impl ExceptionCause {
    /// Floating-point underflow, encoded with the same code as overflow
    pub const FLOAT_UNDERFLOW: Self = Self::FloatOverflow;

    /// Numeric exception code
    #[inline(always)]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ExceptionCause {
    type Error = u32;

    fn try_from(code: u32) -> std::result::Result<Self, Self::Error> {
        let cause = match code {
            0 => Self::Interrupt,
            1 => Self::TlbModified,
            2 => Self::TlbLoad,
            3 => Self::TlbStore,
            4 => Self::AddressErrorLoad,
            5 => Self::AddressErrorStore,
            6 => Self::BusErrorInstruction,
            7 => Self::BusErrorData,
            8 => Self::Syscall,
            9 => Self::Breakpoint,
            10 => Self::ReservedInstruction,
            11 => Self::CoprocessorUnusable,
            12 => Self::Overflow,
            13 => Self::Trap,
            15 => Self::DivideByZero,
            16 => Self::FloatOverflow,
            _ => return Err(code),
        };
        Ok(cause)
    }
}
