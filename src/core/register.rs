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

//! Register contracts
//!
//! Registers are collaborators: the processor only holds shared handles to
//! them. Storage is up to the caller; two reference implementations are
//! provided, a plain read/write register and the hardwired r0.

use std::cell::RefCell;
use std::rc::Rc;

/// A 32-bit integer register
pub trait Register32 {
    /// Current value
    fn value32(&self) -> u32;

    /// Write `value`
    ///
    /// Returns `true` if the value was actually stored.
    fn set_value32(&mut self, value: u32) -> bool;
}

/// A floating-point register, stored as raw 64-bit contents
pub trait FloatRegister {
    /// Raw register contents
    fn bits64(&self) -> u64;

    /// Write raw contents
    ///
    /// Returns `true` if the value was actually stored.
    fn set_bits64(&mut self, bits: u64) -> bool;

    /// Contents as a double-precision value
    fn value_f64(&self) -> f64 {
        f64::from_bits(self.bits64())
    }

    /// Store a double-precision value
    fn set_value_f64(&mut self, value: f64) -> bool {
        self.set_bits64(value.to_bits())
    }

    /// Low 32 bits as a single-precision value
    fn value_f32(&self) -> f32 {
        f32::from_bits(self.bits64() as u32)
    }

    /// Store a single-precision value in the low 32 bits, clearing the rest
    fn set_value_f32(&mut self, value: f32) -> bool {
        self.set_bits64(value.to_bits() as u64)
    }
}

/// Shared handle to an integer register
pub type RegisterHandle = Rc<RefCell<dyn Register32>>;

/// Shared handle to a floating-point register
pub type FloatRegisterHandle = Rc<RefCell<dyn FloatRegister>>;

/// Plain read/write 32-bit register
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BasicRegister32 {
    value: u32,
}

impl BasicRegister32 {
    /// Create a register holding `value`
    pub const fn new(value: u32) -> Self {
        Self { value }
    }
}

impl Register32 for BasicRegister32 {
    #[inline(always)]
    fn value32(&self) -> u32 {
        self.value
    }

    #[inline(always)]
    fn set_value32(&mut self, value: u32) -> bool {
        self.value = value;
        true
    }
}

/// Hardwired zero register (r0)
///
/// Reads always return 0. Writes are accepted but discarded and report
/// `false`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZeroRegister32;

impl Register32 for ZeroRegister32 {
    #[inline(always)]
    fn value32(&self) -> u32 {
        0
    }

    #[inline(always)]
    fn set_value32(&mut self, _value: u32) -> bool {
        false
    }
}

/// Plain read/write floating-point register
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BasicFloatRegister {
    bits: u64,
}

impl FloatRegister for BasicFloatRegister {
    fn bits64(&self) -> u64 {
        self.bits
    }

    fn set_bits64(&mut self, bits: u64) -> bool {
        self.bits = bits;
        true
    }
}

/// Build the conventional integer register file
///
/// r0 is a [`ZeroRegister32`], r1-r31 are [`BasicRegister32`] set to 0.
///
/// # Example
/// ```
/// use mipscore::core::register::general_purpose_registers;
///
/// let regs = general_purpose_registers();
/// assert!(!regs[0].borrow_mut().set_value32(5));
/// assert!(regs[1].borrow_mut().set_value32(5));
/// assert_eq!(regs[1].borrow().value32(), 5);
/// ```
pub fn general_purpose_registers() -> [RegisterHandle; 32] {
    std::array::from_fn(|index| -> RegisterHandle {
        if index == 0 {
            Rc::new(RefCell::new(ZeroRegister32))
        } else {
            Rc::new(RefCell::new(BasicRegister32::default()))
        }
    })
}

/// Build a floating-point register file of 32 [`BasicFloatRegister`]s
pub fn float_registers() -> [FloatRegisterHandle; 32] {
    std::array::from_fn(|_| -> FloatRegisterHandle {
        Rc::new(RefCell::new(BasicFloatRegister::default()))
    })
}
