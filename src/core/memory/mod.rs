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

//! Memory collaborator
//!
//! The processor fetches instruction words through the [`Memory`] trait and
//! never owns the backing store. Byte order is a property of the processor
//! configuration and is passed in on every access, so the same store can be
//! read either way.
//!
//! [`Ram`] is a flat, zero-based byte array suitable for tests and simple
//! hosts. Paging and address translation belong to richer implementations.
//!
//! # Example
//!
//! ```
//! use mipscore::core::memory::{ByteOrder, Memory, Ram};
//!
//! let mut ram = Ram::new(1024);
//! ram.write_word(0x10, ByteOrder::Big, 0x12345678).unwrap();
//!
//! assert_eq!(ram.read_word(0x10, ByteOrder::Big).unwrap(), 0x12345678);
//! assert_eq!(ram.read_word(0x10, ByteOrder::Little).unwrap(), 0x78563412);
//! ```

use crate::core::error::{ProcessorError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

#[cfg(test)]
mod tests;

/// Byte order used to assemble memory words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Most significant byte at the lowest address
    #[default]
    Big,
    /// Least significant byte at the lowest address
    Little,
}

impl ByteOrder {
    /// Assemble a word from four bytes in this order
    #[inline(always)]
    pub fn word_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }

    /// Split a word into four bytes in this order
    #[inline(always)]
    pub fn word_to_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }
}

/// Byte-addressable memory as seen by the processor
pub trait Memory {
    /// Read the 32-bit word at `address`
    fn read_word(&self, address: u32, order: ByteOrder) -> Result<u32>;

    /// Write the 32-bit word at `address`
    fn write_word(&mut self, address: u32, order: ByteOrder, value: u32) -> Result<()>;
}

/// Shared handle to a memory collaborator
pub type MemoryHandle = Rc<RefCell<dyn Memory>>;

/// Flat RAM starting at address 0
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create `size` bytes of zeroed RAM
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    /// Wrap an existing byte image
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the RAM has zero size
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Clear every byte to zero
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Copy `bytes` into RAM starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::InvalidMemoryAccess` if the image does not
    /// fit; RAM is left untouched in that case.
    pub fn load(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        let range = self.range(address, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Load a raw image file into RAM starting at `address`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mipscore::core::memory::Ram;
    ///
    /// let mut ram = Ram::new(1 << 20);
    /// ram.load_file("program.bin", 0).unwrap();
    /// ```
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, address: u32) -> Result<usize> {
        let mut file = File::open(path)?;
        let mut image = Vec::new();
        file.read_to_end(&mut image)?;
        self.load(address, &image)?;
        log::debug!("Loaded {} bytes at 0x{:08X}", image.len(), address);
        Ok(image.len())
    }

    /// Write a sequence of words starting at `address`
    pub fn load_words(&mut self, address: u32, order: ByteOrder, words: &[u32]) -> Result<()> {
        for (i, &word) in words.iter().enumerate() {
            let offset = u32::try_from(i * 4)
                .map_err(|_| ProcessorError::InvalidMemoryAccess { address })?;
            self.write_word(address.wrapping_add(offset), order, word)?;
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read8(&self, address: u32) -> Result<u8> {
        let range = self.range(address, 1)?;
        Ok(self.data[range.start])
    }

    /// Write a single byte
    pub fn write8(&mut self, address: u32, value: u8) -> Result<()> {
        let range = self.range(address, 1)?;
        self.data[range.start] = value;
        Ok(())
    }

    fn range(&self, address: u32, size: usize) -> Result<std::ops::Range<usize>> {
        let start = address as usize;
        match start.checked_add(size) {
            Some(end) if end <= self.data.len() => Ok(start..end),
            _ => Err(ProcessorError::InvalidMemoryAccess { address }),
        }
    }

    fn word_range(&self, address: u32) -> Result<std::ops::Range<usize>> {
        if address & 0x3 != 0 {
            return Err(ProcessorError::UnalignedAccess { address, size: 4 });
        }
        self.range(address, 4)
    }
}

impl Memory for Ram {
    fn read_word(&self, address: u32, order: ByteOrder) -> Result<u32> {
        let range = self.word_range(address)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[range]);
        Ok(order.word_from_bytes(bytes))
    }

    fn write_word(&mut self, address: u32, order: ByteOrder, value: u32) -> Result<()> {
        let range = self.word_range(address)?;
        self.data[range].copy_from_slice(&order.word_to_bytes(value));
        Ok(())
    }
}
