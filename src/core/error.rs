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

/// Processor error types
use thiserror::Error;

use crate::core::cpu::ExceptionCause;

/// Result type for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Main error type for the processor core
///
/// Only [`ProcessorError::UnknownInstruction`] is ever recovered by the
/// engine (through the exception handler). Every other variant produced by a
/// handler or a collaborator reaches the caller of `step` unchanged.
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Unknown instruction: 0x{0:08X}")]
    UnknownInstruction(u32),

    #[error("Invalid memory access at 0x{address:08X}")]
    InvalidMemoryAccess { address: u32 },

    #[error("Unaligned memory access: {size}-byte access at 0x{address:08X}")]
    UnalignedAccess { address: u32, size: u8 },

    #[error("Unhandled CPU exception: {0:?}")]
    Exception(ExceptionCause),

    #[error("Invalid dispatch code: {0} (valid range: 0-63)")]
    InvalidDispatchCode(u8),

    #[error("Invalid register index: {index} (valid range: 0-31)")]
    InvalidRegister { index: u8 },

    #[error("Instruction handler error: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessorError {
    /// Wrap an arbitrary handler-specific error
    ///
    /// # Example
    /// ```
    /// use mipscore::core::error::ProcessorError;
    ///
    /// let err = ProcessorError::handler(std::fmt::Error);
    /// assert!(matches!(err, ProcessorError::Handler(_)));
    /// ```
    pub fn handler<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Handler(Box::new(error))
    }

    /// Check whether this is the unknown-instruction error for `raw`
    pub fn is_unknown_instruction(&self, raw: u32) -> bool {
        matches!(self, Self::UnknownInstruction(word) if *word == raw)
    }
}
