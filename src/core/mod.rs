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

//! Core processor components
//!
//! - Instruction views and builders
//! - Opcode, function and branch-condition constants
//! - Processor (fetch, dispatch, delay slot, exceptions)
//! - Memory, register and coprocessor collaborators
//! - Configuration

pub mod config;
pub mod cpu;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod opcodes;
pub mod register;

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use cpu::{Processor, ProcessorBuilder, Simulator};
pub use error::{ProcessorError, Result};
pub use instruction::Instruction;
pub use memory::{ByteOrder, Memory, Ram};
