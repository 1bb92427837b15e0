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

use std::fmt;

use super::Processor;

/// What a delayed action stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayKind {
    /// Control transfer; the next instruction runs in a branch delay slot
    Branch,
    /// Register write completing a load
    Load,
    /// Anything else a handler wants applied one instruction late
    Other,
}

/// Delay slot management structure
///
/// The MIPS pipeline lets exactly one instruction run before the effect of a
/// branch or load becomes visible. A handler that needs that latency stores
/// one of these on the processor; it fires after the next instruction's
/// handler has completed.
pub struct DelayedAction {
    kind: DelayKind,
    action: Box<dyn FnOnce(&mut Processor)>,
}

impl DelayedAction {
    /// Wrap an arbitrary action
    pub fn new<F>(kind: DelayKind, action: F) -> Self
    where
        F: FnOnce(&mut Processor) + 'static,
    {
        Self {
            kind,
            action: Box::new(action),
        }
    }

    /// Jump to `target`
    pub fn branch(target: u32) -> Self {
        Self::new(DelayKind::Branch, move |processor| processor.set_pc(target))
    }

    /// Write `value` to integer register `index`
    pub fn load(index: u8, value: u32) -> Self {
        Self::new(DelayKind::Load, move |processor| {
            processor.set_reg(index, value);
        })
    }

    /// Kind of this action
    pub fn kind(&self) -> DelayKind {
        self.kind
    }

    /// Whether this action is a control transfer
    pub fn is_branch(&self) -> bool {
        self.kind == DelayKind::Branch
    }

    pub(super) fn run(self, processor: &mut Processor) {
        (self.action)(processor);
    }
}

impl fmt::Debug for DelayedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedAction")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
