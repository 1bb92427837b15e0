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

//! Small test programs
//!
//! Every program ends in SYSCALL so `run_until_syscall` can stop on it.

/// SYSCALL
pub const SYSCALL: u32 = 0x0000000C;

/// NOP (SLL r0, r0, 0)
pub const NOP: u32 = 0x00000000;

/// Test program: Register arithmetic
#[allow(dead_code)]
pub fn test_program_basic_arithmetic() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1      ; $1 = 1
        0x24020002, // ADDIU $2, $0, 2      ; $2 = 2
        0x00221821, // ADDU  $3, $1, $2     ; $3 = 3
        0x00611023, // SUBU  $2, $3, $1     ; $2 = 2
        SYSCALL,
    ]
}

/// Test program: LUI/ORI constant build and a store
#[allow(dead_code)]
pub fn test_program_load_store() -> Vec<u32> {
    vec![
        0x3C01DEAD, // LUI   $1, 0xDEAD
        0x3421BEEF, // ORI   $1, $1, 0xBEEF ; $1 = 0xDEADBEEF
        0xAC010100, // SW    $1, 0x100($0)
        0x8C020100, // LW    $2, 0x100($0)
        NOP,        // load delay slot
        SYSCALL,
    ]
}

/// Test program: taken branch with an instruction in the delay slot
#[allow(dead_code)]
pub fn test_program_branch_delay() -> Vec<u32> {
    vec![
        0x24010005, // 0x00: ADDIU $1, $0, 5
        0x10000002, // 0x04: BEQ   $0, $0, +2   ; -> 0x10
        0x24020007, // 0x08: ADDIU $2, $0, 7    ; delay slot, executes
        0x24030009, // 0x0C: ADDIU $3, $0, 9    ; skipped
        SYSCALL,    // 0x10
    ]
}

/// Test program: load delay slot sees the old register value
#[allow(dead_code)]
pub fn test_program_load_delay() -> Vec<u32> {
    let mut program = vec![
        0x8C010020, // 0x00: LW    $1, 0x20($0)
        0x00201021, // 0x04: ADDU  $2, $1, $0   ; old $1
        0x00201821, // 0x08: ADDU  $3, $1, $0   ; loaded $1
        SYSCALL,    // 0x0C
    ];
    program.resize(8, NOP);
    program.push(0xCAFEBABE); // 0x20: data
    program
}

/// Test program: countdown loop, $2 += 10 three times
#[allow(dead_code)]
pub fn test_program_loop() -> Vec<u32> {
    vec![
        0x24010003, // 0x00: ADDIU $1, $0, 3
        0x2442000A, // 0x04: ADDIU $2, $2, 10   ; loop:
        0x2421FFFF, // 0x08: ADDIU $1, $1, -1
        0x1420FFFD, // 0x0C: BNE   $1, $0, loop
        NOP,        // 0x10: delay slot
        SYSCALL,    // 0x14
    ]
}

/// Test program: subroutine call and return
#[allow(dead_code)]
pub fn test_program_call() -> Vec<u32> {
    vec![
        0x0C000004, // 0x00: JAL   0x10
        NOP,        // 0x04: delay slot
        SYSCALL,    // 0x08: return lands here
        NOP,        // 0x0C
        0x24040042, // 0x10: ADDIU $4, $0, 0x42
        0x03E00008, // 0x14: JR    $31
        NOP,        // 0x18: delay slot
    ]
}

/// Test program: REGIMM branch on a negative register
#[allow(dead_code)]
pub fn test_program_regimm() -> Vec<u32> {
    vec![
        0x2401FFFF, // 0x00: ADDIU $1, $0, -1
        0x04200002, // 0x04: BLTZ  $1, +2       ; -> 0x10
        NOP,        // 0x08: delay slot
        0x24050001, // 0x0C: ADDIU $5, $0, 1    ; skipped
        0x04210001, // 0x10: BGEZ  $1, +1       ; not taken
        NOP,        // 0x14
        SYSCALL,    // 0x18
    ]
}
