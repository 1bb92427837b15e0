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

//! Opcode and function code tables
//!
//! Encodings for the MIPS I-IV instruction sets. These values are fixed by
//! the architecture and must match real object code bit-for-bit.
//!
//! - [`opcode`]: primary opcode, bits [31:26]
//! - [`function`]: R-type function code, bits [5:0], used when the opcode is
//!   [`opcode::SPECIAL`]
//! - [`branch_condition`]: rt field, bits [20:16], used when the opcode is
//!   [`opcode::REGIMM`]

/// Primary opcodes (bits [31:26])
pub mod opcode {
    /// R-type instructions, selected further by the function field
    pub const SPECIAL: u8 = 0x00;
    /// Branch on condition, selected further by the rt field
    pub const REGIMM: u8 = 0x01;
    /// Jump
    pub const J: u8 = 0x02;
    /// Jump and link
    pub const JAL: u8 = 0x03;
    /// Branch on equal
    pub const BEQ: u8 = 0x04;
    /// Branch on not equal
    pub const BNE: u8 = 0x05;
    /// Branch on less than or equal to zero
    pub const BLEZ: u8 = 0x06;
    /// Branch on greater than zero
    pub const BGTZ: u8 = 0x07;
    /// Add immediate
    pub const ADDI: u8 = 0x08;
    /// Add immediate unsigned
    pub const ADDIU: u8 = 0x09;
    /// Set on less than immediate
    pub const SLTI: u8 = 0x0A;
    /// Set on less than immediate unsigned
    pub const SLTIU: u8 = 0x0B;
    /// And immediate
    pub const ANDI: u8 = 0x0C;
    /// Or immediate
    pub const ORI: u8 = 0x0D;
    /// Exclusive or immediate
    pub const XORI: u8 = 0x0E;
    /// Load upper immediate
    pub const LUI: u8 = 0x0F;
    /// Coprocessor 0 (system control)
    pub const COP0: u8 = 0x10;
    /// Coprocessor 1 (floating point)
    pub const COP1: u8 = 0x11;
    /// Coprocessor 2
    pub const COP2: u8 = 0x12;
    /// Coprocessor 3
    pub const COP3: u8 = 0x13;
    /// Branch on equal likely
    pub const BEQL: u8 = 0x14;
    /// Branch on not equal likely
    pub const BNEL: u8 = 0x15;
    /// Branch on less than or equal to zero likely
    pub const BLEZL: u8 = 0x16;
    /// Branch on greater than zero likely
    pub const BGTZL: u8 = 0x17;
    /// Doubleword add immediate
    pub const DADDI: u8 = 0x18;
    /// Doubleword add immediate unsigned
    pub const DADDIU: u8 = 0x19;
    /// Load doubleword left
    pub const LDL: u8 = 0x1A;
    /// Load doubleword right
    pub const LDR: u8 = 0x1B;
    /// Load byte
    pub const LB: u8 = 0x20;
    /// Load halfword
    pub const LH: u8 = 0x21;
    /// Load word left
    pub const LWL: u8 = 0x22;
    /// Load word
    pub const LW: u8 = 0x23;
    /// Load byte unsigned
    pub const LBU: u8 = 0x24;
    /// Load halfword unsigned
    pub const LHU: u8 = 0x25;
    /// Load word right
    pub const LWR: u8 = 0x26;
    /// Load word unsigned
    pub const LWU: u8 = 0x27;
    /// Store byte
    pub const SB: u8 = 0x28;
    /// Store halfword
    pub const SH: u8 = 0x29;
    /// Store word left
    pub const SWL: u8 = 0x2A;
    /// Store word
    pub const SW: u8 = 0x2B;
    /// Store doubleword left
    pub const SDL: u8 = 0x2C;
    /// Store doubleword right
    pub const SDR: u8 = 0x2D;
    /// Store word right
    pub const SWR: u8 = 0x2E;
    /// Cache operation
    pub const CACHE: u8 = 0x2F;
    /// Load linked
    pub const LL: u8 = 0x30;
    /// Load word to coprocessor 1
    pub const LWC1: u8 = 0x31;
    /// Load word to coprocessor 2
    pub const LWC2: u8 = 0x32;
    /// Load word to coprocessor 3
    pub const LWC3: u8 = 0x33;
    /// Prefetch (MIPS IV reuse of LWC3)
    pub const PREF: u8 = LWC3;
    /// Load linked doubleword
    pub const LLD: u8 = 0x34;
    /// Load doubleword to coprocessor 1
    pub const LDC1: u8 = 0x35;
    /// Load doubleword to coprocessor 2
    pub const LDC2: u8 = 0x36;
    /// Load doubleword to coprocessor 3
    pub const LDC3: u8 = 0x37;
    /// Load doubleword (MIPS III reuse of LDC3)
    pub const LD: u8 = LDC3;
    /// Store conditional
    pub const SC: u8 = 0x38;
    /// Store word from coprocessor 1
    pub const SWC1: u8 = 0x39;
    /// Store word from coprocessor 2
    pub const SWC2: u8 = 0x3A;
    /// Store word from coprocessor 3
    pub const SWC3: u8 = 0x3B;
    /// Store conditional doubleword
    pub const SCD: u8 = 0x3C;
    /// Store doubleword from coprocessor 1
    pub const SDC1: u8 = 0x3D;
    /// Store doubleword from coprocessor 2
    pub const SDC2: u8 = 0x3E;
    /// Store doubleword from coprocessor 3
    pub const SDC3: u8 = 0x3F;
    /// Store doubleword (MIPS III reuse of SDC3)
    pub const SD: u8 = SDC3;
}

/// R-type function codes (bits [5:0] when opcode is SPECIAL)
pub mod function {
    /// Shift left logical
    pub const SLL: u8 = 0x00;
    /// Shift right logical
    pub const SRL: u8 = 0x02;
    /// Shift right arithmetic
    pub const SRA: u8 = 0x03;
    /// Shift left logical variable
    pub const SLLV: u8 = 0x04;
    /// Shift right logical variable
    pub const SRLV: u8 = 0x06;
    /// Shift right arithmetic variable
    pub const SRAV: u8 = 0x07;
    /// Jump register
    pub const JR: u8 = 0x08;
    /// Jump and link register
    pub const JALR: u8 = 0x09;
    /// Move conditional on zero
    pub const MOVZ: u8 = 0x0A;
    /// Move conditional on not zero
    pub const MOVN: u8 = 0x0B;
    /// System call
    pub const SYSCALL: u8 = 0x0C;
    /// Breakpoint
    pub const BREAK: u8 = 0x0D;
    /// Synchronize shared memory
    pub const SYNC: u8 = 0x0F;
    /// Move from HI
    pub const MFHI: u8 = 0x10;
    /// Move to HI
    pub const MTHI: u8 = 0x11;
    /// Move from LO
    pub const MFLO: u8 = 0x12;
    /// Move to LO
    pub const MTLO: u8 = 0x13;
    /// Doubleword shift left logical variable
    pub const DSLLV: u8 = 0x14;
    /// Doubleword shift right logical variable
    pub const DSRLV: u8 = 0x16;
    /// Doubleword shift right arithmetic variable
    pub const DSRAV: u8 = 0x17;
    /// Multiply
    pub const MULT: u8 = 0x18;
    /// Multiply unsigned
    pub const MULTU: u8 = 0x19;
    /// Divide
    pub const DIV: u8 = 0x1A;
    /// Divide unsigned
    pub const DIVU: u8 = 0x1B;
    /// Doubleword multiply
    pub const DMULT: u8 = 0x1C;
    /// Doubleword multiply unsigned
    pub const DMULTU: u8 = 0x1D;
    /// Doubleword divide
    pub const DDIV: u8 = 0x1E;
    /// Doubleword divide unsigned
    pub const DDIVU: u8 = 0x1F;
    /// Add
    pub const ADD: u8 = 0x20;
    /// Add unsigned
    pub const ADDU: u8 = 0x21;
    /// Subtract
    pub const SUB: u8 = 0x22;
    /// Subtract unsigned
    pub const SUBU: u8 = 0x23;
    /// And
    pub const AND: u8 = 0x24;
    /// Or
    pub const OR: u8 = 0x25;
    /// Exclusive or
    pub const XOR: u8 = 0x26;
    /// Nor
    pub const NOR: u8 = 0x27;
    /// Set on less than
    pub const SLT: u8 = 0x2A;
    /// Set on less than unsigned
    pub const SLTU: u8 = 0x2B;
    /// Doubleword add
    pub const DADD: u8 = 0x2C;
    /// Doubleword add unsigned
    pub const DADDU: u8 = 0x2D;
    /// Doubleword subtract
    pub const DSUB: u8 = 0x2E;
    /// Doubleword subtract unsigned
    pub const DSUBU: u8 = 0x2F;
    /// Trap if greater or equal
    pub const TGE: u8 = 0x30;
    /// Trap if greater or equal unsigned
    pub const TGEU: u8 = 0x31;
    /// Trap if less than
    pub const TLT: u8 = 0x32;
    /// Trap if less than unsigned
    pub const TLTU: u8 = 0x33;
    /// Trap if equal
    pub const TEQ: u8 = 0x34;
    /// Trap if not equal
    pub const TNE: u8 = 0x36;
    /// Doubleword shift left logical
    pub const DSLL: u8 = 0x38;
    /// Doubleword shift right logical
    pub const DSRL: u8 = 0x3A;
    /// Doubleword shift right arithmetic
    pub const DSRA: u8 = 0x3B;
    /// Doubleword shift left logical plus 32
    pub const DSLL32: u8 = 0x3C;
    /// Doubleword shift right logical plus 32
    pub const DSRL32: u8 = 0x3E;
    /// Doubleword shift right arithmetic plus 32
    pub const DSRA32: u8 = 0x3F;
}

/// Branch-condition codes (rt field when opcode is REGIMM)
pub mod branch_condition {
    /// Branch on less than zero
    pub const BLTZ: u8 = 0x00;
    /// Branch on greater than or equal to zero
    pub const BGEZ: u8 = 0x01;
    /// Branch on less than zero likely
    pub const BLTZL: u8 = 0x02;
    /// Branch on greater than or equal to zero likely
    pub const BGEZL: u8 = 0x03;
    /// Trap if greater or equal immediate
    pub const TGEI: u8 = 0x08;
    /// Trap if greater or equal immediate unsigned
    pub const TGEIU: u8 = 0x09;
    /// Trap if less than immediate
    pub const TLTI: u8 = 0x0A;
    /// Trap if less than immediate unsigned
    pub const TLTIU: u8 = 0x0B;
    /// Trap if equal immediate
    pub const TEQI: u8 = 0x0C;
    /// Trap if not equal immediate
    pub const TNEI: u8 = 0x0E;
    /// Branch on less than zero and link
    pub const BLTZAL: u8 = 0x10;
    /// Branch on greater than or equal to zero and link
    pub const BGEZAL: u8 = 0x11;
    /// Branch on less than zero and link likely
    pub const BLTZALL: u8 = 0x12;
    /// Branch on greater than or equal to zero and link likely
    pub const BGEZALL: u8 = 0x13;
}
