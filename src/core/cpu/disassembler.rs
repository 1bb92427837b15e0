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

//! MIPS instruction disassembler for debugging
//!
//! Converts binary instruction encodings to human-readable assembly mnemonics.

use crate::core::instruction::{IInstruction, Instruction, InstructionView, RInstruction, RsRt};
use crate::core::opcodes::{branch_condition, function, opcode};

/// Instruction disassembler
///
/// Converts 32-bit MIPS instruction encodings to human-readable assembly format.
///
/// # Example
/// ```
/// use mipscore::core::cpu::Disassembler;
/// use mipscore::core::instruction::Instruction;
///
/// let disasm = Disassembler::disassemble(Instruction::new(0x00000000), 0xBFC00000);
/// assert_eq!(disasm, "nop");
/// ```
pub struct Disassembler;

impl Disassembler {
    /// Disassemble a single instruction to human-readable format
    ///
    /// # Arguments
    ///
    /// * `instruction` - The instruction to disassemble
    /// * `pc` - Address of the instruction (used for jump target calculation)
    ///
    /// # Example
    /// ```
    /// use mipscore::core::cpu::Disassembler;
    /// use mipscore::core::instruction::Instruction;
    ///
    /// let disasm = Disassembler::disassemble(Instruction::new(0x3C011234), 0);
    /// assert_eq!(disasm, "lui r1, 0x1234");
    /// ```
    pub fn disassemble(instruction: Instruction, pc: u32) -> String {
        let i = instruction.as_i_type();

        match instruction.opcode() {
            opcode::SPECIAL => Self::disasm_special(instruction.as_r_type()),
            opcode::REGIMM => Self::disasm_regimm(i),
            opcode::J | opcode::JAL => {
                let mnemonic = if instruction.opcode() == opcode::J {
                    "j"
                } else {
                    "jal"
                };
                let target = instruction.as_j_type().address() << 2;
                // Jump targets stay within the 256MB region of the delay slot
                let addr = (pc.wrapping_add(4) & 0xF000_0000) | target;
                format!("{} 0x{:08X}", mnemonic, addr)
            }
            opcode::BEQ => Self::branch2("beq", i),
            opcode::BNE => Self::branch2("bne", i),
            opcode::BEQL => Self::branch2("beql", i),
            opcode::BNEL => Self::branch2("bnel", i),
            opcode::BLEZ => Self::branch1("blez", i),
            opcode::BGTZ => Self::branch1("bgtz", i),
            opcode::BLEZL => Self::branch1("blezl", i),
            opcode::BGTZL => Self::branch1("bgtzl", i),
            opcode::ADDI => Self::signed_imm("addi", i),
            opcode::ADDIU => Self::signed_imm("addiu", i),
            opcode::SLTI => Self::signed_imm("slti", i),
            opcode::SLTIU => Self::signed_imm("sltiu", i),
            opcode::DADDI => Self::signed_imm("daddi", i),
            opcode::DADDIU => Self::signed_imm("daddiu", i),
            opcode::ANDI => Self::unsigned_imm("andi", i),
            opcode::ORI => Self::unsigned_imm("ori", i),
            opcode::XORI => Self::unsigned_imm("xori", i),
            opcode::LUI => format!("lui r{}, 0x{:04X}", i.rt(), i.immediate()),
            opcode::COP0 => Self::disasm_cop0(instruction.as_r_type()),
            opcode::COP1 | opcode::COP2 | opcode::COP3 => {
                let unit = instruction.opcode() & 0x3;
                format!("cop{} 0x{:07X}", unit, instruction.raw() & 0x01FF_FFFF)
            }
            opcode::LB => Self::memory("lb", i),
            opcode::LH => Self::memory("lh", i),
            opcode::LWL => Self::memory("lwl", i),
            opcode::LW => Self::memory("lw", i),
            opcode::LBU => Self::memory("lbu", i),
            opcode::LHU => Self::memory("lhu", i),
            opcode::LWR => Self::memory("lwr", i),
            opcode::LWU => Self::memory("lwu", i),
            opcode::LDL => Self::memory("ldl", i),
            opcode::LDR => Self::memory("ldr", i),
            opcode::LL => Self::memory("ll", i),
            opcode::LLD => Self::memory("lld", i),
            opcode::LD => Self::memory("ld", i),
            opcode::SB => Self::memory("sb", i),
            opcode::SH => Self::memory("sh", i),
            opcode::SWL => Self::memory("swl", i),
            opcode::SW => Self::memory("sw", i),
            opcode::SDL => Self::memory("sdl", i),
            opcode::SDR => Self::memory("sdr", i),
            opcode::SWR => Self::memory("swr", i),
            opcode::SC => Self::memory("sc", i),
            opcode::SCD => Self::memory("scd", i),
            opcode::SD => Self::memory("sd", i),
            opcode::CACHE => {
                format!("cache 0x{:02X}, {}(r{})", i.rt(), i.signed_immediate(), i.rs())
            }
            opcode::LWC1 | opcode::LWC2 | opcode::PREF => {
                Self::cop_memory("lwc", instruction.opcode() - opcode::LWC1 + 1, i)
            }
            opcode::SWC1 | opcode::SWC2 | opcode::SWC3 => {
                Self::cop_memory("swc", instruction.opcode() - opcode::SWC1 + 1, i)
            }
            opcode::LDC1 | opcode::LDC2 => {
                Self::cop_memory("ldc", instruction.opcode() - opcode::LDC1 + 1, i)
            }
            opcode::SDC1 | opcode::SDC2 => {
                Self::cop_memory("sdc", instruction.opcode() - opcode::SDC1 + 1, i)
            }
            _ => Self::unknown(instruction),
        }
    }

    /// Disassemble SPECIAL (opcode 0x00) instruction
    fn disasm_special(r: RInstruction) -> String {
        let (rs, rt, rd, shamt) = (r.rs(), r.rt(), r.rd(), r.shamt());

        match r.funct() {
            function::SLL if r.raw() == 0 => "nop".to_string(),
            function::SLL => format!("sll r{}, r{}, {}", rd, rt, shamt),
            function::SRL => format!("srl r{}, r{}, {}", rd, rt, shamt),
            function::SRA => format!("sra r{}, r{}, {}", rd, rt, shamt),
            function::DSLL => format!("dsll r{}, r{}, {}", rd, rt, shamt),
            function::DSRL => format!("dsrl r{}, r{}, {}", rd, rt, shamt),
            function::DSRA => format!("dsra r{}, r{}, {}", rd, rt, shamt),
            function::DSLL32 => format!("dsll32 r{}, r{}, {}", rd, rt, shamt),
            function::DSRL32 => format!("dsrl32 r{}, r{}, {}", rd, rt, shamt),
            function::DSRA32 => format!("dsra32 r{}, r{}, {}", rd, rt, shamt),
            function::SLLV => format!("sllv r{}, r{}, r{}", rd, rt, rs),
            function::SRLV => format!("srlv r{}, r{}, r{}", rd, rt, rs),
            function::SRAV => format!("srav r{}, r{}, r{}", rd, rt, rs),
            function::DSLLV => format!("dsllv r{}, r{}, r{}", rd, rt, rs),
            function::DSRLV => format!("dsrlv r{}, r{}, r{}", rd, rt, rs),
            function::DSRAV => format!("dsrav r{}, r{}, r{}", rd, rt, rs),
            function::JR => format!("jr r{}", rs),
            function::JALR => {
                if rd == 31 {
                    format!("jalr r{}", rs)
                } else {
                    format!("jalr r{}, r{}", rd, rs)
                }
            }
            function::MOVZ => format!("movz r{}, r{}, r{}", rd, rs, rt),
            function::MOVN => format!("movn r{}, r{}, r{}", rd, rs, rt),
            function::SYSCALL => "syscall".to_string(),
            function::BREAK => "break".to_string(),
            function::SYNC => "sync".to_string(),
            function::MFHI => format!("mfhi r{}", rd),
            function::MTHI => format!("mthi r{}", rs),
            function::MFLO => format!("mflo r{}", rd),
            function::MTLO => format!("mtlo r{}", rs),
            function::MULT => format!("mult r{}, r{}", rs, rt),
            function::MULTU => format!("multu r{}, r{}", rs, rt),
            function::DIV => format!("div r{}, r{}", rs, rt),
            function::DIVU => format!("divu r{}, r{}", rs, rt),
            function::DMULT => format!("dmult r{}, r{}", rs, rt),
            function::DMULTU => format!("dmultu r{}, r{}", rs, rt),
            function::DDIV => format!("ddiv r{}, r{}", rs, rt),
            function::DDIVU => format!("ddivu r{}, r{}", rs, rt),
            function::TGE => format!("tge r{}, r{}", rs, rt),
            function::TGEU => format!("tgeu r{}, r{}", rs, rt),
            function::TLT => format!("tlt r{}, r{}", rs, rt),
            function::TLTU => format!("tltu r{}, r{}", rs, rt),
            function::TEQ => format!("teq r{}, r{}", rs, rt),
            function::TNE => format!("tne r{}, r{}", rs, rt),
            funct => match Self::alu_mnemonic(funct) {
                Some(mnemonic) => format!("{} r{}, r{}, r{}", mnemonic, rd, rs, rt),
                None => Self::unknown(r.into()),
            },
        }
    }

    fn alu_mnemonic(funct: u8) -> Option<&'static str> {
        let mnemonic = match funct {
            function::ADD => "add",
            function::ADDU => "addu",
            function::SUB => "sub",
            function::SUBU => "subu",
            function::AND => "and",
            function::OR => "or",
            function::XOR => "xor",
            function::NOR => "nor",
            function::SLT => "slt",
            function::SLTU => "sltu",
            function::DADD => "dadd",
            function::DADDU => "daddu",
            function::DSUB => "dsub",
            function::DSUBU => "dsubu",
            _ => return None,
        };
        Some(mnemonic)
    }

    /// Disassemble REGIMM (opcode 0x01) instruction
    fn disasm_regimm(i: IInstruction) -> String {
        let mnemonic = match i.rt() {
            branch_condition::BLTZ => "bltz",
            branch_condition::BGEZ => "bgez",
            branch_condition::BLTZL => "bltzl",
            branch_condition::BGEZL => "bgezl",
            branch_condition::BLTZAL => "bltzal",
            branch_condition::BGEZAL => "bgezal",
            branch_condition::BLTZALL => "bltzall",
            branch_condition::BGEZALL => "bgezall",
            branch_condition::TGEI => "tgei",
            branch_condition::TGEIU => "tgeiu",
            branch_condition::TLTI => "tlti",
            branch_condition::TLTIU => "tltiu",
            branch_condition::TEQI => "teqi",
            branch_condition::TNEI => "tnei",
            _ => return Self::unknown(i.into()),
        };
        format!("{} r{}, {}", mnemonic, i.rs(), i.signed_immediate())
    }

    /// Disassemble COP0 (coprocessor 0) instruction
    fn disasm_cop0(r: RInstruction) -> String {
        let sel = r.raw() & 0x7;
        match r.rs() {
            0x00 if sel == 0 => format!("mfc0 r{}, cop0r{}", r.rt(), r.rd()),
            0x00 => format!("mfc0 r{}, cop0r{}, {}", r.rt(), r.rd(), sel),
            0x04 if sel == 0 => format!("mtc0 r{}, cop0r{}", r.rt(), r.rd()),
            0x04 => format!("mtc0 r{}, cop0r{}, {}", r.rt(), r.rd(), sel),
            0x10 => match r.funct() {
                0x01 => "tlbr".to_string(),
                0x02 => "tlbwi".to_string(),
                0x06 => "tlbwr".to_string(),
                0x08 => "tlbp".to_string(),
                0x10 => "rfe".to_string(),
                0x18 => "eret".to_string(),
                _ => Self::unknown(r.into()),
            },
            _ => Self::unknown(r.into()),
        }
    }

    fn branch2(mnemonic: &str, i: IInstruction) -> String {
        format!("{} r{}, r{}, {}", mnemonic, i.rs(), i.rt(), i.signed_immediate())
    }

    fn branch1(mnemonic: &str, i: IInstruction) -> String {
        format!("{} r{}, {}", mnemonic, i.rs(), i.signed_immediate())
    }

    fn signed_imm(mnemonic: &str, i: IInstruction) -> String {
        format!("{} r{}, r{}, {}", mnemonic, i.rt(), i.rs(), i.signed_immediate())
    }

    fn unsigned_imm(mnemonic: &str, i: IInstruction) -> String {
        format!("{} r{}, r{}, 0x{:04X}", mnemonic, i.rt(), i.rs(), i.immediate())
    }

    fn memory(mnemonic: &str, i: IInstruction) -> String {
        format!("{} r{}, {}(r{})", mnemonic, i.rt(), i.signed_immediate(), i.rs())
    }

    fn cop_memory(mnemonic: &str, unit: u8, i: IInstruction) -> String {
        format!(
            "{}{} ${}, {}(r{})",
            mnemonic,
            unit,
            i.rt(),
            i.signed_immediate(),
            i.rs()
        )
    }

    fn unknown(instruction: Instruction) -> String {
        format!("??? 0x{:08X}", instruction.raw())
    }
}
