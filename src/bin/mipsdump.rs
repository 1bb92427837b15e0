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

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{error, info};
use mipscore::core::cpu::Disassembler;
use mipscore::core::error::{ProcessorError, Result};
use mipscore::core::memory::{ByteOrder, Memory, Ram};
use mipscore::core::{Instruction, ProcessorConfig};

/// Byte order accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Endian {
    Big,
    Little,
}

impl From<Endian> for ByteOrder {
    fn from(endian: Endian) -> Self {
        match endian {
            Endian::Big => ByteOrder::Big,
            Endian::Little => ByteOrder::Little,
        }
    }
}

/// MIPS raw image disassembler
#[derive(Parser)]
#[command(name = "mipsdump")]
#[command(about = "Disassemble a raw MIPS code image", long_about = None)]
struct Args {
    /// Path to the raw image file
    image: PathBuf,

    /// Processor configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Byte order of the image (overrides the configuration)
    #[arg(short = 'e', long, value_enum)]
    byte_order: Option<Endian>,

    /// Address of the first word, hex (overrides load_address)
    #[arg(short = 'b', long, value_parser = parse_hex)]
    base: Option<u32>,

    /// Number of words to disassemble (default: whole image)
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

fn parse_hex(value: &str) -> std::result::Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address '{}': {}", value, e))
}

fn main() -> Result<()> {
    // Load .env file if present (RUST_LOG and friends)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ProcessorConfig::load(path).inspect_err(|e| {
            error!("Failed to load configuration {}: {}", path.display(), e);
        })?,
        None => ProcessorConfig::default(),
    };
    let byte_order = args.byte_order.map_or(config.byte_order, ByteOrder::from);
    let base = args.base.unwrap_or(config.load_address);

    let mut image = std::fs::read(&args.image).inspect_err(|e| {
        error!("Failed to read {}: {}", args.image.display(), e);
    })?;
    // Pad a trailing partial word with zeros
    image.resize(image.len().next_multiple_of(4), 0);
    let ram = Ram::from_bytes(image);

    let available = ram.len() / 4;
    let count = args.count.map_or(available, |n| n.min(available));
    info!(
        "mipsdump v{}: {} words from {} ({:?}-endian, base 0x{:08X})",
        env!("CARGO_PKG_VERSION"),
        count,
        args.image.display(),
        byte_order,
        base
    );

    for index in 0..count {
        let offset =
            u32::try_from(index * 4).map_err(|_| ProcessorError::InvalidMemoryAccess {
                address: u32::MAX,
            })?;
        let word = ram.read_word(offset, byte_order)?;
        let address = base.wrapping_add(offset);
        println!(
            "0x{:08X}: {:08X}  {}",
            address,
            word,
            Disassembler::disassemble(Instruction::new(word), address)
        );
    }

    Ok(())
}
