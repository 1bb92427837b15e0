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

//! Processor configuration
//!
//! Settings that shape a processor and its memory without touching the
//! dispatch tables. Loaded from TOML; every key is optional.
//!
//! ```toml
//! byte_order = "little"
//! reset_vector = 0x100
//! memory_size = 65536
//! load_address = 0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ProcessorError, Result};
use crate::core::memory::{ByteOrder, Ram};

/// Default RAM size (1MB)
pub const DEFAULT_MEMORY_SIZE: usize = 1024 * 1024;

/// Processor and memory settings
///
/// # Example
/// ```
/// use mipscore::core::config::ProcessorConfig;
/// use mipscore::core::memory::ByteOrder;
///
/// let config = ProcessorConfig::from_toml_str(r#"byte_order = "little""#).unwrap();
/// assert_eq!(config.byte_order, ByteOrder::Little);
/// assert_eq!(config.reset_vector, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Byte order for instruction fetch
    pub byte_order: ByteOrder,
    /// Initial program counter
    pub reset_vector: u32,
    /// Size in bytes of the RAM created by [`ProcessorConfig::create_ram`]
    pub memory_size: usize,
    /// Address at which program images are loaded
    pub load_address: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Big,
            reset_vector: 0,
            memory_size: DEFAULT_MEMORY_SIZE,
            load_address: 0,
        }
    }
}

impl ProcessorConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// `ProcessorError::Toml` for malformed documents or unknown keys,
    /// `ProcessorError::Config` for values that fail validation.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ProcessorError::Config(e.to_string()))
    }

    /// Check value constraints
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::Config` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.memory_size == 0 || !self.memory_size.is_multiple_of(4) {
            return Err(ProcessorError::Config(format!(
                "memory_size must be a non-zero multiple of 4, got {}",
                self.memory_size
            )));
        }
        if !self.reset_vector.is_multiple_of(4) {
            return Err(ProcessorError::Config(format!(
                "reset_vector 0x{:08X} is not word-aligned",
                self.reset_vector
            )));
        }
        if !self.load_address.is_multiple_of(4) {
            return Err(ProcessorError::Config(format!(
                "load_address 0x{:08X} is not word-aligned",
                self.load_address
            )));
        }
        Ok(())
    }

    /// Zeroed RAM of `memory_size` bytes
    pub fn create_ram(&self) -> Ram {
        Ram::new(self.memory_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.reset_vector, 0);
        assert_eq!(config.memory_size, DEFAULT_MEMORY_SIZE);
        assert_eq!(config.load_address, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ProcessorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn test_parse_all_keys() {
        let config = ProcessorConfig::from_toml_str(
            r#"
            byte_order = "little"
            reset_vector = 0x100
            memory_size = 65536
            load_address = 0x80
            "#,
        )
        .unwrap();

        assert_eq!(config.byte_order, ByteOrder::Little);
        assert_eq!(config.reset_vector, 0x100);
        assert_eq!(config.memory_size, 65536);
        assert_eq!(config.load_address, 0x80);
        assert_eq!(config.create_ram().len(), 65536);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ProcessorConfig::from_toml_str("clock_speed = 33").unwrap_err();
        assert!(matches!(err, ProcessorError::Toml(_)));
    }

    #[test]
    fn test_bad_byte_order_rejected() {
        let err = ProcessorConfig::from_toml_str(r#"byte_order = "middle""#).unwrap_err();
        assert!(matches!(err, ProcessorError::Toml(_)));
    }

    #[test]
    fn test_validation() {
        for source in [
            "memory_size = 0",
            "memory_size = 1022",
            "reset_vector = 2",
            "load_address = 0x81",
        ] {
            let err = ProcessorConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, ProcessorError::Config(_)), "{}", source);
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ProcessorConfig {
            byte_order: ByteOrder::Little,
            reset_vector: 0x40,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains(r#"byte_order = "little""#));
        assert_eq!(ProcessorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "reset_vector = 0x200").unwrap();
        writeln!(file, "memory_size = 4096").unwrap();

        let config = ProcessorConfig::load(file.path()).unwrap();
        assert_eq!(config.reset_vector, 0x200);
        assert_eq!(config.memory_size, 4096);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessorConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ProcessorError::Io(_)));
    }
}
