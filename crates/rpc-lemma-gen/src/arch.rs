// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Target architectures and the byte sizes of the scalar types an interface
//! may use.

use crate::error::{GenError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    Aarch32,
    #[value(name = "arm_hyp")]
    ArmHyp,
    Ia32,
    Riscv32,
    Aarch64,
    #[default]
    #[value(name = "x86_64")]
    #[serde(rename = "x86_64")]
    X86_64,
    Riscv64,
}

impl Architecture {
    pub const ALL: [Architecture; 7] = [
        Architecture::Aarch32,
        Architecture::ArmHyp,
        Architecture::Ia32,
        Architecture::Riscv32,
        Architecture::Aarch64,
        Architecture::X86_64,
        Architecture::Riscv64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Architecture::Aarch32 => "aarch32",
            Architecture::ArmHyp => "arm_hyp",
            Architecture::Ia32 => "ia32",
            Architecture::Riscv32 => "riscv32",
            Architecture::Aarch64 => "aarch64",
            Architecture::X86_64 => "x86_64",
            Architecture::Riscv64 => "riscv64",
        }
    }

    /// Size of a machine word (and of a pointer) in bytes.
    pub fn word_bytes(self) -> u64 {
        match self {
            Architecture::Aarch32
            | Architecture::ArmHyp
            | Architecture::Ia32
            | Architecture::Riscv32 => 4,
            Architecture::Aarch64 | Architecture::X86_64 | Architecture::Riscv64 => 8,
        }
    }

    pub fn is_64bit(self) -> bool {
        self.word_bytes() == 8
    }

    /// Byte size of `type_tag` on this architecture.
    pub fn size_of(self, type_tag: &str) -> Result<u64> {
        let bytes = match type_tag {
            "char" | "signed char" | "unsigned char" | "int8_t" | "uint8_t" | "bool"
            | "boolean" | "character" => 1,
            "short" | "signed short" | "unsigned short" | "int16_t" | "uint16_t" => 2,
            "int" | "signed" | "signed int" | "unsigned" | "unsigned int" | "int32_t"
            | "uint32_t" | "integer" | "float" => 4,
            "long" | "signed long" | "unsigned long" | "intptr_t" | "uintptr_t" | "size_t"
            | "ssize_t" | "seL4_Word" | "seL4_CPtr" => self.word_bytes(),
            "long long" | "signed long long" | "unsigned long long" | "int64_t" | "uint64_t"
            | "double" | "real" => 8,
            // x87 extended precision, padded to the ABI alignment.
            "long double" => {
                if self.is_64bit() {
                    16
                } else {
                    12
                }
            }
            _ => {
                return Err(GenError::UnknownType {
                    type_tag: type_tag.to_string(),
                })
            }
        };
        Ok(bytes)
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
