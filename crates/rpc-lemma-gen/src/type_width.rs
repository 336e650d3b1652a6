// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Bit-width and signedness of interface types.

use crate::arch::Architecture;
use crate::assertion::VALIDITY_PREFIX;
use crate::error::{GenError, Result};

/// C type spellings (and interface aliases) that denote signed integers.
const SIGNED_TYPES: &[&str] = &[
    "int",
    "signed",
    "signed int",
    "short",
    "signed short",
    "long",
    "signed long",
    "long long",
    "signed long long",
    "signed char",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "intptr_t",
    "ssize_t",
    "integer",
];

/// Machine representation of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordWidth {
    pub bits: u32,
    pub signed: bool,
}

impl WordWidth {
    /// Isabelle word type, e.g. `32 word` or `8 signed word`.
    pub fn word_type(&self) -> String {
        if self.signed {
            format!("{} signed word", self.bits)
        } else {
            format!("{} word", self.bits)
        }
    }

    /// Suffix of the lifted heap for this width, e.g. `w32` or `sw16`.
    pub fn heap_tag(&self) -> String {
        if self.signed {
            format!("sw{}", self.bits)
        } else {
            format!("w{}", self.bits)
        }
    }

    /// Name of the heap validity predicate, e.g. `is_valid_w32`.
    pub fn valid_fn(&self) -> String {
        format!("{VALIDITY_PREFIX}{}", self.heap_tag())
    }
}

pub fn is_signed(type_tag: &str) -> bool {
    SIGNED_TYPES.contains(&type_tag)
}

/// Resolves the width of `type_tag` on `arch`.
pub fn resolve(arch: Architecture, type_tag: &str) -> Result<WordWidth> {
    let bytes = arch.size_of(type_tag)?;
    let bits = match bytes {
        1 | 2 | 4 | 8 => (bytes * 8) as u32,
        _ => {
            return Err(GenError::Size {
                type_tag: type_tag.to_string(),
                arch,
                bytes,
            })
        }
    };
    Ok(WordWidth {
        bits,
        signed: is_signed(type_tag),
    })
}
