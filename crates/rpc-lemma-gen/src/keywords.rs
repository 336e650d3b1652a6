// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! C reserved words.
//!
//! Identifiers from an interface end up in generated C, so they must not
//! collide with anything the C compiler reserves. The words come from a
//! fixed table (see [`crate::keyword_table`]) in which every entry lists
//! the language modes it is reserved in.

use crate::arch::Architecture;
use crate::keyword_table::{KEYWORD_TABLE, KEYWORD_TABLE_VERSION};
use crate::layout::wrap_list;
use bitflags::bitflags;
use itertools::Itertools;
use regex::Regex;
use std::collections::BTreeSet;

/// Matches the start of an interface identifier.
pub const IDENTIFIER_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*";

bitflags! {
    /// Language modes a reserved word may be enabled by.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeywordFlags: u32 {
        const ALL = 1 << 0;
        const C99 = 1 << 1;
        const C11 = 1 << 2;
        const CXX = 1 << 3;
        const NOCXX = 1 << 4;
        const CXX11 = 1 << 5;
        const GNU = 1 << 6;
        const MS = 1 << 7;
        const NOMS = 1 << 8;
        const OPENCL = 1 << 9;
        const NOOPENCL = 1 << 10;
        const ALTIVEC = 1 << 11;
        const ARC = 1 << 12;
        const BORLAND = 1 << 13;
        const BOOL = 1 << 14;
        const HALF = 1 << 15;
        const WCHAR = 1 << 16;
        const INT128 = 1 << 17;
    }
}

impl KeywordFlags {
    /// GNU C11, which the glue code is compiled as.
    pub fn c_environment() -> Self {
        KeywordFlags::ALL
            | KeywordFlags::C99
            | KeywordFlags::C11
            | KeywordFlags::NOCXX
            | KeywordFlags::GNU
            | KeywordFlags::NOOPENCL
            | KeywordFlags::BOOL
            | KeywordFlags::WCHAR
    }

    /// Adds the modes implied by the target.
    pub fn for_target(self, arch: Architecture) -> Self {
        if arch.is_64bit() {
            self | KeywordFlags::INT128
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub spelling: &'static str,
    pub categories: KeywordFlags,
}

/// Words of `table` reserved under `flags`, in table order and without
/// repetitions.
pub fn enabled_keywords(table: &[Keyword], flags: KeywordFlags) -> Vec<&'static str> {
    table
        .iter()
        .filter(|kw| kw.categories.intersects(flags))
        .map(|kw| kw.spelling)
        .unique()
        .collect()
}

/// The set of words reserved on `arch` under `flags`.
pub fn reserved_words(arch: Architecture, flags: KeywordFlags) -> BTreeSet<&'static str> {
    enabled_keywords(KEYWORD_TABLE, flags.for_target(arch))
        .into_iter()
        .collect()
}

/// Drops words that can never collide with an interface identifier.
pub fn identifier_keywords<'w>(words: &[&'w str], pattern: &Regex) -> Vec<&'w str> {
    words
        .iter()
        .copied()
        .filter(|word| pattern.is_match(word))
        .collect()
}

const MODULE_HEADER: &str = "\
#!/usr/bin/env python
# -*- coding: utf-8 -*-

# Generated by ckeywords. Do not edit manually.
";

/// Python module defining `C_KEYWORDS`, wrapped at `wrap_width` columns.
pub fn render_keyword_module(words: &[&str], wrap_width: usize) -> String {
    let items = words.iter().map(|word| format!("'{word}',"));
    format!(
        "{MODULE_HEADER}# Keyword table {KEYWORD_TABLE_VERSION}.\n\n\
         # C reserved words; interface identifiers must avoid them.\n\
         C_KEYWORDS = frozenset([\n{}\n])\n",
        wrap_list(items, "    ", wrap_width)
    )
}
