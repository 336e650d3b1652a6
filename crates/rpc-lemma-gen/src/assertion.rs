// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Construction of the atomic assertions that make up lemma conditions.

use crate::ir::{Method, Parameter};
use crate::type_width::WordWidth;

/// Names bound or referenced by the conditions of generated lemmas. A
/// parameter spelled like one of these would be captured by it.
pub const LEMMA_NAMES: &[&str] = &[
    "s",
    "r",
    "v",
    "P",
    "Ptr",
    "True",
    "ipc_buffer_valid",
    "thread_index",
    "symbol_table",
];

/// Prefix of the heap validity predicates.
pub const VALIDITY_PREFIX: &str = "is_valid_";

/// Whether `name` would be captured inside a generated lemma.
pub fn is_lemma_name(name: &str) -> bool {
    LEMMA_NAMES.contains(&name) || name.starts_with(VALIDITY_PREFIX)
}

/// One boolean clause of a lemma condition. The conjunction glue is added
/// when fragments are folded together, never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
}

impl Fragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A top-level member of a condition: either a single fragment or a group
/// of repeated fragments that is folded as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Single(Fragment),
    Group(Vec<Fragment>),
}

pub struct AssertionBuilder {
    msg_max_length: usize,
}

impl AssertionBuilder {
    pub fn new(msg_max_length: usize) -> Self {
        Self { msg_max_length }
    }

    pub fn ipc_buffer_valid(&self) -> Fragment {
        Fragment::new("ipc_buffer_valid s")
    }

    pub fn pointer_valid(&self, param: &Parameter, width: WordWidth) -> Fragment {
        Fragment::new(format!("{} s {}", width.valid_fn(), param.name))
    }

    /// Validity of an array's base pointer and of every element address up
    /// to the message length bound.
    pub fn array_valid(&self, param: &Parameter, width: WordWidth) -> (Fragment, Vec<Fragment>) {
        let valid = width.valid_fn();
        let base = Fragment::new(format!("{valid} s {}", param.name));
        let elements = (0..self.msg_max_length)
            .map(|i| Fragment::new(format!("{valid} s ({} +\\<^sub>p {i})", param.name)))
            .collect();
        (base, elements)
    }

    pub fn thread_index_bound(&self, thread_count: usize) -> Fragment {
        Fragment::new(format!("thread_index s \\<in> {{1..{thread_count}}}"))
    }

    pub fn thread_region_valid(&self, symbol: &str, width: WordWidth) -> Fragment {
        Fragment::new(format!(
            "{} s (Ptr (symbol_table ''{symbol}''))",
            width.valid_fn()
        ))
    }

    /// Clauses `param` contributes to the conditions of an RPC lemma for
    /// `method`. Only parameters the callee writes through contribute.
    pub fn build(&self, method: &Method, param: &Parameter, width: WordWidth) -> Vec<Clause> {
        if !param.direction.is_written() {
            return vec![];
        }
        log::debug!(
            "asserting validity of {}.{} ({} {})",
            method.name,
            param.name,
            param.direction,
            width.word_type()
        );
        if param.array {
            let (base, elements) = self.array_valid(param, width);
            vec![Clause::Single(base), Clause::Group(elements)]
        } else {
            vec![Clause::Single(self.pointer_valid(param, width))]
        }
    }
}
