// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Folding of fragments into conjunctions.
//!
//! Output is line structured: every fragment starts a new line. Lines that
//! continue a parenthesised group carry one leading space so they sit
//! inside the parenthesis; the layout stage pads all lines to the indent
//! lock afterwards.

use crate::assertion::{Clause, Fragment};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CONJUNCTION: &str = "\\<and>";

/// How repeated fragments are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Every fragment is emitted as its own top-level clause.
    Immediate,
    /// Groups are folded into one parenthesised conjunction, one fragment
    /// per line.
    Accumulate,
    /// Groups are folded and then packed onto as few lines as the wrap
    /// width allows.
    #[default]
    Condensed,
}

impl RenderMode {
    pub fn folds_groups(self) -> bool {
        !matches!(self, RenderMode::Immediate)
    }

    pub fn is_condensed(self) -> bool {
        matches!(self, RenderMode::Condensed)
    }
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Immediate => write!(f, "immediate"),
            RenderMode::Accumulate => write!(f, "accumulate"),
            RenderMode::Condensed => write!(f, "condensed"),
        }
    }
}

/// Builds a parenthesised conjunction one fragment at a time.
///
/// Each fragment is held back until the next one arrives, so only
/// fragments known not to be last receive the connective.
#[derive(Debug, Default)]
pub struct Accumulator {
    out: String,
    pending: Option<Fragment>,
    emitted: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        if let Some(previous) = self.pending.replace(fragment) {
            self.emit(previous.text(), true);
        }
    }

    fn emit(&mut self, text: &str, connective: bool) {
        if self.emitted == 0 {
            self.out.push('(');
        } else {
            self.out.push_str("\n ");
        }
        self.out.push_str(text);
        if connective {
            self.out.push(' ');
            self.out.push_str(CONJUNCTION);
        }
        self.emitted += 1;
    }

    /// Closes the group. An empty group renders as a vacuous `(True)`.
    pub fn finish(mut self) -> String {
        match self.pending.take() {
            Some(last) => self.emit(last.text(), false),
            None => self.emit("True", false),
        }
        self.out.push(')');
        self.out
    }
}

pub fn fold(fragments: &[Fragment]) -> String {
    let mut acc = Accumulator::new();
    for fragment in fragments {
        acc.push(fragment.clone());
    }
    acc.finish()
}

/// Joins top-level clauses into a conjunction. No clauses render `True`.
pub fn render_conjunction(clauses: &[Clause], mode: RenderMode) -> String {
    let mut items = Vec::new();
    for clause in clauses {
        match clause {
            Clause::Single(fragment) => items.push(fragment.text().to_string()),
            Clause::Group(fragments) if mode.folds_groups() => items.push(fold(fragments)),
            Clause::Group(fragments) => {
                items.extend(fragments.iter().map(|f| f.text().to_string()))
            }
        }
    }
    if items.is_empty() {
        return "True".to_string();
    }
    items.iter().join(&format!(" {CONJUNCTION}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frags(texts: &[&str]) -> Vec<Fragment> {
        texts.iter().map(|t| Fragment::new(*t)).collect()
    }

    #[test]
    fn empty_fold_is_vacuously_true() {
        assert_eq!(fold(&[]), "(True)");
    }

    #[test]
    fn single_fold_has_no_connective() {
        assert_eq!(fold(&frags(&["a"])), "(a)");
    }

    #[test]
    fn connectives_between_fragments_only() {
        let text = fold(&frags(&["a", "b", "c"]));
        assert_eq!(text, "(a \\<and>\n b \\<and>\n c)");
        assert_eq!(text.matches(CONJUNCTION).count(), 2);
        assert!(!text.trim_end_matches(')').ends_with(CONJUNCTION));
    }

    #[test]
    fn accumulator_defers_until_finished() {
        let mut acc = Accumulator::new();
        acc.push(Fragment::new("a"));
        assert!(acc.out.is_empty());
        acc.push(Fragment::new("b"));
        assert_eq!(acc.out, "(a \\<and>");
        assert_eq!(acc.finish(), "(a \\<and>\n b)");
    }

    #[test]
    fn groups_fold_unless_immediate() {
        let clauses = vec![
            Clause::Single(Fragment::new("p")),
            Clause::Group(frags(&["a", "b"])),
        ];
        assert_eq!(
            render_conjunction(&clauses, RenderMode::Accumulate),
            "p \\<and>\n(a \\<and>\n b)"
        );
        assert_eq!(
            render_conjunction(&clauses, RenderMode::Condensed),
            render_conjunction(&clauses, RenderMode::Accumulate)
        );
        assert_eq!(
            render_conjunction(&clauses, RenderMode::Immediate),
            "p \\<and>\na \\<and>\nb"
        );
    }

    #[test]
    fn empty_group_stays_well_formed() {
        let clauses = vec![Clause::Single(Fragment::new("p")), Clause::Group(vec![])];
        assert_eq!(
            render_conjunction(&clauses, RenderMode::Accumulate),
            "p \\<and>\n(True)"
        );
        assert_eq!(render_conjunction(&clauses, RenderMode::Immediate), "p");
        assert_eq!(render_conjunction(&[], RenderMode::Accumulate), "True");
    }
}
