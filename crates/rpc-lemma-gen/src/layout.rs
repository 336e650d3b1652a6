// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Column layout of folded conditions and of flat word lists.
//!
//! Every line of a condition after the first is padded to the indent lock
//! so the condition lines up under its binder. Columns are relative to the
//! indentation of the writer the text ends up in.

use itertools::Itertools;

/// Column at which a conjunction written after `binder_prefix` starts.
pub fn indent_lock(binder_prefix: &str) -> usize {
    binder_prefix.chars().count()
}

/// Pads every line after the first to `indent_lock`. When `condensed`,
/// continuation lines of a folded group are first merged onto the line
/// before them as long as the result fits within `wrap_width`. `trailer`
/// columns are kept free after the last line for the closing delimiter.
pub fn layout(
    text: &str,
    indent_lock: usize,
    condensed: bool,
    wrap_width: usize,
    trailer: usize,
) -> String {
    let source: Vec<&str> = text.lines().collect();
    let mut lines: Vec<String> = Vec::new();
    for (i, line) in source.iter().enumerate() {
        if condensed && line.starts_with(' ') {
            if let Some(previous) = lines.last_mut() {
                let rest = line.trim_start();
                let merged = previous.chars().count() + 1 + rest.chars().count();
                let budget = if i + 1 == source.len() {
                    wrap_width.saturating_sub(trailer)
                } else {
                    wrap_width
                };
                if indent_lock + merged <= budget {
                    previous.push(' ');
                    previous.push_str(rest);
                    continue;
                }
            }
        }
        lines.push(line.to_string());
    }

    let pad = " ".repeat(indent_lock);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.clone()
            } else {
                format!("{pad}{line}")
            }
        })
        .join("\n")
}

/// Wraps a flat list of items separated by single spaces. Every line
/// starts with `indent`; no line grows beyond `width` characters.
pub fn wrap_list<I, S>(items: I, indent: &str, width: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    let mut column = 0;
    let mut at_line_start = true;
    for item in items {
        let item = item.as_ref();
        let len = item.chars().count();
        // `column` already includes the separator after the previous item.
        if !at_line_start && column + len + 1 > width {
            out.push('\n');
            at_line_start = true;
        }
        if at_line_start {
            out.push_str(indent);
            column = indent.chars().count();
            at_line_start = false;
        } else {
            out.push(' ');
        }
        out.push_str(item);
        column += len + 1;
    }
    out
}
