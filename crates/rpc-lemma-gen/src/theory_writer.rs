// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Simple line-based writer for generating Isabelle theory text with proper
//! indentation.

/// Writer context for generating theory text.
/// Tracks indentation and handles line-based output.
#[derive(Debug)]
pub struct TheoryWriter {
    out: String,
    indent: usize,
    at_line_start: bool,
}

const INDENT: &str = "  ";

impl TheoryWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    /// Write a string, handling indentation at line starts. Empty lines get
    /// no indentation.
    pub fn write(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.out.push('\n');
                self.at_line_start = true;
            } else {
                if self.at_line_start {
                    for _ in 0..self.indent {
                        self.out.push_str(INDENT);
                    }
                }
                self.at_line_start = false;
                self.out.push(c);
            }
        }
    }

    /// Write a complete line (adds newline at end).
    pub fn line(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write an empty line (just a newline).
    pub fn newline(&mut self) {
        self.write("\n");
    }

    /// Increase indentation for subsequent lines.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation for subsequent lines.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Width in characters of the current indentation.
    pub fn indent_width(&self) -> usize {
        self.indent * INDENT.len()
    }

    pub fn into_inner(self) -> String {
        self.out
    }
}

impl Default for TheoryWriter {
    fn default() -> Self {
        Self::new()
    }
}
