// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::arch::Architecture;
use thiserror::Error;

/// Errors raised while generating a theory. All of them are fatal: the
/// document is never written when one occurs.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("unknown type `{type_tag}`")]
    UnknownType { type_tag: String },

    #[error("type `{type_tag}` is {bytes} bytes on {arch}; only 1, 2, 4 and 8 byte values are supported")]
    Size {
        type_tag: String,
        arch: Architecture,
        bytes: u64,
    },

    #[error("interface `{interface}` has {origins} origins; RPC lemmas need exactly one")]
    Shape { interface: String, origins: usize },

    #[error("symbol `{symbol}` is generated for both {first} and {second}")]
    SymbolCollision {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("{context} `{name}` is not a valid identifier")]
    InvalidIdentifier { name: String, context: String },

    #[error("{context} `{name}` collides with a C reserved word")]
    ReservedIdentifier { name: String, context: String },

    #[error("parameter `{name}` of `{method}` clashes with a name bound in the generated lemmas")]
    CapturedName { name: String, method: String },

    #[error("{context} `{name}` is declared more than once")]
    DuplicateName { name: String, context: String },

    #[error("`{0}` cannot be used as a theory name")]
    InvalidTheoryName(String),

    #[error("failed to render template: {0}")]
    Template(#[from] tera::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
