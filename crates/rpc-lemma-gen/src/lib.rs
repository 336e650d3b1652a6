// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Generates Isabelle memory-safety lemmas for the glue code of RPC
//! connections, along with the C reserved-word list interface identifiers
//! are checked against.

pub mod arch;
pub mod assertion;
pub mod emitter;
pub mod error;
pub mod fold;
pub mod generator;
pub mod ir;
pub mod keyword_table;
pub mod keywords;
pub mod layout;
pub mod naming;
pub mod options;
pub mod prelude;
pub mod theory_writer;
pub mod threads;
pub mod type_width;

pub use arch::Architecture;
pub use error::GenError;
pub use fold::RenderMode;
pub use generator::{generate_theory, run_generation, theory_name};
pub use ir::Interface;
pub use options::{Options, RenderOptions};
