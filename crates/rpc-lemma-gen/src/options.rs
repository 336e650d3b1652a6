// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::arch::Architecture;
use crate::fold::RenderMode;
use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents options provided to the tool. Most of those options are configured via a toml
/// source; some over the command line flags.
///
/// NOTE: any fields carrying structured data must appear at the end for making
/// toml printing work. When changing this config, use `rpc-lemma-gen --print-config` to
/// verify this works.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// The path of the generated theory. Its file stem names the theory.
    pub output_path: String,
    /// Verbosity level for logging.
    pub verbosity_level: LevelFilter,
    /// The architecture the glue code is compiled for.
    pub architecture: Architecture,

    /// BEGIN OF STRUCTURED OPTIONS. DO NOT ADD VALUE FIELDS AFTER THIS
    /// Options for rendering lemma text.
    pub render: RenderOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_path: "RPCGlue.thy".to_string(),
            verbosity_level: LevelFilter::Info,
            architecture: Architecture::default(),
            render: RenderOptions::default(),
        }
    }
}

impl Options {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&source)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Run-wide constants used while rendering lemmas.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// How repeated assertions are folded and laid out.
    pub mode: RenderMode,
    /// Number of words in an IPC message; bounds the array elements asserted valid.
    pub msg_max_length: usize,
    /// Alignment mask of the thread-local storage region.
    pub tls_region_mask: u64,
    /// Column after which condensed groups are wrapped.
    pub wrap_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            msg_max_length: 120,
            tls_region_mask: 0xfff,
            wrap_width: 100,
        }
    }
}
