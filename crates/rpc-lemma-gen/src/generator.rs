// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::emitter::LemmaEmitter;
use crate::error::{GenError, Result};
use crate::ir::Interface;
use crate::options::Options;
use anyhow::Context;
use log::{debug, info};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Permission bits of the written theory.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Name of the theory written to `path`. Isabelle requires the theory name
/// to match the file stem.
pub fn theory_name(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let valid = Regex::new("^[A-Za-z][A-Za-z0-9_']*$")?;
    if valid.is_match(stem) {
        Ok(stem.to_string())
    } else {
        Err(GenError::InvalidTheoryName(path.display().to_string()))
    }
}

/// Renders the theory for `interface`. Either the whole document is
/// returned or the first error encountered.
pub fn generate_theory(
    interface: &Interface,
    theory_name: &str,
    options: &Options,
) -> Result<String> {
    interface.validate(options.architecture)?;
    LemmaEmitter::new(interface, options.architecture, &options.render)?
        .render_document(theory_name)
}

/// Generates the theory and writes it to `options.output_path`. The file is
/// only replaced once the document rendered completely.
pub fn run_generation(options: &Options, interface: &Interface) -> anyhow::Result<PathBuf> {
    let output_path = PathBuf::from(&options.output_path);
    let name = theory_name(&output_path)?;
    info!(
        "generating theory `{}` for interface `{}` ({}, {} mode)",
        name, interface.name, options.architecture, options.render.mode
    );

    let now = Instant::now();
    let document = generate_theory(interface, &name, options)?;
    debug!(
        "rendered {} methods in {:.3}s",
        interface.methods.len(),
        now.elapsed().as_secs_f64()
    );

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    debug!("writing theory to `{}`", output_path.display());
    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(document.as_bytes())?;
    // Temporary files are private to the owner; the theory is not.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))?;
    }
    file.persist(&output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    info!("wrote {}", output_path.display());
    Ok(output_path)
}
