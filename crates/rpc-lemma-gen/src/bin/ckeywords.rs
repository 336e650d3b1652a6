// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::*;
use colored::Colorize;
use log::{debug, LevelFilter};
use regex::Regex;
use rpc_lemma_gen::keyword_table::{KEYWORD_TABLE, KEYWORD_TABLE_VERSION};
use rpc_lemma_gen::keywords::{
    enabled_keywords, identifier_keywords, render_keyword_module, KeywordFlags,
    IDENTIFIER_PATTERN,
};
use rpc_lemma_gen::Architecture;
use simplelog::{Config, WriteLogger};

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Prints the C reserved words as a Python module defining C_KEYWORDS",
    rename_all = "kebab-case",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Architecture whose C environment decides the reserved words
    #[clap(long = "arch", short = 'a', value_enum, default_value_t = Architecture::X86_64)]
    pub arch: Architecture,

    /// Column to wrap the word list at
    #[clap(long = "wrap", short = 'w', default_value_t = 80)]
    pub wrap: usize,

    /// Write the module here instead of stdout
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Log debug output
    #[clap(long = "verbose", short = 'v')]
    pub verbose: bool,
}

fn execute(args: Args) -> anyhow::Result<()> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    WriteLogger::init(level, Config::default(), std::io::stderr())?;

    let pattern = Regex::new(IDENTIFIER_PATTERN).context("invalid identifier pattern")?;
    let flags = KeywordFlags::c_environment().for_target(args.arch);
    let words = enabled_keywords(KEYWORD_TABLE, flags);
    let words = identifier_keywords(&words, &pattern);
    debug!(
        "{} reserved words for {} from keyword table {}",
        words.len(),
        args.arch,
        KEYWORD_TABLE_VERSION
    );

    let module = render_keyword_module(&words, args.wrap);
    match &args.output {
        Some(path) => fs::write(path, module)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(module.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    match execute(args) {
        Ok(()) => (),
        Err(err) => {
            let err = format!("{:?}", err);
            eprintln!("{}", err.bold().red());
            std::process::exit(1);
        }
    }
}
