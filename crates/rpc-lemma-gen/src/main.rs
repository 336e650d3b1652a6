// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::*;
use colored::Colorize;
use log::{debug, LevelFilter};
use rpc_lemma_gen::{run_generation, Architecture, Interface, Options, RenderMode};
use simplelog::{Config, WriteLogger};

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Generates Isabelle lemmas stating that the glue code of an RPC connection only touches valid memory",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Interface description (TOML)
    #[clap(long = "interface", short = 'i')]
    pub interface: Option<PathBuf>,

    /// Path of the generated theory; its file stem names the theory
    #[clap(long = "output", short = 'o')]
    pub output: Option<String>,

    /// Architecture the glue code is compiled for
    #[clap(long = "arch", short = 'a', value_enum)]
    pub arch: Option<Architecture>,

    /// How repeated assertions are folded
    #[clap(long = "mode", short = 'm', value_enum)]
    pub mode: Option<RenderMode>,

    /// Number of words in an IPC message
    #[clap(long = "msg-max-length")]
    pub msg_max_length: Option<usize>,

    /// Options file (TOML); command line flags take precedence
    #[clap(long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Print the effective options and exit
    #[clap(long = "print-config")]
    pub print_config: bool,

    /// Log debug output
    #[clap(long = "verbose", short = 'v')]
    pub verbose: bool,
}

impl Args {
    fn options(&self) -> anyhow::Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_toml_file(path)?,
            None => Options::default(),
        };
        if let Some(output) = &self.output {
            options.output_path = output.clone();
        }
        if let Some(arch) = self.arch {
            options.architecture = arch;
        }
        if let Some(mode) = self.mode {
            options.render.mode = mode;
        }
        if let Some(msg_max_length) = self.msg_max_length {
            options.render.msg_max_length = msg_max_length;
        }
        if self.verbose {
            options.verbosity_level = LevelFilter::Debug;
        }
        Ok(options)
    }
}

fn execute(args: Args) -> anyhow::Result<()> {
    let options = args.options()?;
    if args.print_config {
        print!("{}", options.to_toml()?);
        return Ok(());
    }

    WriteLogger::init(options.verbosity_level, Config::default(), std::io::stderr())?;
    debug!("rpc-lemma-gen version: {}", env!("CARGO_PKG_VERSION"));

    let path = args
        .interface
        .context("no interface given (use --interface)")?;
    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read interface {}", path.display()))?;
    let interface = Interface::from_toml_str(&source)
        .with_context(|| format!("failed to parse interface {}", path.display()))?;

    run_generation(&options, &interface)?;
    Ok(())
}

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

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
