pub mod cli;
pub mod logging;
pub mod model;
pub mod parser;
pub mod processor;
pub mod sweep;
pub mod writer;

use anyhow::{Context, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::ParamList;
use crate::writer::c::CxxPaths;

/// Everything one generator invocation needs.
#[derive(Debug, Clone)]
pub struct Options {
    pub template: PathBuf,
    pub output: PathBuf,
    pub param_files: Vec<PathBuf>,
    pub cxx_prefix: String,
    pub dump_params: Option<PathBuf>,
}

impl From<cli::Cli> for Options {
    fn from(args: cli::Cli) -> Self {
        Self {
            param_files: args.param_files(),
            template: args.template,
            output: args.output,
            cxx_prefix: args.cxx_prefix,
            dump_params: args.dump_params,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let opts: Options = cli::Cli::parse().into();
    generate(&opts)
}

/// Read the tables, merging them in order. A malformed table leaves the
/// sentinel in `output` before the error is returned.
fn load_params(param_files: &[PathBuf], output: &Path) -> anyhow::Result<ParamList> {
    match parser::load_param_files(param_files) {
        Ok(params) => Ok(params),
        Err(e) if e.is_malformed() => {
            writer::fortran::emit_sentinel(output)
                .with_context(|| format!("Writing failure stub {}", output.display()))?;
            Err(e).context("Parsing parameter tables")
        }
        Err(e) => Err(e.into()),
    }
}

pub fn generate(opts: &Options) -> anyhow::Result<()> {
    if opts.template.as_os_str().is_empty() || opts.output.as_os_str().is_empty() {
        bail!("invalid calling sequence: template and output paths are required");
    }

    info!("creating {}", opts.output.display());

    // 1. ── Parse ──────────────────────────────────────────────────────
    let params = load_params(&opts.param_files, &opts.output)?;
    info!("{} parameters", params.len());

    let template = std::fs::read_to_string(&opts.template)
        .with_context(|| format!("file {} does not exist", opts.template.display()))?;

    // 2. ── Expand template ────────────────────────────────────────────
    writer::fortran::emit(&template, &params, &opts.output)
        .with_context(|| format!("Writing {}", opts.output.display()))?;

    // 3. ── C++ side ───────────────────────────────────────────────────
    let paths = CxxPaths::from_prefix(&opts.cxx_prefix);
    writer::c::emit(&params, &paths).with_context(|| "Writing C++ artifacts")?;

    if let Some(dump) = &opts.dump_params {
        writer::json::emit(&params, dump)
            .with_context(|| format!("Writing {}", dump.display()))?;
    }

    Ok(())
}
