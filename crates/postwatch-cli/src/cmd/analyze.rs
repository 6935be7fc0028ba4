//! `postwatch analyze` and `postwatch run`

use std::path::Path;

use postwatch_analysis::Pipeline;
use postwatch_core::config::PostwatchConfig;
use postwatch_core::errors::PipelineError;

use crate::summary;

pub fn run(
    config: PostwatchConfig,
    input: &Path,
    output: &Path,
    charts: Option<&Path>,
    quiet: bool,
) -> Result<(), PipelineError> {
    let report = Pipeline::new(config)?.analyze_file(input, output, charts)?;
    if !quiet {
        println!("Labeled table -> {}", output.display());
        summary::print_report(&report)?;
    }
    Ok(())
}

pub fn run_all(
    config: PostwatchConfig,
    input: &Path,
    output: &Path,
    cleaned: Option<&Path>,
    charts: Option<&Path>,
    quiet: bool,
) -> Result<(), PipelineError> {
    let report = Pipeline::new(config)?.run_file(input, output, cleaned, charts)?;
    if !quiet {
        println!("Labeled table -> {}", output.display());
        summary::print_report(&report)?;
    }
    Ok(())
}
