//! `postwatch preprocess`

use std::path::Path;

use postwatch_analysis::Pipeline;
use postwatch_core::config::PostwatchConfig;
use postwatch_core::errors::PipelineError;

use crate::summary;

pub fn run(config: PostwatchConfig, input: &Path, output: &Path, quiet: bool) -> Result<(), PipelineError> {
    let pipeline = Pipeline::with_annotator(config, None);
    let repairs = pipeline.preprocess_file(input, output)?;
    if !quiet {
        println!("Cleaned table -> {}", output.display());
        summary::print_repairs(&repairs);
    }
    Ok(())
}
