//! `postwatch generate`

use std::path::Path;

use chrono::Local;
use postwatch_analysis::io::write_raw_posts;
use postwatch_analysis::synth::{generate_posts, SynthParams};
use postwatch_core::config::PostwatchConfig;
use postwatch_core::errors::PipelineError;

pub fn run(config: &PostwatchConfig, output: &Path, quiet: bool) -> Result<(), PipelineError> {
    let params = SynthParams::from_config(&config.synth, Local::now().naive_local());
    let posts = generate_posts(&params);
    write_raw_posts(output, &posts)?;
    if !quiet {
        println!(
            "Generated {} posts ({} misinformation) -> {}",
            posts.len(),
            params.misinfo_rows(),
            output.display()
        );
    }
    Ok(())
}
