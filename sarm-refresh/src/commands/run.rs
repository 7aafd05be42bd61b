use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use tracing::info;

use sarm_common::{inputs::TaskInputs, run_updates_and_submit, submit::JsonLinesSubmitter};

use crate::config::Config;

pub(super) async fn run(
    config: &Config,
    inputs: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let inputs = match inputs {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading task inputs {}", path.display()))?;
            TaskInputs::from_json(&raw)?
        }
        None => {
            info!("no inputs file, building inputs from the environment");
            let reports = super::fetch_reports(config).await?;
            config.task_inputs(reports)?
        }
    };

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let submitted = execute(&inputs, writer)?;
    info!("{submitted} intents written");
    Ok(())
}

/// Runs the rating refresh over `inputs`, writing one intent per line.
fn execute<W: Write>(inputs: &TaskInputs, writer: W) -> anyhow::Result<usize> {
    let tokens = inputs.token_descriptors()?;
    let mut submitter = JsonLinesSubmitter::new(writer);
    let acks = run_updates_and_submit(
        &tokens,
        &inputs.reports,
        inputs.chain_id,
        &inputs.ssa_oracle_address,
        &mut submitter,
    )?;
    Ok(acks.len())
}
