use anyhow::{Context, Result};
use futures_util::future::join_all;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{client::PricePredictor, prediction::ClientResult, runtime::Runtime};

/// Label and text of one item to price.
struct Input {
    label: String,
    text: String,
}

/// Reads every input, prices them concurrently and writes results in input order.
///
/// With one input its error is returned as-is. With several, failures are
/// reported per input on stderr and the command fails once all are done.
pub async fn run<R: Runtime, P: PricePredictor, W: Write>(
    runtime: &R,
    predictor: &P,
    league: &str,
    files: &[PathBuf],
    summary: bool,
    out: &mut W,
) -> Result<()> {
    let inputs = read_inputs(runtime, files)?;
    debug!("Pricing {} item(s) in league {}", inputs.len(), league);

    let results = join_all(
        inputs
            .iter()
            .map(|input| predictor.request_price_prediction(&input.text, league)),
    )
    .await;

    let labelled = inputs.len() > 1;
    let mut failures = Vec::new();

    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(result) => write_result(out, &input.label, &result, summary, labelled)?,
            Err(e) => failures.push((input.label.as_str(), e)),
        }
    }

    if failures.is_empty() {
        return Ok(());
    }
    if !labelled {
        if let Some((_, e)) = failures.pop() {
            return Err(e.into());
        }
    }
    for (label, e) in &failures {
        eprintln!("{}: {}", label, e);
    }
    anyhow::bail!(
        "{} of {} predictions failed",
        failures.len(),
        inputs.len()
    )
}

fn read_inputs<R: Runtime>(runtime: &R, files: &[PathBuf]) -> Result<Vec<Input>> {
    if files.is_empty() {
        return Ok(vec![read_stdin(runtime)?]);
    }

    files
        .iter()
        .map(|path| {
            if path == Path::new("-") {
                return read_stdin(runtime);
            }
            let text = runtime
                .read_to_string(path)
                .with_context(|| format!("Failed to read item text from {}", path.display()))?;
            Ok(Input {
                label: path.display().to_string(),
                text,
            })
        })
        .collect()
}

fn read_stdin<R: Runtime>(runtime: &R) -> Result<Input> {
    Ok(Input {
        label: "-".to_string(),
        text: runtime.read_stdin()?,
    })
}

fn write_result<W: Write>(
    out: &mut W,
    label: &str,
    result: &ClientResult,
    summary: bool,
    labelled: bool,
) -> Result<()> {
    if summary {
        if labelled {
            writeln!(out, "{}: {}", label, result.price.summary())?;
        } else {
            writeln!(out, "{}", result.price.summary())?;
        }
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    }
    Ok(())
}
