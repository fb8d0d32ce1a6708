use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{stdout, BufWriter};
use tracing::{info, warn};

use till::config::Cli;
use till::io::{InputReader, InputSource};
use till::logging::init_logging;
use till::output::{write_outcomes, write_till_report};
use till::{GreedyCheck, RunSummary, Till, TillSimulator};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.logging_config())?;

    let set = cli.denomination_set()?;
    match set.check_greedy() {
        GreedyCheck::Optimal => {}
        GreedyCheck::Counterexample(amount) => warn!(
            amount,
            "greedy dispensing is not optimal for this denomination set"
        ),
        GreedyCheck::Skipped { bound } => info!(
            ?bound,
            "denominations too large to check greedy optimality, skipped"
        ),
    }

    let reader = InputReader::new()?;
    let session = reader.consume(&InputSource::from_arg(cli.input.as_deref()), &set)?;
    reader.shutdown();

    let till = Till::from_ascending_counts(set, &session.initial_counts)?;
    let mut simulator = TillSimulator::new(till);
    let receipts = simulator.run(session.requests);

    write_outcomes(BufWriter::new(stdout().lock()), &receipts)?;

    let summary = RunSummary::from_receipts(&receipts);
    info!(
        accepted = summary.accepted,
        stopped = summary.stopped,
        dispensed = %summary.dispensed_value,
        remaining = %simulator.till().total_value(),
        "run complete"
    );

    if let Some(path) = &cli.report {
        let file = File::create(path)
            .with_context(|| format!("failed to create report {}", path.display()))?;
        write_till_report(BufWriter::new(file), simulator.till())?;
    }
    Ok(())
}
