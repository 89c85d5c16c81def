use clap::Parser;
use pcbpanel::cli::{run, CliArgs};
use pcbpanel::{init_logging, BUILD_DATE, VERSION};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    init_logging()?;
    info!("pcbpanel {} (built {})", VERSION, BUILD_DATE);

    let report = run(&args)?;
    println!(
        "{} board copies, {} cut segments, {} labels",
        report.board_copies(),
        report.separation.segments.len(),
        report.separation.labels.len()
    );

    Ok(())
}
