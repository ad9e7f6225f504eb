use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(name = "netcmp")]
#[command(about = "Compare two netlist exports independent of record order", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to netlist A
    #[arg(value_name = "NETLIST_A")]
    netlist_a: PathBuf,

    /// Path to netlist B
    #[arg(value_name = "NETLIST_B")]
    netlist_b: PathBuf,

    /// Where to write the comparison report
    #[arg(value_name = "REPORT")]
    report: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --debug
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    let a = netcmp::load_design(&cli.netlist_a).context("Failed to load netlist A")?;
    let b = netcmp::load_design(&cli.netlist_b).context("Failed to load netlist B")?;

    let count = netcmp::compare_to_file(&a, &b, &cli.report).context("Failed to write report")?;
    println!("Comparison complete, {count} differences found");
    Ok(())
}
