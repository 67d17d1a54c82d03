//! Scan a range of temperatures, one independent simulation each.

use auto_args::AutoArgs;
use isingmc::mc::report::{Report, ReportParams};
use isingmc::mc::scan::{self, ScanParams};
use isingmc::mc::VERSION;
use isingmc::observe;
use isingmc::system::ising::IsingParams;

use std::path::PathBuf;

/// The parameters needed to configure a scan.
#[derive(AutoArgs, Debug)]
struct Params {
    _ising: IsingParams,
    _scan: ScanParams,
    /// The number of threads to run on
    num_threads: Option<usize>,
    /// Do not print the results table
    quiet: bool,
    /// Where to save the results (yaml, json or cbor)
    save_as: Option<PathBuf>,
}

fn run(params: Params) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(num_threads) = params.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }
    let report = Report::from(ReportParams {
        max_frames: None,
        report_every: None,
        quiet: params.quiet,
    });
    let results = scan::run(&params._ising, &params._scan)?;
    for s in results.iter() {
        report.print(s);
    }
    if let Some(save_as) = params.save_as {
        observe::save(&save_as, &results)?;
    }
    Ok(())
}

fn main() {
    let params = Params::from_args();
    println!("git version: {}", VERSION);
    if let Err(e) = run(params) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
