//! Run one Ising simulation frame by frame, the way a viewer would.

use auto_args::AutoArgs;
use isingmc::mc::metropolis::{Metropolis, MetropolisParams};
use isingmc::mc::report::{Report, ReportParams};
use isingmc::mc::VERSION;
use isingmc::observe::{self, Summary};
use isingmc::system::ising::IsingParams;

use std::path::PathBuf;

/// The parameters needed to configure a run.
#[derive(AutoArgs, Debug)]
struct Params {
    _ising: IsingParams,
    _mc: MetropolisParams,
    _report: ReportParams,
    /// Sweeps between frames (default 25)
    sweeps_per_frame: Option<u64>,
    /// Where to save the final summary (yaml, json or cbor)
    save_as: Option<PathBuf>,
}

fn run(params: Params) -> Result<(), Box<dyn std::error::Error>> {
    let mut mc = Metropolis::from_params(params._ising, params._mc)?;
    let report = Report::from(params._report);
    let sweeps_per_frame = params.sweeps_per_frame.unwrap_or(25);
    let mut frames = 0;
    while !report.am_all_done(frames) {
        mc.run_sweeps(sweeps_per_frame)?;
        frames += 1;
        if report.shall_i_report(frames) {
            report.print(&Summary::of(&mc));
        }
    }
    let summary = Summary::of(&mc);
    report.finish(frames, &summary);
    if let Some(save_as) = params.save_as {
        observe::save(&save_as, &summary)?;
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
