//! Deciding when a run is over and telling the user how it is going.

use crate::observe::Summary;
use crate::prettyfloat::PrettyFloat;

use auto_args::AutoArgs;
use std::time;

/// The parameters to define the report information as well as stop
/// time (which is part of the report).
#[derive(AutoArgs, Debug, Clone, PartialEq)]
pub struct ReportParams {
    /// The maximum number of frames to run.
    pub max_frames: Option<u64>,
    /// Print a status line every this many frames.
    pub report_every: Option<u64>,
    /// Do not make reports!
    pub quiet: bool,
}

impl Default for ReportParams {
    fn default() -> Self {
        ReportParams {
            max_frames: None,
            report_every: None,
            quiet: true,
        }
    }
}

/// Keeps track of how long we have been running and prints progress.
#[derive(Debug, Clone)]
pub struct Report {
    max_frames: Option<u64>,
    report_every: u64,
    start: time::Instant,
    /// The user has requested that nothing be printed!
    pub quiet: bool,
}

impl From<ReportParams> for Report {
    fn from(params: ReportParams) -> Self {
        Report {
            max_frames: params.max_frames,
            report_every: std::cmp::max(params.report_every.unwrap_or(1), 1),
            start: time::Instant::now(),
            quiet: params.quiet,
        }
    }
}

impl Report {
    /// Have we run as many frames as we were asked to?
    pub fn am_all_done(&self, frames: u64) -> bool {
        match self.max_frames {
            Some(max) => frames >= max,
            None => false,
        }
    }
    /// Is it time for a status line?
    pub fn shall_i_report(&self, frames: u64) -> bool {
        !self.quiet && frames % self.report_every == 0
    }
    /// Print one status line.
    pub fn print(&self, s: &Summary) {
        if self.quiet {
            return;
        }
        println!("{}", status_line(s));
    }
    /// Say goodbye.
    pub fn finish(&self, frames: u64, s: &Summary) {
        if self.quiet {
            return;
        }
        println!("Finished {} frames ({} sweeps of {}x{} at T = {:.4}) in {}",
                 frames, s.sweeps, s.nx, s.ny, PrettyFloat(s.temperature),
                 format_duration(self.start.elapsed().as_secs()));
    }
}

fn status_line(s: &Summary) -> String {
    format!("[{}] T = {:.4}  {:.1} sweeps/s  E/N = {:.4}  m = {:.4}  accepted {}",
            s.sweeps,
            PrettyFloat(s.temperature),
            PrettyFloat(s.sweeps_per_second),
            PrettyFloat(s.mean_energy),
            PrettyFloat(s.mean_spin),
            match s.acceptance_rate {
                Some(r) => format!("{:.1}%", 100.0 * r),
                None => "nothing".to_string(),
            })
}

fn format_duration(secs: u64) -> String {
    let mins = secs / 60;
    let hours = mins / 60;
    let mins = mins % 60;
    if hours > 50 {
        format!("{} hours", hours)
    } else if mins < 1 && hours < 1 {
        format!("{} seconds", secs)
    } else if hours < 1 {
        format!("{} minutes {} seconds", mins, secs % 60)
    } else {
        format!("{} hours, {} minutes", hours, mins)
    }
}

#[test]
fn stops_after_max_frames() {
    let r = Report::from(ReportParams { max_frames: Some(3), report_every: Some(2), quiet: false });
    assert!(!r.am_all_done(2));
    assert!(r.am_all_done(3));
    assert!(r.shall_i_report(4));
    assert!(!r.shall_i_report(5));
    let forever = Report::from(ReportParams::default());
    assert!(!forever.am_all_done(1 << 40));
    assert!(!forever.shall_i_report(1));
}

#[test]
fn durations_read_well() {
    assert_eq!(format_duration(42), "42 seconds");
    assert_eq!(format_duration(125), "2 minutes 5 seconds");
    assert_eq!(format_duration(2 * 3600 + 60), "2 hours, 1 minutes");
    assert_eq!(format_duration(3600 * 60), "60 hours");
}

#[test]
fn status_line_counts_sweeps_exactly() {
    let mut mc = crate::mc::metropolis::Metropolis::new(3, 3, crate::rng::from_seed(Some(1))).unwrap();
    mc.run_sweeps(1000).unwrap();
    let line = status_line(&Summary::of(&mc));
    assert!(line.starts_with("[1000] "), "{}", line);
    mc.run_sweeps(234).unwrap();
    assert!(status_line(&Summary::of(&mc)).starts_with("[1234] "));
}
