extern crate isingmc;
extern crate tempfile;
#[macro_use]
extern crate difference;

use isingmc::observe::Summary;

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn binary(name: &str) -> PathBuf {
    let mut root = env::current_exe()
        .unwrap()
        .parent()
        .expect("executable's directory")
        .to_path_buf();
    if root.ends_with("deps") {
        root.pop();
    }
    root.join(name)
}

fn run_ising_mc(dir: &Path, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(binary("ising-mc"));
    cmd.env("RUST_BACKTRACE", "1");
    cmd.current_dir(dir).args(args);
    let out = cmd.output().expect("command failed to run");
    println!("{}", String::from_utf8_lossy(&out.stdout));
    println!("{}", String::from_utf8_lossy(&out.stderr));
    out
}

/// The summary without the one number that depends on the clock.
fn read_summary(path: &Path) -> String {
    let f = std::fs::File::open(path).unwrap();
    let mut s: Summary = serde_yaml::from_reader(f).unwrap();
    assert!(s.sweeps_per_second > 0.0);
    s.sweeps_per_second = 0.0;
    serde_yaml::to_string(&s).unwrap()
}

#[test]
fn same_seed_same_summary() {
    let dir = tempfile::tempdir().expect("Unable to create temp directory");
    let common_flags = &["--nx=12", "--ny=10", "--temperature=2.0", "--seed=137",
                         "--max-frames=4", "--sweeps-per-frame=5", "--report-every=2"];
    for name in &["first.yaml", "second.yaml"] {
        let save_as = format!("--save-as={}", name);
        let mut args: Vec<&str> = common_flags.to_vec();
        args.push(&save_as);
        let out = run_ising_mc(dir.path(), &args);
        assert!(out.status.success());
        assert!(String::from_utf8_lossy(&out.stdout).contains("Finished 4 frames"));
    }
    let first = read_summary(&dir.path().join("first.yaml"));
    let second = read_summary(&dir.path().join("second.yaml"));
    assert!(first.contains("sweeps: 20"));
    assert_diff!(&first, &second, "\n", 0);
}

#[test]
fn bad_dimensions_fail_cleanly() {
    let dir = tempfile::tempdir().expect("Unable to create temp directory");
    let out = run_ising_mc(dir.path(), &["--nx=2", "--ny=10", "--max-frames=1",
                                         "--save-as=never.yaml"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid argument"));
    assert!(!dir.path().join("never.yaml").exists());
}

#[test]
fn scan_writes_every_temperature() {
    let dir = tempfile::tempdir().expect("Unable to create temp directory");
    let mut cmd = Command::new(binary("ising-scan"));
    cmd.current_dir(dir.path()).args(&[
        "--nx=6", "--ny=6", "--t-min=1.0", "--t-max=4.0", "--temperatures=4",
        "--equilibration=20", "--frames=5", "--sweeps-per-frame=2", "--seed=3",
        "--num-threads=2", "--save-as=scan.json",
    ]);
    let out = cmd.output().expect("command failed to run");
    println!("{}", String::from_utf8_lossy(&out.stdout));
    println!("{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.status.success());
    let f = std::fs::File::open(dir.path().join("scan.json")).unwrap();
    let results: Vec<Summary> = serde_json::from_reader(f).unwrap();
    assert_eq!(results.len(), 4);
    for (k, s) in results.iter().enumerate() {
        assert!((s.temperature - (1.0 + k as f64)).abs() < 1e-9);
        assert_eq!(s.sweeps, 30);
    }
}
