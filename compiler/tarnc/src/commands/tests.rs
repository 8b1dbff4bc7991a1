#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use tarn_eval::FaultPolicy;

use super::Options;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn file_and_flags_in_any_order() {
    let options = Options::parse(&args(&["--sdk", "lib", "main.tarn", "--fail-fast"])).unwrap();
    assert_eq!(
        options,
        Options {
            file: PathBuf::from("main.tarn"),
            sdk: Some(PathBuf::from("lib")),
            fail_fast: true,
            max_call_depth: None,
        }
    );
    let config = options.eval_config();
    assert_eq!(config.fault_policy, FaultPolicy::Propagate);
}

#[test]
fn max_depth_reaches_the_config() {
    let options = Options::parse(&args(&["a.tarn", "--max-depth", "64"])).unwrap();
    assert_eq!(options.eval_config().max_call_depth, 64);
    assert_eq!(options.eval_config().fault_policy, FaultPolicy::Continue);
}

#[test]
fn bad_arguments() {
    assert_eq!(Options::parse(&[]).unwrap_err(), "missing file path");
    assert_eq!(
        Options::parse(&args(&["a.tarn", "--sdk"])).unwrap_err(),
        "`--sdk` needs a directory"
    );
    assert_eq!(
        Options::parse(&args(&["a.tarn", "--max-depth", "deep"])).unwrap_err(),
        "invalid depth `deep`"
    );
    assert_eq!(
        Options::parse(&args(&["a.tarn", "--verbose"])).unwrap_err(),
        "unknown option `--verbose`"
    );
    assert_eq!(
        Options::parse(&args(&["a.tarn", "b.tarn"])).unwrap_err(),
        "unexpected argument `b.tarn`"
    );
}
