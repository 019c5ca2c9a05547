//! Data driven checks: `data/<group>/<n>.in` holds a problem file, `data/<group>/<n>.out` the
//! expected result.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::parser::Limits;

fn group_dir(group: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(group)
}

/// Discover all case numbers of a group, in ascending order.
pub fn discover_cases(group: &str) -> Vec<usize> {
    let mut cases = Vec::new();
    if let Ok(entries) = fs::read_dir(group_dir(group)) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let number = name
                .to_str()
                .and_then(|n| n.strip_suffix(".in"))
                .and_then(|n| n.parse::<usize>().ok());
            if let Some(number) = number {
                cases.push(number);
            }
        }
    }
    cases.sort_unstable();
    cases
}

/// Run a single case and return (expected, actual, duration).
pub fn run_case(group: &str, case: usize, limits: &Limits) -> Result<(String, String, Duration), String> {
    let dir = group_dir(group);
    let in_file = dir.join(format!("{}.in", case));
    let out_file = dir.join(format!("{}.out", case));

    let expected = fs::read_to_string(&out_file)
        .map_err(|e| format!("Failed to read {}: {}", out_file.display(), e))?;

    let start = Instant::now();
    let actual = crate::pack_with(&in_file, limits).map_err(|e| e.to_string())?;
    let duration = start.elapsed();

    Ok((expected.trim().to_string(), actual.trim().to_string(), duration))
}

/// Verify every case of a group, panicking on the first mismatch.
pub fn verify_all(group: &str, limits: &Limits) {
    let cases = discover_cases(group);
    assert!(!cases.is_empty(), "No cases found for {}", group);

    let mut total = Duration::ZERO;
    for case in cases {
        match run_case(group, case, limits) {
            Ok((expected, actual, duration)) => {
                total += duration;
                assert_eq!(
                    actual,
                    expected,
                    "Case {}/{} failed (took {:.3}s)\nExpected:\n{}\nActual:\n{}",
                    group,
                    case,
                    duration.as_secs_f64(),
                    expected,
                    actual
                );
            }
            Err(e) => panic!("Case {}/{} error: {}", group, case, e),
        }
    }
    println!("Total time: {:.3}s", total.as_secs_f64());
}
