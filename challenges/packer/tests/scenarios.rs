use packer::testing::verify_all;
use packer::Limits;

#[test]
fn test_scenarios() {
    verify_all("scenarios", &Limits::default());
}

#[test]
fn test_degenerate() {
    verify_all("degenerate", &Limits::default());
}

#[test]
fn test_limits_skip_lines() {
    let limits = Limits { max_capacity: 60, ..Limits::default() };
    let (_, actual, _) = packer::testing::run_case("scenarios", 1, &limits).unwrap();
    // only the capacity 8 and 56 lines fit under the limit
    assert_eq!(actual, "-\n8,9");
}
