use std::io::Write;
use std::process::{Command, Output, Stdio};

fn solve(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_solve"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn solve");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn solves_from_stdin() {
    let out = solve(&[], "4 1\n2 2 1 1\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "2");
}

#[test]
fn trace_goes_to_stderr() {
    let out = solve(&["--trace"], "3 2\n1 1 1\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "3");
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("!log step deadline=1 count=3 days_left=1"));
    assert!(err.contains("!log stop ReachedZero"));
}

#[test]
fn malformed_input_exits_with_status_1() {
    let out = solve(&[], "3 1\n5 6");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing deadline #3"));

    let out = solve(&[], "2 1\n3 -1");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid deadline #2"));
}
