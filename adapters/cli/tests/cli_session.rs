use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_maze-forager"))
        .args(args)
        .output()
        .expect("failed to run the maze-forager binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid utf8")
}

#[test]
fn training_scenario_clears_the_board() {
    let output = run(&["--scenario", "training", "--ticks", "60"]);

    assert!(output.status.success(), "binary exited with a failure");
    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("board cleared"),
        "expected the open training board to be cleared:\n{stdout}"
    );
}

#[test]
fn export_emits_a_transfer_string() {
    let output = run(&["--scenario", "crossing", "--export"]);

    assert!(output.status.success(), "binary exited with a failure");
    let stdout = stdout_of(&output);
    assert!(
        stdout.trim().starts_with("forage:v1:9x9:"),
        "unexpected transfer string: {stdout}"
    );
}

#[test]
fn transfer_string_round_trips_through_the_binary() {
    let exported = run(&["--scenario", "crossing", "--export"]);
    assert!(exported.status.success(), "export exited with a failure");
    let token = stdout_of(&exported).trim().to_owned();

    // Feeding the token back re-encodes the same scenario byte for byte.
    let reimported = run(&["--scenario", &token, "--export"]);
    assert!(reimported.status.success(), "reimport exited with a failure");
    assert_eq!(stdout_of(&reimported).trim(), token);
}

#[test]
fn show_values_prints_the_blocked_marker_for_walls() {
    let output = run(&["--scenario", "crossing", "--ticks", "1", "--show-values"]);

    assert!(output.status.success(), "binary exited with a failure");
    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("####"),
        "expected the wall cells of the crossing board to be rendered:\n{stdout}"
    );
}

#[test]
fn unknown_scenario_is_rejected() {
    let output = run(&["--scenario", "does-not-exist", "--ticks", "1"]);

    assert!(!output.status.success(), "unknown scenario should fail");
    let stderr = String::from_utf8(output.stderr).expect("stderr should be valid utf8");
    assert!(
        stderr.contains("unknown scenario"),
        "expected a descriptive error, got:\n{stderr}"
    );
}
