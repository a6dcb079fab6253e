use std::fs::File;
use std::io::{BufReader, Write};
use std::process::Command;

use eight_puzzle::{EightPuzzle, Error, Interpreter, SessionConfig};

fn write_script(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn run(lines: &[&str]) -> (eight_puzzle::ScriptReport, EightPuzzle, String) {
    let script = write_script(lines);
    let reader = BufReader::new(File::open(script.path()).unwrap());
    let mut interpreter = Interpreter::new(EightPuzzle::new(SessionConfig::default()), Vec::new());
    let report = interpreter.run_script(reader).unwrap();
    let (session, out) = interpreter.into_inner();
    (report, session, String::from_utf8(out).unwrap())
}

#[test]
fn test_full_session() {
    let (report, session, out) = run(&[
        "setState 312 b45 678",
        "printState",
        "solve A-star h1",
        "randomizeState 15",
        "solve A-star h2",
        "printState",
    ]);

    assert_eq!(report.failures().count(), 0);
    assert!(session.current().is_solved());
    assert_eq!(session.seed().peek(), 1);
    assert!(out.starts_with("312\nb45\n678\n\nSolving A-star with starting state 312b45678 and heuristic h1:\nup\n"));
    assert!(out.ends_with("b12\n345\n678\n\n"));
    assert_eq!(out.matches("Puzzle successfully solved").count(), 2);
}

#[test]
fn test_failures_do_not_stop_script() {
    let (report, session, out) = run(&[
        "setState 2143b5678",
        "solve beam 5",
        "maxNodes 3",
        "solve A-star h2",
        "maxNodes 100000",
        "solve A-star h2",
        "solve beam 5",
        "move up",
        "teleport",
    ]);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 4);
    assert_eq!(failures[0].line, 2);
    assert!(matches!(failures[0].result, Err(Error::Unreachable { .. })));
    assert!(matches!(failures[1].result, Err(Error::ResourceExceeded { limit: 3 })));
    assert!(matches!(failures[2].result, Err(Error::InvalidMove { .. })));
    assert!(matches!(failures[3].result, Err(Error::UnknownCommand(_))));

    // the second A* run solved it, and the beam run on the goal is trivial
    assert!(session.current().is_solved());
    assert!(out.contains("Puzzle successfully solved in 14 moves"));
    assert!(out.contains("Puzzle successfully solved in 0 moves, considering 1 nodes"));
}

#[test]
fn test_binary_runs_script() {
    let script = write_script(&["move right", "move down", "printState", "solve beam 3"]);
    let output = Command::new(env!("CARGO_BIN_EXE_eight-puzzle"))
        .arg(script.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "142\n3b5\n678\n\n\
         Solving Local Beam with starting state 1423b5678 and k = 3:\n\
         up\n\
         left\n\
         Puzzle successfully solved in 2 moves, considering 8 nodes\n\n"
    );
}

#[test]
fn test_binary_reports_missing_script() {
    let output = Command::new(env!("CARGO_BIN_EXE_eight-puzzle"))
        .arg("/nonexistent/eight-puzzle-script.txt")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
