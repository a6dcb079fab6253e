//! Line-oriented command scripts.
//!
//! Each line holds one command:
//!
//! ```text
//! setState b12 345 678
//! printState
//! move right
//! randomizeState 20
//! solve A-star h2
//! solve beam 10
//! maxNodes 5000
//! ```
//!
//! A failing line is logged and the script carries on with the next one.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{error, info};

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::{Move, Puzzle};
use crate::search::Solution;
use crate::session::EightPuzzle;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetState(Puzzle),
    PrintState,
    Move(Move),
    Randomize(i64),
    SolveAStar(Heuristic),
    SolveBeam(usize),
    MaxNodes(usize),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        if line == "printState" {
            return Ok(Command::PrintState);
        }

        let Some((name, arg)) = line.split_once(' ') else {
            return Err(Error::UnknownCommand(line.to_string()));
        };

        match name {
            "setState" => Ok(Command::SetState(arg.parse()?)),
            "move" => Ok(Command::Move(arg.parse()?)),
            "randomizeState" => Ok(Command::Randomize(parse_number(name, arg, "an integer")?)),
            "maxNodes" => Ok(Command::MaxNodes(parse_number(name, arg, "a non-negative integer")?)),
            "solve" => match arg.split_once(' ') {
                Some(("A-star", heuristic)) => Ok(Command::SolveAStar(heuristic.parse()?)),
                Some(("beam", width)) => Ok(Command::SolveBeam(parse_number(
                    "solve beam",
                    width,
                    "a non-negative beam width",
                )?)),
                _ => Err(Error::UnknownCommand(line.to_string())),
            },
            _ => Err(Error::UnknownCommand(line.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(command: &str, value: &str, expected: &str) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidArgument {
        command: command.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    })
}

/// Outcome of one non-blank script line.
#[derive(Debug)]
pub struct LineOutcome {
    /// 1-based line number in the script.
    pub line: usize,
    pub result: Result<()>,
}

/// Results of running a whole script.
#[derive(Debug, Default)]
pub struct ScriptReport {
    pub outcomes: Vec<LineOutcome>,
}

impl ScriptReport {
    pub fn failures(&self) -> impl Iterator<Item = &LineOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    pub fn executed(&self) -> usize {
        self.outcomes.len()
    }
}

/// Runs commands against a session, printing boards and solutions to `out`.
pub struct Interpreter<W: Write> {
    session: EightPuzzle,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(session: EightPuzzle, out: W) -> Self {
        Self { session, out }
    }

    pub fn session(&self) -> &EightPuzzle {
        &self.session
    }

    pub fn into_inner(self) -> (EightPuzzle, W) {
        (self.session, self.out)
    }

    /// Parses and runs a single line.
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        let command: Command = line.parse()?;
        self.execute(&command)
    }

    /// Runs every line of `reader`, continuing past failed commands.
    ///
    /// Only a failure to read the script itself stops the run early. Bytes
    /// that are not valid UTF-8 are replaced, so such a line fails on its own
    /// as an unknown command.
    pub fn run_script<R: BufRead>(&mut self, reader: R) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();

        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.map_err(|source| Error::Io {
                operation: "read script".to_string(),
                source,
            })?;
            let line = String::from_utf8_lossy(&bytes);
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }

            let result = self.run_line(trimmed);
            if let Err(err) = &result {
                error!(line = idx + 1, command = trimmed, "{err}");
            }
            report.outcomes.push(LineOutcome {
                line: idx + 1,
                result,
            });
        }

        info!(
            executed = report.executed(),
            failed = report.failures().count(),
            max_nodes = self.session.max_nodes(),
            next_seed = self.session.seed().peek(),
            "script finished"
        );
        Ok(report)
    }

    pub fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::SetState(puzzle) => {
                self.session.set_state(*puzzle);
            }
            Command::PrintState => {
                let board = self.session.current().to_string();
                self.emit_line(&board)?;
            }
            Command::Move(direction) => {
                self.session.apply_move(*direction)?;
            }
            Command::Randomize(n) => {
                self.session.randomize(*n)?;
            }
            Command::SolveAStar(heuristic) => {
                let header = format!(
                    "Solving A-star with starting state {} and heuristic {}:",
                    self.session.current().notation(),
                    heuristic
                );
                self.emit_line(&header)?;
                let solution = self.session.solve_a_star(*heuristic)?;
                self.report(&solution)?;
            }
            Command::SolveBeam(width) => {
                let header = format!(
                    "Solving Local Beam with starting state {} and k = {}:",
                    self.session.current().notation(),
                    width
                );
                self.emit_line(&header)?;
                let solution = self.session.solve_beam(*width)?;
                self.report(&solution)?;
            }
            Command::MaxNodes(n) => self.session.set_max_nodes(*n),
        }
        Ok(())
    }

    fn report(&mut self, solution: &Solution) -> Result<()> {
        let moves = solution.moves();
        for dir in &moves {
            self.emit_line(&dir.to_string())?;
        }
        let summary = format!(
            "Puzzle successfully solved in {} moves, considering {} nodes",
            moves.len(),
            solution.nodes_generated()
        );
        self.emit_line(&summary)?;
        self.emit("\n")
    }

    fn emit_line(&mut self, text: &str) -> Result<()> {
        self.emit(text)?;
        self.emit("\n")
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|source| Error::Io {
                operation: "write output".to_string(),
                source,
            })
    }
}
