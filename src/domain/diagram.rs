//! Mermaid document assembly
//!
//! Wraps traversal instructions in a fenced `mermaid` block. Each branch
//! becomes an untitled `subgraph`, each edge one `pre:title --> id:title` line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::traverse::Instruction;

const FENCE_OPEN: &str = "```mermaid";
const FENCE_CLOSE: &str = "```";
const BRANCH_BEGIN: &str = "subgraph  ";
const BRANCH_END: &str = "end";

/// Flowchart direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    /// Mermaid alias of `TB`
    #[serde(rename = "TD")]
    TopDown,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::TopDown => "TD",
            Direction::BottomToTop => "BT",
            Direction::LeftToRight => "LR",
            Direction::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TB" => Ok(Direction::TopToBottom),
            "TD" => Ok(Direction::TopDown),
            "BT" => Ok(Direction::BottomToTop),
            "LR" => Ok(Direction::LeftToRight),
            "RL" => Ok(Direction::RightToLeft),
            other => Err(format!("unknown diagram direction: {other}")),
        }
    }
}

/// A complete diagram ready to be written out
#[derive(Debug, Clone)]
pub struct Diagram<'a> {
    direction: Direction,
    instructions: &'a [Instruction],
}

impl<'a> Diagram<'a> {
    pub fn new(direction: Direction, instructions: &'a [Instruction]) -> Self {
        Self {
            direction,
            instructions,
        }
    }

    /// Returns the body lines (everything between the header and the fence)
    pub fn body_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.instructions.iter().map(render_instruction)
    }
}

fn render_instruction(instruction: &Instruction) -> String {
    match instruction {
        Instruction::OpenBranch => BRANCH_BEGIN.to_string(),
        Instruction::CloseBranch => BRANCH_END.to_string(),
        Instruction::Edge {
            from_id,
            from_title,
            to_id,
            to_title,
        } => format!("{}:{} --> {}:{}", from_id, from_title, to_id, to_title),
    }
}

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", FENCE_OPEN)?;
        writeln!(f, "graph {}", self.direction)?;
        for line in self.body_lines() {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", FENCE_CLOSE)
    }
}
