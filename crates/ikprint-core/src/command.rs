//! Operator edit commands.
//!
//! A command is one line of whitespace-separated tokens. `+` and `-` switch
//! the bucket that following tokens land in; the add bucket is active until
//! the first sentinel. An empty (or whitespace-only) line finishes the session.

use ikprint_model::{Code, CodeList};

const ADD_SENTINEL: &str = "+";
const REMOVE_SENTINEL: &str = "-";

/// Parsed operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No tokens: end the session with the current rendering.
    Finish,
    Edit(EditCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Add,
    Remove,
}

/// Codes to add and to remove, in the order they were typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditCommand {
    pub add: Vec<Code>,
    pub remove: Vec<Code>,
}

/// What an [`EditCommand`] actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedEdit {
    pub added: Vec<Code>,
    pub removed: Vec<Code>,
}

impl AppliedEdit {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

pub fn parse_command(line: &str) -> Command {
    let mut command = EditCommand::default();
    let mut bucket = Bucket::Add;
    let mut saw_token = false;

    for token in line.split_whitespace() {
        saw_token = true;
        match token {
            ADD_SENTINEL => bucket = Bucket::Add,
            REMOVE_SENTINEL => bucket = Bucket::Remove,
            _ => {
                // split_whitespace only yields non-empty tokens without whitespace
                let Ok(code) = Code::new(token) else {
                    continue;
                };
                match bucket {
                    Bucket::Add => command.add.push(code),
                    Bucket::Remove => command.remove.push(code),
                }
            }
        }
    }

    if saw_token {
        Command::Edit(command)
    } else {
        Command::Finish
    }
}

impl EditCommand {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// Applies all additions first, then all removals.
    pub fn apply(&self, codes: &mut CodeList) -> AppliedEdit {
        let mut applied = AppliedEdit::default();
        for code in &self.add {
            if codes.add(code.clone()) {
                applied.added.push(code.clone());
            }
        }
        for code in &self.remove {
            if codes.remove(code.as_str()) {
                applied.removed.push(code.clone());
            }
        }
        applied
    }
}
