//! The refinement session: render, show, read a command, apply, repeat.
//!
//! The session owns the working code list for its whole lifetime. It is
//! driven one command line at a time, which keeps it independent of where
//! the lines come from and where renderings go.

use ikprint_model::{CapacityError, CodeList, Layout};
use tracing::{debug, warn};

use crate::command::{AppliedEdit, Command, parse_command};
use crate::render::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Done,
}

/// Final state handed to the output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub codes: CodeList,
    pub rendering: String,
}

#[derive(Debug)]
pub struct RefinementSession {
    codes: CodeList,
    layout: Layout,
    state: SessionState,
    rendering: String,
}

impl RefinementSession {
    /// Runs the capacity guard, then opens a session on `codes`.
    pub fn start(codes: CodeList, layout: Layout) -> Result<Self, CapacityError> {
        layout.capacity().check(codes.len())?;
        Ok(Self::new(codes, layout))
    }

    /// Opens a session without the capacity guard.
    pub fn new(codes: CodeList, layout: Layout) -> Self {
        let rendering = render(codes.as_slice(), &layout);
        Self {
            codes,
            layout,
            state: SessionState::Editing,
            rendering,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    pub fn codes(&self) -> &CodeList {
        &self.codes
    }

    /// The rendering of the current list.
    pub fn rendering(&self) -> &str {
        &self.rendering
    }

    /// Feeds one operator line to the session.
    ///
    /// Lines submitted after the session is done are ignored.
    pub fn submit(&mut self, line: &str) -> SessionState {
        if self.is_done() {
            return self.state;
        }
        match parse_command(line) {
            Command::Finish => {
                debug!(codes = self.codes.len(), "refinement finished");
                self.state = SessionState::Done;
            }
            Command::Edit(command) => {
                let applied = command.apply(&mut self.codes);
                self.after_edit(&applied);
            }
        }
        self.state
    }

    /// Ends the session as if an empty line had been entered.
    pub fn finish(&mut self) {
        self.state = SessionState::Done;
    }

    pub fn into_outcome(self) -> SessionOutcome {
        SessionOutcome {
            codes: self.codes,
            rendering: self.rendering,
        }
    }

    fn after_edit(&mut self, applied: &AppliedEdit) {
        debug!(
            added = applied.added.len(),
            removed = applied.removed.len(),
            codes = self.codes.len(),
            "edit applied"
        );
        if !applied.changed() {
            return;
        }
        self.rendering = render(self.codes.as_slice(), &self.layout);
        let capacity = self.layout.capacity();
        if !capacity.fits(self.codes.len()) {
            warn!(
                count = self.codes.len(),
                max = capacity.max_codes(),
                "code list no longer fits on one page"
            );
        }
    }
}
