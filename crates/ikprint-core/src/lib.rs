//! Core of ikprint: the code grid layout and the refinement session.

pub mod command;
pub mod render;
pub mod session;

pub use command::{AppliedEdit, Command, EditCommand, parse_command};
pub use render::{grid_rows, render, render_grid};
pub use session::{RefinementSession, SessionOutcome, SessionState};
