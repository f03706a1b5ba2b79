//! Drawing surface shared by every scene pass.
//!
//! The canvas is the only mutable state that crosses pass boundaries.
//! Writes are bounds-checked and silently skipped outside the grid.

mod shapes;
mod surface;

pub use shapes::{disc_offsets, polar_point};
pub use surface::Canvas;
