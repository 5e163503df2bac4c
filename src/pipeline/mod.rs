//! The per-operand processing pipeline: name resolution, source/destination
//! opening, directory recursion, and the driver that ties them together.

pub mod driver;
pub mod io;
pub mod naming;
pub mod walk;

pub use driver::{process_operand, Outcome, RunOptions};
