pub mod controls;
pub mod pointer;

pub use controls::{wire_controls, wire_entry_gate};
pub use pointer::wire_pointer_handlers;
