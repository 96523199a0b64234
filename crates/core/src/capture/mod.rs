//! Frame capture: camera-style sources, render sinks, and the session
//! thread that pumps frames through the gate.

pub mod domain;
pub mod infrastructure;
