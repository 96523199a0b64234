pub mod fps;
pub mod frame_gate;
pub mod sampling;
