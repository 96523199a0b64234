pub mod constants;
pub mod detection;
pub mod feature_flags;
pub mod frame;
