pub mod detector_factory;
pub mod hardware_probe;
pub mod model;
pub mod object_detector;
