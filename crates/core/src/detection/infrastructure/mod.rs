pub mod gpu_probe;
pub mod model_resolver;
