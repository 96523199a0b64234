/// Reports how many accelerated compute devices are present.
///
/// Consulted during configuration when the accelerated backend is
/// requested; zero devices triggers the degrade-to-absent policy.
pub trait HardwareProbe: Send + Sync {
    fn device_count(&self) -> usize;
}

/// Fixed-answer probe for wiring and tests.
pub struct StaticProbe(pub usize);

impl HardwareProbe for StaticProbe {
    fn device_count(&self) -> usize {
        self.0
    }
}
