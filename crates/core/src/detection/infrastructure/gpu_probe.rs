use crate::detection::domain::hardware_probe::HardwareProbe;

/// Probes for a usable hardware compute adapter via wgpu.
///
/// Software rasterizers report as CPU adapters and do not count; the
/// accelerated backend is only considered available on real hardware.
pub struct WgpuProbe;

impl WgpuProbe {
    fn hardware_adapter_present() -> bool {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }));
        match adapter {
            Some(adapter) => adapter.get_info().device_type != wgpu::DeviceType::Cpu,
            None => false,
        }
    }
}

impl HardwareProbe for WgpuProbe {
    fn device_count(&self) -> usize {
        if Self::hardware_adapter_present() {
            1
        } else {
            0
        }
    }
}
