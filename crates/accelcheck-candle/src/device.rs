use candle_core::{DType, Device};

use accelcheck_core::{DeviceKind, DeviceSelection, Precision};

pub fn device_for(selection: &DeviceSelection, ordinal: usize) -> candle_core::Result<Device> {
    match selection.device_kind() {
        DeviceKind::AcceleratorPrimary => Device::new_cuda(ordinal),
        DeviceKind::AcceleratorSecondary => Device::new_metal(ordinal),
        DeviceKind::Cpu => Ok(Device::Cpu),
    }
}

pub fn dtype_for(precision: Precision) -> DType {
    match precision { Precision::Reduced => DType::BF16, Precision::Full => DType::F32 }
}

/// `cuda:0`, `metal:0` or `cpu`, matching how the report names devices.
pub fn device_label(kind: DeviceKind, ordinal: usize) -> String {
    if kind.is_accelerator() { format!("{}:{}", kind.label(), ordinal) } else { kind.label().to_string() }
}

/// `cuDriverGetVersion` encodes 12.4 as 12040.
pub fn format_driver_version(raw: i32) -> String { format!("{}.{}", raw / 1000, (raw % 1000) / 10) }

pub(crate) fn probe_cuda(ordinal: usize) -> bool {
    candle_core::utils::cuda_is_available() && Device::new_cuda(ordinal).is_ok()
}

pub(crate) fn probe_metal(ordinal: usize) -> bool {
    candle_core::utils::metal_is_available() && Device::new_metal(ordinal).is_ok()
}
