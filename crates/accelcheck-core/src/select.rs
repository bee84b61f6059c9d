use tracing::debug;

use crate::traits::AcceleratorAvailability;
use crate::types::{DeviceKind, DeviceSelection};

/// Pick the device a run should use.
///
/// CUDA wins when present. Metal is detected but mapped to CPU: it has shown
/// correctness problems on the hardware this tool targets.
pub fn select_device<A: AcceleratorAvailability + ?Sized>(probe: &A) -> DeviceSelection {
    if probe.primary_available() {
        return DeviceSelection::on(DeviceKind::AcceleratorPrimary);
    }
    if probe.secondary_available() {
        debug!("secondary accelerator present, staying on CPU");
    }
    DeviceSelection::cpu()
}
