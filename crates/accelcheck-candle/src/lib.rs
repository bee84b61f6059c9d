//! [`RuntimeProbe`] backed by candle.
//!
//! CUDA is the primary accelerator and Metal the secondary one. Both are
//! compiled in only with the `cuda` / `metal` features; without them the
//! runtime reports CPU only.

use anyhow::Result;
use tracing::{debug, info};

use accelcheck_core::error::Error;
use accelcheck_core::traits::{AcceleratorAvailability, RuntimeProbe};
use accelcheck_core::types::{AcceleratorInfo, DeviceSelection, MemoryStats, SmokeReport};

#[cfg(feature = "cuda")]
pub mod cuda;
pub mod device;
pub mod smoke;

pub use device::{device_for, device_label, dtype_for, format_driver_version};
pub use smoke::matmul_smoke;

/// candle-core version locked for this build.
pub const CANDLE_CORE_VERSION: &str = env!("CANDLE_CORE_VERSION");

/// Availability is probed once in [`CandleRuntime::detect`] and cached.
#[derive(Debug, Clone)]
pub struct CandleRuntime {
    ordinal: usize,
    cuda: bool,
    metal: bool,
}

impl CandleRuntime {
    pub fn detect(ordinal: usize) -> Self {
        let cuda = device::probe_cuda(ordinal);
        let metal = device::probe_metal(ordinal);
        info!(ordinal, cuda, metal, "probed candle backends");
        Self { ordinal, cuda, metal }
    }
}

impl AcceleratorAvailability for CandleRuntime {
    fn primary_available(&self) -> bool { self.cuda }
    fn secondary_available(&self) -> bool { self.metal }
}

impl RuntimeProbe for CandleRuntime {
    fn runtime_version(&self) -> String {
        use candle_core::utils;
        format!(
            "candle-core {} (cuda: {}, metal: {}, mkl: {}, accelerate: {}, cpu threads: {})",
            CANDLE_CORE_VERSION, utils::cuda_is_available(), utils::metal_is_available(), utils::has_mkl(), utils::has_accelerate(), utils::get_num_threads()
        )
    }

    fn primary_info(&self) -> Result<AcceleratorInfo> {
        if !self.cuda { return Err(Error::Unavailable(format!("no CUDA device at ordinal {}", self.ordinal)).into()); }
        #[cfg(feature = "cuda")]
        { cuda::accelerator_info(self.ordinal) }
        #[cfg(not(feature = "cuda"))]
        { Err(Error::Unavailable("built without the cuda feature".to_string()).into()) }
    }

    fn memory_stats(&self) -> Result<Option<MemoryStats>> {
        if !self.cuda { return Ok(None); }
        #[cfg(feature = "cuda")]
        { cuda::memory_stats(self.ordinal).map(Some) }
        #[cfg(not(feature = "cuda"))]
        { Ok(None) }
    }

    fn smoke_test(&self, selection: &DeviceSelection, size: usize) -> Result<SmokeReport> {
        let label = device_label(selection.device_kind(), self.ordinal);
        debug!(device = %label, precision = %selection.precision(), "running smoke test");
        let device = device_for(selection, self.ordinal)?;
        matmul_smoke(&device, &label, size)
    }
}
