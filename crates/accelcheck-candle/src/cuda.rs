//! CUDA driver queries through the `cudarc` build that candle links against.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use candle_core::cuda_backend::cudarc::driver::{result, sys, CudaContext};
use tracing::warn;

use accelcheck_core::types::{AcceleratorInfo, MemoryStats};

use crate::device::format_driver_version;

pub fn accelerator_info(ordinal: usize) -> Result<AcceleratorInfo> {
    let count = CudaContext::device_count().map_err(|e| anyhow!("cuDeviceGetCount failed: {e}"))?;
    let device_count = usize::try_from(count)?;
    let ctx = open(ordinal)?;
    let name = ctx.name().map_err(|e| anyhow!("cuDeviceGetName failed: {e}"))?;
    let total_memory_bytes = match context_memory(&ctx) {
        Ok(stats) => Some(stats.total_bytes),
        Err(e) => { warn!("memory query failed: {e:#}"); None }
    };
    let driver_version = match driver_version() {
        Ok(version) => Some(version),
        Err(e) => { warn!("driver version query failed: {e:#}"); None }
    };
    Ok(AcceleratorInfo { name, device_count, current_index: ctx.ordinal(), total_memory_bytes, driver_version })
}

pub fn memory_stats(ordinal: usize) -> Result<MemoryStats> {
    context_memory(&open(ordinal)?)
}

fn open(ordinal: usize) -> Result<Arc<CudaContext>> {
    CudaContext::new(ordinal).map_err(|e| anyhow!("failed to open CUDA device {ordinal}: {e}"))
}

fn context_memory(ctx: &CudaContext) -> Result<MemoryStats> {
    ctx.bind_to_thread().map_err(|e| anyhow!("failed to bind CUDA context: {e}"))?;
    let (free, total) = result::mem_get_info().map_err(|e| anyhow!("cuMemGetInfo failed: {e}"))?;
    Ok(MemoryStats { total_bytes: total as u64, free_bytes: free as u64 })
}

fn driver_version() -> Result<String> {
    let mut raw = 0i32;
    // SAFETY: the driver only writes the version into the provided out-pointer.
    unsafe { sys::cuDriverGetVersion(&mut raw) }.result().map_err(|e| anyhow!("cuDriverGetVersion failed: {e}"))?;
    Ok(format_driver_version(raw))
}
