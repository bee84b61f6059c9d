use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use tracing::debug;

use accelcheck_core::types::SmokeReport;

/// Multiply a random `size x size` matrix by its transpose on `device`.
///
/// The matrix is drawn on the host and copied over so the transfer path is
/// exercised as well as the kernel.
pub fn matmul_smoke(device: &Device, label: &str, size: usize) -> Result<SmokeReport> {
    if size == 0 { return Err(anyhow!("matrix size must be greater than 0")); }
    let host = Tensor::randn(0f32, 1f32, (size, size), &Device::Cpu)?;
    let a = host.to_device(device)?;
    debug!(device = label, size, "allocated smoke tensor");
    let product = a.matmul(&a.t()?)?;
    device.synchronize()?;
    let checksum = product.sum_all()?.to_device(&Device::Cpu)?.to_scalar::<f32>()?;
    if !checksum.is_finite() { return Err(anyhow!("matmul on {} produced a non-finite result", label)); }
    Ok(SmokeReport { device: label.to_string(), dtype: a.dtype().as_str().to_string(), dims: product.dims().to_vec(), checksum })
}
