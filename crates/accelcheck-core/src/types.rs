//! Domain types shared by the selector, the probes and the report.

use std::fmt;

/// Which class of device a run ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// CUDA-class GPU, always probed first.
    AcceleratorPrimary,
    /// Metal-class GPU. Detected, never selected by the default policy.
    AcceleratorSecondary,
    Cpu,
}

impl DeviceKind {
    pub fn label(self) -> &'static str {
        match self { Self::AcceleratorPrimary => "cuda", Self::AcceleratorSecondary => "metal", Self::Cpu => "cpu" }
    }

    pub fn is_accelerator(self) -> bool { self != Self::Cpu }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Numeric width used for computation on the selected device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// bf16
    Reduced,
    /// f32
    Full,
}

impl Precision {
    pub fn label(self) -> &'static str {
        match self { Self::Reduced => "bf16", Self::Full => "f32" }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Outcome of device selection.
///
/// Fields are private so that a CPU selection can never carry reduced
/// precision; build one with [`DeviceSelection::on`] or [`DeviceSelection::cpu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceSelection {
    device_kind: DeviceKind,
    precision: Precision,
}

impl DeviceSelection {
    /// Selection on `kind`, with reduced precision on accelerators and full precision on CPU.
    pub fn on(kind: DeviceKind) -> Self {
        let precision = if kind.is_accelerator() { Precision::Reduced } else { Precision::Full };
        Self { device_kind: kind, precision }
    }

    pub fn cpu() -> Self { Self::on(DeviceKind::Cpu) }

    pub fn device_kind(&self) -> DeviceKind { self.device_kind }

    pub fn precision(&self) -> Precision { self.precision }

    pub fn is_primary(&self) -> bool { self.device_kind == DeviceKind::AcceleratorPrimary }
}

/// Explicit availability flags, for callers that already know the answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub primary: bool,
    pub secondary: bool,
}

/// Facts about the primary accelerator printed by the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceleratorInfo {
    pub name: String,
    pub device_count: usize,
    pub current_index: usize,
    pub total_memory_bytes: Option<u64>,
    /// CUDA driver API version as `major.minor`.
    pub driver_version: Option<String>,
}

/// Device-wide memory counters reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl MemoryStats {
    pub fn used_bytes(&self) -> u64 { self.total_bytes.saturating_sub(self.free_bytes) }
}

/// What a completed smoke test observed.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeReport {
    pub device: String,
    pub dtype: String,
    pub dims: Vec<usize>,
    pub checksum: f32,
}

/// Final verdict of a diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Primary accelerator selected and the smoke test completed.
    Working { device_name: Option<String> },
    /// Primary accelerator selected but the smoke test failed.
    AcceleratorFaulty { error: String },
    /// Running on CPU.
    CpuOnly,
}

impl Summary {
    pub fn evaluate(selection: &DeviceSelection, smoke: &Result<SmokeReport, String>, device_name: Option<String>) -> Self {
        if !selection.is_primary() { return Self::CpuOnly; }
        match smoke {
            Ok(_) => Self::Working { device_name },
            Err(e) => Self::AcceleratorFaulty { error: e.clone() },
        }
    }

    pub fn is_success(&self) -> bool { matches!(self, Self::Working { .. }) }
}
