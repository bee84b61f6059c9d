use crate::types::{AcceleratorInfo, Availability, DeviceSelection, MemoryStats, SmokeReport};

/// The two facts device selection depends on.
pub trait AcceleratorAvailability {
    fn primary_available(&self) -> bool;
    fn secondary_available(&self) -> bool;
}

impl AcceleratorAvailability for Availability {
    fn primary_available(&self) -> bool { self.primary }
    fn secondary_available(&self) -> bool { self.secondary }
}

/// Introspection surface of an ML runtime, as used by the diagnostics.
pub trait RuntimeProbe: AcceleratorAvailability {
    fn runtime_version(&self) -> String;

    /// Name, count and memory of the primary accelerator. Errors when none is present.
    fn primary_info(&self) -> anyhow::Result<AcceleratorInfo>;

    /// `None` when the runtime cannot report memory for the primary accelerator.
    fn memory_stats(&self) -> anyhow::Result<Option<MemoryStats>>;

    /// Allocate an `size x size` matrix on the selected device and multiply it by its transpose.
    fn smoke_test(&self, selection: &DeviceSelection, size: usize) -> anyhow::Result<SmokeReport>;
}
