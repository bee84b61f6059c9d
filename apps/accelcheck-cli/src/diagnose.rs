use std::io::{self, Write};

use tracing::warn;

use accelcheck_core::config::Settings;
use accelcheck_core::report::{banner, gib, rule, section, write_memory, write_summary};
use accelcheck_core::traits::RuntimeProbe;
use accelcheck_core::types::AcceleratorInfo;
use accelcheck_core::{select_device, Summary};

/// Full diagnostic: detection, selection, smoke test and summary.
pub fn run<P: RuntimeProbe, W: Write>(probe: &P, settings: &Settings, out: &mut W) -> io::Result<Summary> {
    banner(out, "Runtime CUDA Detection Test")?;
    writeln!(out, "\nRuntime version: {}", probe.runtime_version())?;
    writeln!(out, "CUDA available: {}", probe.primary_available())?;

    let info = if probe.primary_available() { detection(probe, out)? } else {
        writeln!(out, "\nNo CUDA available - would run on CPU")?;
        None
    };

    section(out, "Backend Device Selection")?;
    let selection = select_device(probe);
    if probe.secondary_available() && !selection.is_primary() {
        writeln!(out, "\nMetal detected, staying on CPU for stability")?;
    }
    writeln!(out, "\nSelected device: {}", selection.device_kind())?;
    writeln!(out, "Would use dtype: {}", selection.precision())?;

    section(out, "Testing Tensor Creation on Device")?;
    if selection.is_primary() { memory(probe, out, "CUDA memory before smoke test")?; }
    let smoke = probe.smoke_test(&selection, settings.smoke.matrix_size).map_err(|e| format!("{e:#}"));
    match &smoke {
        Ok(report) => {
            writeln!(out, "\n✅ [OK] Successfully created tensor on {}", report.device)?;
            writeln!(out, "  Tensor device: {}", report.device)?;
            writeln!(out, "  Tensor dtype: {}", report.dtype)?;
            writeln!(out, "✅ [OK] Successfully performed computation on {} (result {:?})", report.device, report.dims)?;
        }
        Err(e) => writeln!(out, "\n❌ [ERROR] {e}")?,
    }
    if selection.is_primary() { memory(probe, out, "CUDA memory after smoke test")?; }

    section(out, "Summary")?;
    let summary = Summary::evaluate(&selection, &smoke, info.map(|i| i.name));
    write_summary(out, &summary)?;
    writeln!(out, "\n{}", rule())?;
    Ok(summary)
}

fn detection<P: RuntimeProbe, W: Write>(probe: &P, out: &mut W) -> io::Result<Option<AcceleratorInfo>> {
    match probe.primary_info() {
        Ok(info) => {
            if let Some(version) = &info.driver_version { writeln!(out, "CUDA version: {version}")?; }
            writeln!(out, "GPU count: {}", info.device_count)?;
            writeln!(out, "Current GPU: {}", info.current_index)?;
            writeln!(out, "GPU name: {}", info.name)?;
            if let Some(total) = info.total_memory_bytes { writeln!(out, "GPU memory: {:.2} GB", gib(total))?; }
            Ok(Some(info))
        }
        Err(e) => {
            writeln!(out, "⚠️  Could not query CUDA device: {e:#}")?;
            Ok(None)
        }
    }
}

fn memory<P: RuntimeProbe, W: Write>(probe: &P, out: &mut W, heading: &str) -> io::Result<()> {
    match probe.memory_stats() {
        Ok(Some(stats)) => write_memory(out, heading, &stats),
        Ok(None) => Ok(()),
        Err(e) => { warn!("memory query failed: {e:#}"); Ok(()) }
    }
}
