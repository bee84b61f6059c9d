//! Console formatting shared by the diagnostic binaries.

use std::io::{self, Write};

use crate::types::{MemoryStats, Summary};

pub const RULE_WIDTH: usize = 60;

pub fn rule() -> String { "=".repeat(RULE_WIDTH) }

pub fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule())
}

/// Banner preceded by a blank line, used between sections.
pub fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    banner(out, title)
}

#[allow(clippy::cast_precision_loss)]
pub fn gib(bytes: u64) -> f64 { bytes as f64 / 1024f64.powi(3) }

#[allow(clippy::cast_precision_loss)]
pub fn mib(bytes: u64) -> f64 { bytes as f64 / 1024f64.powi(2) }

pub fn write_memory<W: Write>(out: &mut W, heading: &str, stats: &MemoryStats) -> io::Result<()> {
    writeln!(out, "\n{heading}:")?;
    writeln!(out, "  used: {:.2} MB", mib(stats.used_bytes()))?;
    writeln!(out, "  free: {:.2} MB", mib(stats.free_bytes))?;
    writeln!(out, "  total: {:.2} MB", mib(stats.total_bytes))
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    match summary {
        Summary::Working { device_name } => {
            writeln!(out, "\n✅ [SUCCESS] CUDA IS WORKING!")?;
            writeln!(out, "  The backend will use your NVIDIA GPU for inference")?;
            if let Some(name) = device_name { writeln!(out, "  GPU: {name}")?; }
            writeln!(out, "  This will be significantly faster than CPU")
        }
        Summary::AcceleratorFaulty { error } => {
            writeln!(out, "\n❌ [FAIL] CUDA was detected but the smoke test failed")?;
            writeln!(out, "  Error: {error}")?;
            writeln!(out, "  Inference on this GPU is likely to fail as well")
        }
        Summary::CpuOnly => {
            writeln!(out, "\n❌ [FAIL] CUDA is not available")?;
            writeln!(out, "  The backend will use CPU for inference")?;
            writeln!(out, "  This will be slower than GPU")
        }
    }
}
