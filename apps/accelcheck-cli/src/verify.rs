use std::io::{self, Write};

use accelcheck_core::traits::RuntimeProbe;

/// Short availability check. Probe failures are printed; only write failures are returned.
pub fn run<P: RuntimeProbe, W: Write>(probe: &P, out: &mut W) -> io::Result<()> {
    match report(probe, out) {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast::<io::Error>() {
            Ok(write_err) => Err(write_err),
            Err(e) => writeln!(out, "An error occurred: {e:#}"),
        },
    }
}

fn report<P: RuntimeProbe, W: Write>(probe: &P, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Runtime version: {}", probe.runtime_version())?;
    writeln!(out, "CUDA available: {}", probe.primary_available())?;
    if probe.primary_available() {
        let info = probe.primary_info()?;
        writeln!(out, "CUDA device: {}", info.name)?;
        writeln!(out, "CUDA device count: {}", info.device_count)?;
        writeln!(out, "Current device: {}", info.current_index)?;
    } else {
        writeln!(out, "CUDA is NOT available.")?;
    }
    Ok(())
}
