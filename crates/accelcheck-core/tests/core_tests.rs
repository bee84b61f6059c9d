use std::cell::Cell;
use std::fs;

use tempfile::TempDir;

use accelcheck_core::config::{Config, Settings};
use accelcheck_core::report::{banner, write_summary, RULE_WIDTH};
use accelcheck_core::traits::AcceleratorAvailability;
use accelcheck_core::types::SmokeReport;
use accelcheck_core::{select_device, Availability, DeviceKind, DeviceSelection, Precision, Summary};

struct CountingProbe { primary: bool, secondary: bool, calls: Cell<usize> }

impl AcceleratorAvailability for CountingProbe {
    fn primary_available(&self) -> bool { self.calls.set(self.calls.get() + 1); self.primary }
    fn secondary_available(&self) -> bool { self.secondary }
}

fn smoke_ok() -> SmokeReport {
    SmokeReport { device: "cuda:0".to_string(), dtype: "f32".to_string(), dims: vec![4, 4], checksum: 1.0 }
}

#[test]
fn primary_wins_regardless_of_secondary() {
    for secondary in [false, true] {
        let sel = select_device(&Availability { primary: true, secondary });
        assert_eq!(sel.device_kind(), DeviceKind::AcceleratorPrimary);
        assert_eq!(sel.precision(), Precision::Reduced);
    }
}

#[test]
fn secondary_only_falls_back_to_cpu() {
    let sel = select_device(&Availability { primary: false, secondary: true });
    assert_eq!(sel, DeviceSelection::cpu());
    assert_eq!(sel.precision(), Precision::Full);
}

#[test]
fn nothing_available_is_cpu() {
    let sel = select_device(&Availability { primary: false, secondary: false });
    assert_eq!(sel.device_kind(), DeviceKind::Cpu);
    assert_eq!(sel.precision(), Precision::Full);
}

#[test]
fn selection_is_idempotent() {
    let probe = CountingProbe { primary: false, secondary: true, calls: Cell::new(0) };
    let first = select_device(&probe);
    let second = select_device(&probe);
    assert_eq!(first, second);
    assert_eq!(probe.calls.get(), 2, "each selection queries the probe once");
}

#[test]
fn reduced_precision_only_on_accelerators() {
    assert_eq!(DeviceSelection::on(DeviceKind::Cpu).precision(), Precision::Full);
    assert_eq!(DeviceSelection::on(DeviceKind::AcceleratorSecondary).precision(), Precision::Reduced);
    assert_eq!(DeviceKind::AcceleratorPrimary.label(), "cuda");
    assert_eq!(Precision::Reduced.to_string(), "bf16");
}

#[test]
fn summary_follows_smoke_outcome() {
    let primary = DeviceSelection::on(DeviceKind::AcceleratorPrimary);
    let ok = Summary::evaluate(&primary, &Ok(smoke_ok()), Some("RTX".to_string()));
    assert!(ok.is_success());

    let failed = Summary::evaluate(&primary, &Err("out of memory".to_string()), None);
    assert_eq!(failed, Summary::AcceleratorFaulty { error: "out of memory".to_string() });
    assert!(!failed.is_success());

    let cpu = Summary::evaluate(&DeviceSelection::cpu(), &Ok(smoke_ok()), None);
    assert_eq!(cpu, Summary::CpuOnly);
}

#[test]
fn faulty_summary_does_not_claim_success() {
    let mut out = Vec::new();
    write_summary(&mut out, &Summary::AcceleratorFaulty { error: "boom".to_string() }).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("CUDA IS WORKING"));
    assert!(text.contains("boom"));
}

#[test]
fn banner_is_framed_by_rules() {
    let mut out = Vec::new();
    banner(&mut out, "Summary").unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].len(), RULE_WIDTH);
    assert_eq!(lines[1], "Summary");
}

#[test]
fn config_defaults_without_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path(), "dev").expect("load");
    assert_eq!(config.settings().unwrap(), Settings::default());
    assert_eq!(config.get::<usize>("smoke.matrix_size").unwrap(), 1000);
}

#[test]
fn env_file_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[smoke]\nmatrix_size = 64\n[device]\nordinal = 1\n").unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[smoke]\nmatrix_size = 8\n").unwrap();

    let settings = Config::load_from(tmp.path(), "test").unwrap().settings().unwrap();
    assert_eq!(settings.smoke.matrix_size, 8);
    assert_eq!(settings.device.ordinal, 1);
    assert_eq!(settings.log.filter, "warn");
}

#[test]
fn zero_matrix_size_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[smoke]\nmatrix_size = 0\n").unwrap();
    let err = Config::load_from(tmp.path(), "dev").err().expect("invalid config");
    assert!(err.to_string().contains("matrix_size"), "err={err}");
}

#[test]
fn env_layer_overrides_files_with_nested_keys() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[smoke]\nmatrix_size = 64\n").unwrap();
    // Prefix unique to this test so parallel tests never see these variables.
    std::env::set_var("ACCELCHECK_ENVTEST_SMOKE__MATRIX_SIZE", "256");
    std::env::set_var("ACCELCHECK_ENVTEST_LOG__FILTER", "debug");

    let settings = Config::load_with_env(tmp.path(), "dev", "ACCELCHECK_ENVTEST_").unwrap().settings().unwrap();
    assert_eq!(settings.smoke.matrix_size, 256);
    assert_eq!(settings.log.filter, "debug");
    assert_eq!(settings.device.ordinal, 0);
}

#[test]
fn env_layer_is_validated() {
    let tmp = TempDir::new().unwrap();
    std::env::set_var("ACCELCHECK_ZEROTEST_SMOKE__MATRIX_SIZE", "0");
    assert!(Config::load_with_env(tmp.path(), "dev", "ACCELCHECK_ZEROTEST_").is_err());
}
