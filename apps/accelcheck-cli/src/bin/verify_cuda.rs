use accelcheck_candle::CandleRuntime;
use accelcheck_cli::{init_logging, load_settings, verify};

fn main() {
    let settings = load_settings();
    init_logging(&settings);
    let runtime = CandleRuntime::detect(settings.device.ordinal);
    let stdout = std::io::stdout();
    if let Err(e) = verify::run(&runtime, &mut stdout.lock()) { eprintln!("Failed to write report: {}", e); }
}
