use std::process::ExitCode;

use mimalloc::MiMalloc;
use platform::PlatformConfig;
use range_slider::RangeConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// `ranger [min] [max] [step]`, read with the same rules as the slider's
/// markup attributes.
fn range_from_args() -> Result<RangeConfig, range_slider::RangeConfigError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize, default: &'static str| -> String {
        args.get(i).cloned().unwrap_or_else(|| default.to_string())
    };
    let (min, max) = (arg(0, "0"), arg(1, "100"));
    RangeConfig::from_attributes(
        Some(min.as_str()),
        Some(max.as_str()),
        args.get(2).map(String::as_str),
        None,
    )
}

fn main() -> ExitCode {
    env_logger::init();

    let range = match range_from_args() {
        Ok(range) => range,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let config = PlatformConfig {
        range,
        ..PlatformConfig::default()
    };

    match platform::run_with_config(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
