// SPDX-License-Identifier: MPL-2.0
use iced_toasts::app::{self, Flags};
use iced_toasts::config::{self, Config};
use iced_toasts::ui::notifications::{Position, ToastManager};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
iced_toasts - toast notification demo

USAGE:
  iced_toasts [OPTIONS]

OPTIONS:
  --config-dir <DIR>   Directory holding settings.toml
  --position <ANCHOR>  Default anchor (top-left, top-center, top-right,
                       bottom-left, bottom-center, bottom-right)
  --log <FILTER>       Tracing filter, e.g. `debug` or `iced_toasts=trace`
  -h, --help           Print this help
";

struct Args {
    config_dir: Option<String>,
    position: Option<Position>,
    log: Option<String>,
}

fn parse_args(mut args: pico_args::Arguments) -> Result<Args, pico_args::Error> {
    let parsed = Args {
        config_dir: args.opt_value_from_str("--config-dir")?,
        position: args.opt_value_from_str("--position")?,
        log: args.opt_value_from_str("--log")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {remaining:?}"),
        });
    }
    Ok(parsed)
}

/// Installs the global subscriber. `RUST_LOG` wins over `--log`, which wins
/// over the configured level.
fn init_logging(cli_filter: Option<&str>, config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = cli_filter
            .or(config.general.log_level.as_deref())
            .unwrap_or(config::DEFAULT_LOG_LEVEL);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let args = match parse_args(pargs) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let (config, config_warning) = config::load_with_override(args.config_dir.map(PathBuf::from));
    init_logging(args.log.as_deref(), &config);
    if let Some(warning) = &config_warning {
        warn!("{warning}");
    }

    let mut toast_config = config.toast_config();
    if let Some(position) = args.position {
        toast_config.position = position;
    }

    // Timers and pending operations run on this runtime; it must outlive the
    // window.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(iced::Error::ExecutorCreationFailed)?;
    let manager = ToastManager::with_runtime(toast_config.clone(), runtime.handle().clone());
    info!(position = %toast_config.position, "starting demo");

    let result = app::run(Flags {
        manager,
        theme_mode: config.general.theme_mode,
        position: toast_config.position,
        config_warning,
    });

    runtime.shutdown_background();
    result
}
