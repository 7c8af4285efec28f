// ⚙️ Settings - command line with environment fallbacks

use crate::formatter::ExportStyle;
use crate::household::IdStrategy;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "household", version, about = "Build a household list, one member at a time")]
pub struct Settings {
    /// How member ids are generated
    #[arg(long, env = "HOUSEHOLD_ID_STRATEGY", value_enum, default_value_t = IdStrategy::Sequential)]
    pub id_strategy: IdStrategy,

    /// Layout of the exported household text
    #[arg(long, env = "HOUSEHOLD_EXPORT_STYLE", value_enum, default_value_t = ExportStyle::Json)]
    pub export_style: ExportStyle,

    /// Write logs to this file (the terminal belongs to the form)
    #[arg(long, env = "HOUSEHOLD_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "info" or "household_builder=debug"
    #[arg(long, env = "HOUSEHOLD_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            id_strategy: IdStrategy::default(),
            export_style: ExportStyle::default(),
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

/// Install the global subscriber. Without a log file nothing is installed.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter {:?}", settings.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
