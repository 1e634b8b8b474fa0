//! Application configuration from CLI flags and environment.

use clap::Parser;

use fibdrv_cli::report::ReportFormat;
use fibdrv_core::constants::{DEVICE_NAME, MAX_INDEX};

/// fibdrv-client: read Fibonacci numbers from the single-session device.
#[derive(Parser, Debug)]
#[command(name = "fibdrv-client", version, about)]
pub struct AppConfig {
    /// Highest offset to read; the walk covers 0..=offset and back.
    #[arg(short = 'n', long, default_value_t = 100, env = "FIBDRV_OFFSET")]
    pub offset: u64,

    /// Highest index the device serves; seeks beyond it are clamped.
    #[arg(long, default_value_t = MAX_INDEX, env = "FIBDRV_MAX_INDEX")]
    pub max_index: u64,

    /// Device name under /dev.
    #[arg(long, default_value = DEVICE_NAME)]
    pub device: String,

    /// Collect a per-index timing report instead of the read log.
    #[arg(short, long)]
    pub timing: bool,

    /// Timing report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Output file path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Quiet mode (only output the numbers).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Offset as a seek argument.
    pub fn seek_limit(&self) -> anyhow::Result<i64> {
        i64::try_from(self.offset)
            .map_err(|_| anyhow::anyhow!("offset {} does not fit a seek offset", self.offset))
    }
}
