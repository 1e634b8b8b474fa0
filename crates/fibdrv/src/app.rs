//! Application entry point and dispatch.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use fibdrv_cli::presenter::{CLIResultPresenter, ResultPresenter};
use fibdrv_cli::report::{TimingReport, TimingSample};
use fibdrv_device::{FibDevice, FibFile, SeekOrigin};

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        fibdrv_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(());
    }

    let last = config.seek_limit()?;
    let device = FibDevice::register(config.device.as_str(), config.max_index);
    let path = device.path();
    let mut file = device
        .open()
        .with_context(|| format!("failed to open character device {path}"))?;
    info!(device = %path, offset = config.offset, "attached");

    let out: Box<dyn Write> = match &config.output {
        Some(target) => Box::new(BufWriter::new(
            File::create(target).with_context(|| format!("failed to create {target}"))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut presenter = CLIResultPresenter::new(out, config.quiet);

    if config.timing {
        let report = collect_timing(&mut file, &path, last);
        presenter.present_timing(&report, config.format)?;
    } else {
        run_sequence(&mut file, &path, last, &mut presenter)?;
    }

    presenter.into_inner()?;
    Ok(())
}

/// Query the elapsed time once, then read 0..=last and back down to 0.
fn run_sequence(
    file: &mut FibFile,
    path: &str,
    last: i64,
    presenter: &mut dyn ResultPresenter,
) -> Result<()> {
    let returned = file.write(b"testing writing");
    presenter.present_write(path, returned)?;

    for i in 0..=last {
        let offset = file.llseek(i, SeekOrigin::FromStart);
        let value = file.read();
        presenter.present_read(path, offset, value)?;
    }

    for i in (0..=last).rev() {
        let offset = file.llseek(i, SeekOrigin::FromStart);
        let value = file.read();
        presenter.present_read(path, offset, value)?;
    }
    Ok(())
}

/// Time a read at every offset in 0..=last.
fn collect_timing(file: &mut FibFile, path: &str, last: i64) -> TimingReport {
    let mut report = TimingReport::new(path);
    for i in 0..=last {
        let index = file.llseek(i, SeekOrigin::FromStart);
        let start = Instant::now();
        let value = file.read();
        let user = start.elapsed();
        let kernel_ns = file.write(&[]);

        report.push(TimingSample {
            index,
            value,
            kernel_ns,
            user_ns: u64::try_from(user.as_nanos()).unwrap_or(u64::MAX),
        });
    }
    debug!(samples = report.samples.len(), "timing collected");
    report
}
