//! Per-index timing reports.
//!
//! Each sample pairs the time the device spent computing (as returned by
//! the elapsed-time query) with the wall time the client observed around
//! the read. The difference is the request overhead.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::output::{format_duration, format_number};

/// Output format for a [`TimingReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Aligned table with a summary line.
    #[default]
    Text,
    /// `index,value,kernel_ns,user_ns` rows with a header.
    Csv,
    /// Pretty-printed JSON document.
    Json,
}

/// One timed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSample {
    /// Cursor the read was served at.
    pub index: u64,
    /// Low 64 bits of F(index).
    pub value: u64,
    /// Nanoseconds the device reported for the computation.
    pub kernel_ns: u64,
    /// Nanoseconds the client measured around the read.
    pub user_ns: u64,
}

impl TimingSample {
    /// Client-side overhead: wall time not spent computing.
    #[must_use]
    pub fn overhead_ns(&self) -> u64 {
        self.user_ns.saturating_sub(self.kernel_ns)
    }
}

/// Timing samples collected against one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Device node path.
    pub device: String,
    /// Samples in the order they were taken.
    pub samples: Vec<TimingSample>,
}

impl TimingReport {
    /// Empty report for `device`.
    #[must_use]
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            samples: Vec::new(),
        }
    }

    /// Append a sample.
    pub fn push(&mut self, sample: TimingSample) {
        self.samples.push(sample);
    }

    /// Mean device-side time, `None` for an empty report.
    #[must_use]
    pub fn mean_kernel(&self) -> Option<Duration> {
        let count = u64::try_from(self.samples.len()).ok().filter(|&n| n > 0)?;
        let total: u128 = self.samples.iter().map(|s| u128::from(s.kernel_ns)).sum();
        let mean = u64::try_from(total / u128::from(count)).unwrap_or(u64::MAX);
        Some(Duration::from_nanos(mean))
    }

    /// Slowest device-side sample.
    #[must_use]
    pub fn slowest(&self) -> Option<&TimingSample> {
        self.samples.iter().max_by_key(|s| s.kernel_ns)
    }

    /// Render the report in `format`.
    pub fn render(&self, format: ReportFormat, out: &mut dyn Write) -> io::Result<()> {
        match format {
            ReportFormat::Text => self.render_text(out),
            ReportFormat::Csv => self.render_csv(out),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
        }
    }

    fn render_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Timing report for {}", self.device)?;
        writeln!(out, "{:-<72}", "")?;
        writeln!(
            out,
            "{:>6}  {:>26}  {:>16}  {:>16}",
            "index", "value", "kernel", "user"
        )?;
        for s in &self.samples {
            writeln!(
                out,
                "{:>6}  {:>26}  {:>16}  {:>16}",
                s.index,
                format_number(s.value),
                format_duration(Duration::from_nanos(s.kernel_ns)),
                format_duration(Duration::from_nanos(s.user_ns)),
            )?;
        }
        if let (Some(mean), Some(slowest)) = (self.mean_kernel(), self.slowest()) {
            writeln!(out, "{:-<72}", "")?;
            writeln!(
                out,
                "{} samples, mean kernel {}, slowest F({}) in {}",
                self.samples.len(),
                format_duration(mean),
                slowest.index,
                format_duration(Duration::from_nanos(slowest.kernel_ns)),
            )?;
        }
        Ok(())
    }

    fn render_csv(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "index,value,kernel_ns,user_ns")?;
        for s in &self.samples {
            writeln!(out, "{},{},{},{}", s.index, s.value, s.kernel_ns, s.user_ns)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> TimingReport {
        let mut report = TimingReport::new("/dev/fibonacci");
        report.push(TimingSample {
            index: 0,
            value: 0,
            kernel_ns: 100,
            user_ns: 900,
        });
        report.push(TimingSample {
            index: 10,
            value: 55,
            kernel_ns: 300,
            user_ns: 1200,
        });
        report
    }

    fn render_string(report: &TimingReport, format: ReportFormat) -> String {
        let mut buf = Vec::new();
        report.render(format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn mean_and_slowest() {
        let report = sample_report();
        assert_eq!(report.mean_kernel(), Some(Duration::from_nanos(200)));
        assert_eq!(report.slowest().map(|s| s.index), Some(10));
    }

    #[test]
    fn empty_report_has_no_summary() {
        let report = TimingReport::new("/dev/fibonacci");
        assert_eq!(report.mean_kernel(), None);
        let text = render_string(&report, ReportFormat::Text);
        assert!(!text.contains("samples"));
    }

    #[test]
    fn csv_rows() {
        let csv = render_string(&sample_report(), ReportFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "index,value,kernel_ns,user_ns");
        assert_eq!(lines[2], "10,55,300,1200");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_parses_back() {
        let report = sample_report();
        let json = render_string(&report, ReportFormat::Json);
        let parsed: TimingReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn text_has_summary() {
        let text = render_string(&sample_report(), ReportFormat::Text);
        assert!(text.contains("Timing report for /dev/fibonacci"));
        assert!(text.contains("2 samples"));
        assert!(text.contains("slowest F(10)"));
    }

    #[test]
    fn overhead_saturates() {
        let s = TimingSample {
            index: 1,
            value: 1,
            kernel_ns: 50,
            user_ns: 20,
        };
        assert_eq!(s.overhead_ns(), 0);
    }
}
