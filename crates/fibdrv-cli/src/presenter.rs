//! Client result presenter.

use std::io::{self, Write};

use tracing::debug;

use crate::output::{read_line, write_line};
use crate::report::{ReportFormat, TimingReport};

/// Trait for presenting device responses to the user.
pub trait ResultPresenter {
    /// Present the value returned by the elapsed-time query.
    fn present_write(&mut self, path: &str, returned: u64) -> io::Result<()>;

    /// Present one read.
    fn present_read(&mut self, path: &str, offset: u64, value: u64) -> io::Result<()>;

    /// Present a timing report.
    fn present_timing(&mut self, report: &TimingReport, format: ReportFormat) -> io::Result<()>;
}

/// Presenter writing the client log lines to any writer.
pub struct CLIResultPresenter<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> CLIResultPresenter<W> {
    #[must_use]
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> ResultPresenter for CLIResultPresenter<W> {
    fn present_write(&mut self, path: &str, returned: u64) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out, "{}", write_line(path, returned))
    }

    fn present_read(&mut self, path: &str, offset: u64, value: u64) -> io::Result<()> {
        if self.quiet {
            return writeln!(self.out, "{value}");
        }
        writeln!(self.out, "{}", read_line(path, offset, value))
    }

    fn present_timing(&mut self, report: &TimingReport, format: ReportFormat) -> io::Result<()> {
        debug!(samples = report.samples.len(), ?format, "presenting timing report");
        report.render(format, &mut self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TimingSample;

    fn captured(quiet: bool, f: impl FnOnce(&mut CLIResultPresenter<Vec<u8>>)) -> String {
        let mut presenter = CLIResultPresenter::new(Vec::new(), quiet);
        f(&mut presenter);
        String::from_utf8(presenter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn presenter_read_normal() {
        let out = captured(false, |p| p.present_read("/dev/fibonacci", 10, 55).unwrap());
        assert_eq!(
            out,
            "Reading from /dev/fibonacci at offset 10, returned the sequence 55.\n"
        );
    }

    #[test]
    fn presenter_read_quiet() {
        let out = captured(true, |p| p.present_read("/dev/fibonacci", 10, 55).unwrap());
        assert_eq!(out, "55\n");
    }

    #[test]
    fn presenter_write_quiet_is_silent() {
        let out = captured(true, |p| p.present_write("/dev/fibonacci", 123).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn presenter_write_normal() {
        let out = captured(false, |p| p.present_write("/dev/fibonacci", 0).unwrap());
        assert_eq!(out, "Writing to /dev/fibonacci, returned the sequence 0\n");
    }

    #[test]
    fn presenter_timing_csv() {
        let mut report = TimingReport::new("/dev/fibonacci");
        report.push(TimingSample {
            index: 2,
            value: 1,
            kernel_ns: 10,
            user_ns: 20,
        });
        let out = captured(false, |p| p.present_timing(&report, ReportFormat::Csv).unwrap());
        assert_eq!(out, "index,value,kernel_ns,user_ns\n2,1,10,20\n");
    }
}
