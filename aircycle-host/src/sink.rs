//! Report sinks
//!
//! Both sinks swallow their own failures: the loop has no way to act on a
//! sink error and must keep measuring.

use std::io::Write;

use aircycle_core::traits::OutputSink;
use aircycle_core::AirQualityReport;

/// Logs every report at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn output_ready(&mut self, report: &AirQualityReport) {
        log::info!(
            "t={}ns iaq={:.1} ({:?}, {:?}) co2={:.0}ppm bvoc={:.2}ppm T={:.2}C RH={:.2}% p={:.0}Pa gas={:.0}Ohm status={}",
            report.timestamp_ns,
            report.iaq,
            report.iaq_accuracy,
            report.iaq_level(),
            report.co2_equivalent,
            report.breath_voc_equivalent,
            report.heat_compensated_temperature,
            report.heat_compensated_humidity,
            report.raw_pressure,
            report.raw_gas,
            report.engine_status
        );
    }
}

/// Writes each report as one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
    failed: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            failed: 0,
        }
    }

    /// Reports written successfully
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Reports lost to serialization or I/O errors
    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_report(&mut self, report: &AirQualityReport) -> Result<(), crate::HostError> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputSink for JsonLinesSink<W> {
    fn output_ready(&mut self, report: &AirQualityReport) {
        match self.write_report(report) {
            Ok(()) => self.written += 1,
            Err(e) => {
                self.failed += 1;
                log::warn!("dropping report at {}ns: {}", report.timestamp_ns, e);
            }
        }
    }
}
