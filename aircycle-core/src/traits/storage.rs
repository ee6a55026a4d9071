//! Durable Storage and Output Callbacks
//!
//! Blob I/O follows a "length zero means nothing stored" convention: a load
//! that finds nothing is not an error, it just yields an empty blob.

use crate::demux::AirQualityReport;
use crate::errors::StorageError;

/// Persistent home of the engine's adaptive state
pub trait StateStore {
    /// Copy the stored blob into `buf` and return its length (0 = none)
    fn load_state(&mut self, buf: &mut [u8]) -> usize;

    /// Persist `blob`, replacing what was stored
    fn save_state(&mut self, blob: &[u8]) -> Result<(), StorageError>;
}

/// Source of the engine configuration blob
pub trait ConfigSource {
    /// Copy the configuration into `buf` and return its length (0 = use defaults)
    fn load_config(&mut self, buf: &mut [u8]) -> usize;
}

/// Receiver of one report per processed batch
pub trait OutputSink {
    /// Called exactly once for every non-empty input batch
    fn output_ready(&mut self, report: &AirQualityReport);
}

impl<T: StateStore + ?Sized> StateStore for &mut T {
    fn load_state(&mut self, buf: &mut [u8]) -> usize {
        (**self).load_state(buf)
    }

    fn save_state(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        (**self).save_state(blob)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &mut T {
    fn load_config(&mut self, buf: &mut [u8]) -> usize {
        (**self).load_config(buf)
    }
}

impl<F: FnMut(&AirQualityReport)> OutputSink for F {
    fn output_ready(&mut self, report: &AirQualityReport) {
        self(report)
    }
}
