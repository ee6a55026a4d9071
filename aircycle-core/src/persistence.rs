//! Engine state persistence
//!
//! ## Startup
//!
//! Configuration first, then state. Either blob may be absent: a load that
//! returns zero bytes means "nothing stored" and the engine keeps what `init`
//! gave it. A blob that is present but rejected by the engine is fatal.
//!
//! ## Periodic Save
//!
//! [`StatePersistence`] counts processed cycles. Once the count reaches the
//! save interval it snapshots the engine state and hands it to the store,
//! then starts counting again from zero whether or not the write succeeded.
//! A failed write is not retried; the next interval boundary is the retry.

use crate::constants::{MAX_PROPERTY_BLOB_SIZE, MAX_STATE_BLOB_SIZE};
use crate::errors::{EngineError, StorageError};
use crate::traits::{ConfigSource, FusionEngine, StateStore};

/// Scratch buffer for a state snapshot
pub type StateBuffer = [u8; MAX_STATE_BLOB_SIZE];

/// Scratch buffer for a configuration blob
pub type ConfigBuffer = [u8; MAX_PROPERTY_BLOB_SIZE];

/// Configuration source with nothing stored; the engine keeps its defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfig;

impl ConfigSource for NoConfig {
    fn load_config(&mut self, _buf: &mut [u8]) -> usize {
        0
    }
}

/// State store that never has state and discards saves
#[derive(Debug, Clone, Copy, Default)]
pub struct NoState;

impl StateStore for NoState {
    fn load_state(&mut self, _buf: &mut [u8]) -> usize {
        0
    }

    fn save_state(&mut self, _blob: &[u8]) -> Result<(), StorageError> {
        Ok(())
    }
}

/// What a restore step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restored {
    /// Nothing stored, engine untouched
    Nothing,
    /// Engine accepted a blob of this many bytes
    Applied(usize),
}

/// Load a configuration blob and apply it if one was stored
pub fn restore_configuration<E, C>(engine: &mut E, source: &mut C) -> Result<Restored, EngineError>
where
    E: FusionEngine + ?Sized,
    C: ConfigSource + ?Sized,
{
    let mut buf: ConfigBuffer = [0; MAX_PROPERTY_BLOB_SIZE];
    let len = source.load_config(&mut buf);
    apply(&buf, len, |blob| engine.set_configuration(blob))
}

/// Load a state blob and apply it if one was stored
pub fn restore_state<E, S>(engine: &mut E, store: &mut S) -> Result<Restored, EngineError>
where
    E: FusionEngine + ?Sized,
    S: StateStore + ?Sized,
{
    let mut buf: StateBuffer = [0; MAX_STATE_BLOB_SIZE];
    let len = store.load_state(&mut buf);
    apply(&buf, len, |blob| engine.set_state(blob))
}

fn apply<F>(buf: &[u8], len: usize, set: F) -> Result<Restored, EngineError>
where
    F: FnOnce(&[u8]) -> Result<(), EngineError>,
{
    if len == 0 {
        return Ok(Restored::Nothing);
    }
    let blob = buf.get(..len).ok_or(EngineError::BlobTooLarge {
        len,
        max: buf.len(),
    })?;
    set(blob)?;
    Ok(Restored::Applied(len))
}

/// Result of a save check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Counter below the interval
    NotDue,
    /// Snapshot of `len` bytes written
    Saved {
        /// Snapshot length
        len: usize,
    },
    /// Engine could not produce a snapshot; nothing written
    EngineFailed(EngineError),
    /// Store rejected the snapshot
    StoreFailed(StorageError),
}

/// Sample counter driving periodic state saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatePersistence {
    interval: u32,
    counter: u32,
}

impl StatePersistence {
    /// Save every `interval` samples (at least one)
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            counter: 0,
        }
    }

    /// Samples since the last save
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Samples between saves
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Count one processed sample, then save if due
    pub fn tick<E, S>(&mut self, engine: &mut E, store: &mut S) -> SaveOutcome
    where
        E: FusionEngine + ?Sized,
        S: StateStore + ?Sized,
    {
        self.counter = self.counter.saturating_add(1);
        self.maybe_save(engine, store)
    }

    /// Save regardless of the counter and start a new interval
    pub fn save_now<E, S>(&mut self, engine: &mut E, store: &mut S) -> SaveOutcome
    where
        E: FusionEngine + ?Sized,
        S: StateStore + ?Sized,
    {
        self.counter = 0;
        save_now(engine, store)
    }

    /// Save and reset the counter once it reached the interval
    pub fn maybe_save<E, S>(&mut self, engine: &mut E, store: &mut S) -> SaveOutcome
    where
        E: FusionEngine + ?Sized,
        S: StateStore + ?Sized,
    {
        if self.counter < self.interval {
            return SaveOutcome::NotDue;
        }
        let outcome = self.save_now(engine, store);
        match outcome {
            SaveOutcome::Saved { len } => log_debug!("saved {} bytes of engine state", len),
            SaveOutcome::EngineFailed(e) => log_warn!("engine state snapshot failed: {}", e),
            SaveOutcome::StoreFailed(e) => log_warn!("engine state not saved: {}", e),
            SaveOutcome::NotDue => {}
        }
        outcome
    }
}

/// Snapshot the engine state and write it, ignoring the counter
pub fn save_now<E, S>(engine: &mut E, store: &mut S) -> SaveOutcome
where
    E: FusionEngine + ?Sized,
    S: StateStore + ?Sized,
{
    let mut buf: StateBuffer = [0; MAX_STATE_BLOB_SIZE];
    let len = match engine.get_state(&mut buf) {
        Ok(len) => len,
        Err(e) => return SaveOutcome::EngineFailed(e),
    };
    // A clipped snapshot would be rejected on the next restore
    let Some(blob) = buf.get(..len) else {
        return SaveOutcome::EngineFailed(EngineError::BlobTooLarge { len, max: buf.len() });
    };

    match store.save_state(blob) {
        Ok(()) => SaveOutcome::Saved { len },
        Err(e) => SaveOutcome::StoreFailed(e),
    }
}
