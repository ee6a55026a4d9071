//! Loop configuration files
//!
//! ```json
//! {
//!   "sample_rate": "ultra_low_power",
//!   "temperature_offset": 2.5,
//!   "save_interval": 288
//! }
//! ```
//!
//! Missing fields take their defaults. The result is validated before it is
//! returned.

use std::fs;
use std::path::Path;

use aircycle_core::LoopConfig;

use crate::error::HostError;

/// Parse and validate a JSON loop configuration
pub fn parse_loop_config(json: &str) -> Result<LoopConfig, HostError> {
    let config: LoopConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a JSON loop configuration file
pub fn load_loop_config(path: impl AsRef<Path>) -> Result<LoopConfig, HostError> {
    let text = fs::read_to_string(path)?;
    parse_loop_config(&text)
}
