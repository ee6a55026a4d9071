//! Output subscription
//!
//! Tells the engine which derived outputs the loop consumes and at which
//! cadence. The set is fixed and independent of the cadence; only the rate
//! changes between ultra-low-power and low-power operation.
//!
//! The engine answers with the physical inputs it will need. The loop does
//! not act on that answer: per-cycle acquisition settings come from
//! [`FusionEngine::sensor_control`] instead.

use crate::constants::NUM_REQUESTED_OUTPUTS;
use crate::errors::EngineError;
use crate::settings::{RequiredSettings, SampleRate, SensorRequest};
use crate::signals::VirtualSensor;
use crate::traits::FusionEngine;

/// Outputs the rest of the loop understands, in request order
pub const REQUESTED_OUTPUTS: [VirtualSensor; NUM_REQUESTED_OUTPUTS] = [
    VirtualSensor::Iaq,
    VirtualSensor::StaticIaq,
    VirtualSensor::HeatCompensatedTemperature,
    VirtualSensor::HeatCompensatedHumidity,
    VirtualSensor::RawPressure,
    VirtualSensor::BreathVocEquivalent,
    VirtualSensor::Co2Equivalent,
    VirtualSensor::CompensatedGas,
    VirtualSensor::RawGas,
    VirtualSensor::GasPercentage,
];

/// Subscription requests for `rate`
pub fn requested_outputs(rate: SampleRate) -> [SensorRequest; NUM_REQUESTED_OUTPUTS] {
    REQUESTED_OUTPUTS.map(|sensor| SensorRequest {
        sensor,
        sample_rate_hz: rate.hz(),
    })
}

/// Subscribe the engine to the fixed output set at `rate`
pub fn configure_outputs<E>(engine: &mut E, rate: SampleRate) -> Result<(), EngineError>
where
    E: FusionEngine + ?Sized,
{
    let requested = requested_outputs(rate);
    let mut required = RequiredSettings::new();

    engine.update_subscription(&requested, &mut required)?;

    log_debug!(
        "subscribed {} outputs at {} Hz, engine needs {} physical inputs",
        requested.len(),
        rate.hz(),
        required.len()
    );
    Ok(())
}
