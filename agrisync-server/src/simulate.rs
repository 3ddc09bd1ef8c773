use rand::Rng;
use time::OffsetDateTime;

use agrisync_api::SensorReading;

pub const TEMPERATURE_MIN: i32 = 70;
pub const TEMPERATURE_MAX: i32 = 90;
pub const HUMIDITY_MIN: i32 = 40;
pub const HUMIDITY_MAX: i32 = 80;
pub const WATER_LEVEL_MIN: f64 = 1.0;
pub const WATER_LEVEL_MAX: f64 = 10.0;
pub const WATER_LEVEL_STEP: f64 = 0.1;

/// Simulated outside temperature in Fahrenheit, whole degrees.
pub fn temperature(rng: &mut impl Rng) -> f64 {
    rng.random_range(TEMPERATURE_MIN..TEMPERATURE_MAX) as f64
}

/// Simulated relative humidity %, whole percent.
pub fn humidity(rng: &mut impl Rng) -> f64 {
    rng.random_range(HUMIDITY_MIN..HUMIDITY_MAX) as f64
}

/// Random-walk the tank level by one step, clamped to the gauge range.
pub fn step_water_level(rng: &mut impl Rng, current: f64) -> f64 {
    let delta = if rng.random_bool(0.5) {
        WATER_LEVEL_STEP
    } else {
        -WATER_LEVEL_STEP
    };

    (current + delta).clamp(WATER_LEVEL_MIN, WATER_LEVEL_MAX)
}

/// Synthesize the next reading from the live dashboard values.
pub fn next_reading(water_level: f64, drip: bool, sprinkler: bool) -> SensorReading {
    let mut rng = rand::rng();

    SensorReading {
        timestamp: OffsetDateTime::now_utc(),
        temperature: temperature(&mut rng),
        humidity: humidity(&mut rng),
        water_level: step_water_level(&mut rng, water_level),
        drip,
        sprinkler,
    }
}
