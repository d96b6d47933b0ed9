//! Unit conversions for displayed weather values.
//!
//! Weather data arrives in SI units (kelvin, metres per second, metres).  The
//! functions here turn those raw values into what the user asked for via the
//! [`TemperatureUnit`] and [`DistanceSpeedUnit`] preferences.
//!
//! Integer temperatures are rounded to the nearest integer (half away from
//! zero), which is what the badge displays.

use super::option::{DistanceSpeedUnit, TemperatureUnit};

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 459.67;
const KMH_PER_MPS: f64 = 3.6;
const MPH_PER_MPS: f64 = 2.236_936;
const METRES_PER_KILOMETRE: f64 = 1000.0;
const METRES_PER_MILE: f64 = 1609.344;

/// Converts a kelvin reading into `unit` without rounding.
pub fn temperature_value(unit: TemperatureUnit, kelvin: f64) -> f64 {
    match unit {
        TemperatureUnit::Celsius => kelvin - KELVIN_OFFSET,
        TemperatureUnit::Fahrenheit => kelvin * 9.0 / 5.0 - FAHRENHEIT_OFFSET,
        TemperatureUnit::Kelvin => kelvin,
    }
}

/// Converts a kelvin reading into `unit`, rounded to the nearest integer.
///
/// Returns `None` for non-finite input or results outside the `i32` range.
pub fn temperature_int_value(unit: TemperatureUnit, kelvin: f64) -> Option<i32> {
    if !kelvin.is_finite() {
        return None;
    }
    let rounded = temperature_value(unit, kelvin).round();
    if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return None;
    }
    Some(rounded as i32)
}

/// Formats a kelvin reading for display, e.g. `"3°C"` or `"276 K"`.
pub fn temperature_descriptor(unit: TemperatureUnit, kelvin: f64) -> Option<String> {
    let value = temperature_int_value(unit, kelvin)?;
    Some(match unit {
        TemperatureUnit::Kelvin => format!("{value} {}", unit.abbreviation()),
        _ => format!("{value}{}", unit.abbreviation()),
    })
}

/// Formats a wind speed given in metres per second, e.g. `"36.0 km/h"`.
pub fn windspeed_descriptor(unit: DistanceSpeedUnit, metres_per_second: f64) -> String {
    let speed = match unit {
        DistanceSpeedUnit::Kilometres => metres_per_second * KMH_PER_MPS,
        DistanceSpeedUnit::Miles => metres_per_second * MPH_PER_MPS,
    };
    format!("{speed:.1} {}", unit.speed_abbreviation())
}

/// Formats a distance given in metres, e.g. `"1.5 km"`.
pub fn distance_descriptor(unit: DistanceSpeedUnit, metres: f64) -> String {
    let distance = match unit {
        DistanceSpeedUnit::Kilometres => metres / METRES_PER_KILOMETRE,
        DistanceSpeedUnit::Miles => metres / METRES_PER_MILE,
    };
    format!("{distance:.1} {}", unit.distance_abbreviation())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_KELVIN: f64 = 275.7;

    #[test]
    fn test_integer_temperature_conversion_rounds_to_nearest() {
        assert_eq!(temperature_int_value(TemperatureUnit::Celsius, RAW_KELVIN), Some(3));
        assert_eq!(temperature_int_value(TemperatureUnit::Fahrenheit, RAW_KELVIN), Some(37));
        assert_eq!(temperature_int_value(TemperatureUnit::Kelvin, RAW_KELVIN), Some(276));
    }

    #[test]
    fn test_freezing_point_converts_exactly() {
        assert_eq!(temperature_int_value(TemperatureUnit::Celsius, 273.15), Some(0));
        assert_eq!(temperature_int_value(TemperatureUnit::Fahrenheit, 273.15), Some(32));
    }

    #[test]
    fn test_below_zero_temperatures_round_to_nearest() {
        // 263.15 K = -10 °C; 262.45 K = -10.7 °C
        assert_eq!(temperature_int_value(TemperatureUnit::Celsius, 263.15), Some(-10));
        assert_eq!(temperature_int_value(TemperatureUnit::Celsius, 262.45), Some(-11));
    }

    #[test]
    fn test_non_finite_temperature_yields_none() {
        assert_eq!(temperature_int_value(TemperatureUnit::Celsius, f64::NAN), None);
        assert_eq!(temperature_int_value(TemperatureUnit::Kelvin, f64::INFINITY), None);
        assert_eq!(temperature_descriptor(TemperatureUnit::Kelvin, f64::NAN), None);
    }

    #[test]
    fn test_temperature_descriptor_appends_abbreviation() {
        assert_eq!(
            temperature_descriptor(TemperatureUnit::Celsius, RAW_KELVIN).as_deref(),
            Some("3°C")
        );
        assert_eq!(
            temperature_descriptor(TemperatureUnit::Fahrenheit, RAW_KELVIN).as_deref(),
            Some("37°F")
        );
        assert_eq!(
            temperature_descriptor(TemperatureUnit::Kelvin, RAW_KELVIN).as_deref(),
            Some("276 K")
        );
    }

    #[test]
    fn test_windspeed_descriptor_per_unit() {
        assert_eq!(windspeed_descriptor(DistanceSpeedUnit::Kilometres, 10.0), "36.0 km/h");
        assert_eq!(windspeed_descriptor(DistanceSpeedUnit::Miles, 10.0), "22.4 mph");
    }

    #[test]
    fn test_distance_descriptor_per_unit() {
        assert_eq!(distance_descriptor(DistanceSpeedUnit::Kilometres, 1500.0), "1.5 km");
        assert_eq!(distance_descriptor(DistanceSpeedUnit::Miles, 1500.0), "0.9 mi");
    }
}
