//! Temperature reading and unit conversion.

/// Offset between Celsius and Kelvin.
const KELVIN_OFFSET: f64 = 273.15;
/// Decimal places kept on every converted value.
const PRECISION_FACTOR: f64 = 100.0;

/// Current temperature expressed in three scales.
///
/// ## Invariants
/// - Every field is rounded to two decimal places.
/// - `fahrenheit` and `kelvin` are derived from `celsius` by [`convert`] and
///   never set independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    celsius: f64,
    fahrenheit: f64,
    kelvin: f64,
}

impl TemperatureReading {
    /// Degrees Celsius.
    pub const fn celsius(&self) -> f64 {
        self.celsius
    }

    /// Degrees Fahrenheit.
    pub const fn fahrenheit(&self) -> f64 {
        self.fahrenheit
    }

    /// Kelvin.
    pub const fn kelvin(&self) -> f64 {
        self.kelvin
    }
}

/// Convert a Celsius reading into all three scales.
///
/// # Examples
/// ```
/// use cep_weather::domain::convert;
///
/// let reading = convert(25.0);
/// assert_eq!(reading.fahrenheit(), 77.0);
/// assert_eq!(reading.kelvin(), 298.15);
/// ```
pub fn convert(celsius: f64) -> TemperatureReading {
    TemperatureReading {
        celsius: round_half_up(celsius),
        fahrenheit: round_half_up(celsius * 1.8 + 32.0),
        kelvin: round_half_up(celsius + KELVIN_OFFSET),
    }
}

/// Round to two decimal places, ties toward positive infinity.
///
/// Uses `floor` rather than truncation so negative values round the same way
/// as positive ones (`-40.0` stays `-40.0`).
fn round_half_up(value: f64) -> f64 {
    (value * PRECISION_FACTOR + 0.5).floor() / PRECISION_FACTOR
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-40.0, -40.0, 233.15)]
    #[case(0.0, 32.0, 273.15)]
    #[case(25.5, 77.9, 298.65)]
    #[case(100.0, 212.0, 373.15)]
    #[case(25.0, 77.0, 298.15)]
    fn converts_representative_values(
        #[case] celsius: f64,
        #[case] fahrenheit: f64,
        #[case] kelvin: f64,
    ) {
        let reading = convert(celsius);
        assert_eq!(reading.celsius(), celsius);
        assert_eq!(reading.fahrenheit(), fahrenheit);
        assert_eq!(reading.kelvin(), kelvin);
    }

    #[rstest]
    #[case(0.125, 0.13)]
    #[case(2.344, 2.34)]
    #[case(-2.344, -2.34)]
    #[case(-0.126, -0.13)]
    #[case(-0.125, -0.12)]
    fn rounds_to_two_places_half_up(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_half_up(value), expected);
    }

    #[test]
    fn negative_whole_values_are_not_nudged() {
        let reading = convert(-10.0);
        assert_eq!(reading.celsius(), -10.0);
        assert_eq!(reading.fahrenheit(), 14.0);
        assert_eq!(reading.kelvin(), 263.15);
    }
}
