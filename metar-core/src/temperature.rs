use serde::Deserialize;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A physical temperature, stored canonically in degrees Celsius.
///
/// The Fahrenheit accessors convert on the fly; `set_fahrenheit` replaces
/// the stored value by re-deriving Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Temperature {
    celsius: f64,
}

impl Temperature {
    pub fn new(celsius: f64) -> Self {
        Self { celsius }
    }

    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Self {
            celsius: (fahrenheit - 32.0) / 1.8,
        }
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }

    pub fn fahrenheit(&self) -> f64 {
        1.8 * self.celsius + 32.0
    }

    pub fn set_fahrenheit(&mut self, fahrenheit: f64) {
        self.celsius = (fahrenheit - 32.0) / 1.8;
    }
}

impl From<f64> for Temperature {
    fn from(celsius: f64) -> Self {
        Self::new(celsius)
    }
}

/// Renders as `"C°C (F°F)"`, Celsius to one decimal, Fahrenheit to zero.
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C ({:.0}°F)", self.celsius, self.fahrenheit())
    }
}

impl Add for Temperature {
    type Output = Temperature;

    fn add(self, rhs: Temperature) -> Temperature {
        Temperature::new(self.celsius + rhs.celsius)
    }
}

impl Sub for Temperature {
    type Output = Temperature;

    fn sub(self, rhs: Temperature) -> Temperature {
        Temperature::new(self.celsius - rhs.celsius)
    }
}

impl Mul<f64> for Temperature {
    type Output = Temperature;

    fn mul(self, rhs: f64) -> Temperature {
        Temperature::new(self.celsius * rhs)
    }
}

impl Mul<Temperature> for f64 {
    type Output = Temperature;

    fn mul(self, rhs: Temperature) -> Temperature {
        rhs * self
    }
}

/// The ratio of two temperatures' Celsius values, dimensionless.
impl Div for Temperature {
    type Output = f64;

    fn div(self, rhs: Temperature) -> f64 {
        self.celsius / rhs.celsius
    }
}
