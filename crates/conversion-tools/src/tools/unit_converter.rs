//! Unit conversion across length, mass, volume, time, area and temperature.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ToolError;
use crate::extract::{ConversionIntent, Domain};
use crate::normalize::normalize_unit;
use crate::result::{ConversionResult, ResultDetails};
use crate::tool::{wrong_domain, Tool};

/// Measurement category. Units only convert within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Length,
    Mass,
    Volume,
    Time,
    Area,
    Temperature,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Volume => "volume",
            Category::Time => "time",
            Category::Area => "area",
            Category::Temperature => "temperature",
        }
    }
}

/// Canonical code, category and factor to the category's base unit
/// (m, kg, L, s, m²). Temperature factors are unused.
const UNITS: &[(&str, Category, f64)] = &[
    ("mm", Category::Length, 0.001),
    ("cm", Category::Length, 0.01),
    ("m", Category::Length, 1.0),
    ("km", Category::Length, 1000.0),
    ("in", Category::Length, 0.0254),
    ("ft", Category::Length, 0.3048),
    ("yd", Category::Length, 0.9144),
    ("mi", Category::Length, 1609.344),
    ("nmi", Category::Length, 1852.0),
    ("mg", Category::Mass, 0.000_001),
    ("g", Category::Mass, 0.001),
    ("kg", Category::Mass, 1.0),
    ("t", Category::Mass, 1000.0),
    ("ton", Category::Mass, 907.184_74),
    ("oz", Category::Mass, 0.028_349_523_125),
    ("lb", Category::Mass, 0.453_592_37),
    ("st", Category::Mass, 6.350_293_18),
    ("ml", Category::Volume, 0.001),
    ("l", Category::Volume, 1.0),
    ("m3", Category::Volume, 1000.0),
    ("ft3", Category::Volume, 28.316_846_592),
    ("gal", Category::Volume, 3.785_411_784),
    ("qt", Category::Volume, 0.946_352_946),
    ("pt", Category::Volume, 0.473_176_473),
    ("cup", Category::Volume, 0.236_588_236_5),
    ("floz", Category::Volume, 0.029_573_529_562_5),
    ("tbsp", Category::Volume, 0.014_786_764_781_25),
    ("tsp", Category::Volume, 0.004_928_921_593_75),
    ("ms", Category::Time, 0.001),
    ("s", Category::Time, 1.0),
    ("min", Category::Time, 60.0),
    ("h", Category::Time, 3600.0),
    ("d", Category::Time, 86_400.0),
    ("wk", Category::Time, 604_800.0),
    ("mo", Category::Time, 2_629_746.0),
    ("yr", Category::Time, 31_556_952.0),
    ("cm2", Category::Area, 0.0001),
    ("m2", Category::Area, 1.0),
    ("km2", Category::Area, 1_000_000.0),
    ("in2", Category::Area, 0.000_645_16),
    ("ft2", Category::Area, 0.092_903_04),
    ("yd2", Category::Area, 0.836_127_36),
    ("mi2", Category::Area, 2_589_988.110_336),
    ("ac", Category::Area, 4_046.856_422_4),
    ("ha", Category::Area, 10_000.0),
    ("c", Category::Temperature, 1.0),
    ("f", Category::Temperature, 1.0),
    ("k", Category::Temperature, 1.0),
    ("r", Category::Temperature, 1.0),
];

fn lookup(code: &str) -> Option<(Category, f64)> {
    UNITS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, category, factor)| (*category, *factor))
}

/// Category of a unit token, after normalization.
pub fn category_of(unit: &str) -> Option<Category> {
    lookup(&normalize_unit(unit)).map(|(category, _)| category)
}

/// Convert between temperature scales via Celsius.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64, ToolError> {
    let celsius = match from {
        "c" => value,
        "f" => (value - 32.0) * 5.0 / 9.0,
        "k" => value - 273.15,
        "r" => (value - 491.67) * 5.0 / 9.0,
        other => return Err(ToolError::UnknownTemperature(other.to_string())),
    };
    match to {
        "c" => Ok(celsius),
        "f" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "k" => Ok(celsius + 273.15),
        "r" => Ok((celsius + 273.15) * 9.0 / 5.0),
        other => Err(ToolError::UnknownTemperature(other.to_string())),
    }
}

/// Display label for a canonical code.
fn label(code: &str) -> &str {
    match code {
        "c" => "°C",
        "f" => "°F",
        "k" => "K",
        "r" => "°R",
        other => other,
    }
}

/// Unit conversion calculator and tool.
pub struct UnitConverter;

impl UnitConverter {
    /// Create a new unit converter.
    pub fn new() -> Self {
        Self
    }

    /// Convert `value` from one unit to another.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> ConversionResult {
        let from_unit = normalize_unit(from);
        let to_unit = normalize_unit(to);
        debug!("Converting {} {} to {}", value, from_unit, to_unit);

        match self.try_convert(value, &from_unit, &to_unit) {
            Ok((category, result)) => {
                let formatted = format!(
                    "{} {} = {:.6} {}",
                    value,
                    label(&from_unit),
                    result,
                    label(&to_unit)
                );
                ConversionResult::ok(
                    ResultDetails::Unit {
                        value,
                        from_unit,
                        to_unit,
                        category: Some(category.as_str().to_string()),
                        result: Some(result),
                    },
                    formatted,
                )
            }
            Err(e) => ConversionResult::failed(
                ResultDetails::Unit {
                    value,
                    from_unit,
                    to_unit,
                    category: None,
                    result: None,
                },
                e,
            ),
        }
    }

    fn try_convert(&self, value: f64, from: &str, to: &str) -> Result<(Category, f64), ToolError> {
        let (from_category, from_factor) =
            lookup(from).ok_or_else(|| ToolError::UnknownUnit(from.to_string()))?;
        let (to_category, to_factor) =
            lookup(to).ok_or_else(|| ToolError::UnknownUnit(to.to_string()))?;

        if from_category != to_category {
            return Err(ToolError::IncompatibleUnits {
                from: from.to_string(),
                from_category: from_category.as_str().to_string(),
                to: to.to_string(),
                to_category: to_category.as_str().to_string(),
            });
        }

        let result = if from_category == Category::Temperature {
            convert_temperature(value, from, to)?
        } else {
            value * from_factor / to_factor
        };
        Ok((from_category, result))
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for UnitConverter {
    fn name(&self) -> &str {
        "unit_converter"
    }

    fn description(&self) -> &str {
        "Converts values between units of length, mass, volume, time, area and temperature."
    }

    fn domain(&self) -> Domain {
        Domain::Unit
    }

    async fn calculate(&self, intent: ConversionIntent) -> ConversionResult {
        match intent {
            ConversionIntent::Unit(unit) => self.convert(unit.value, &unit.from_unit, &unit.to_unit),
            other => wrong_domain(self.name(), &other),
        }
    }
}
