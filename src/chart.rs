//! Sensor history chart.
//!
//! Turns an already time-ordered series of readings into a [`ChartSpec`]:
//! axis bounds, ticks, plotted points, tooltips, labels and colour. Drawing
//! it is left to the UI layer.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ChartConfig, ConfigError};
use crate::models::SensorReading;
use crate::time::{format_day_month_time, format_time_of_day};

/// ARGB colour, same layout as the app's theme constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xFFF4_4336);
    pub const BLUE: Color = Color(0xFF21_96F3);
    pub const BROWN: Color = Color(0xFF79_5548);
    pub const AMBER: Color = Color(0xFFFF_C107);
    pub const PURPLE: Color = Color(0xFF9C_27B0);
    pub const CYAN: Color = Color(0xFF00_BCD4);
    pub const GREY: Color = Color(0xFF9E_9E9E);

    /// "#RRGGBB", alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

/// Display language for chart labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

/// Sensor types with a dedicated label and colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    Humidity,
    SoilMoisture,
    Light,
    Ph,
    WaterLevel,
}

impl SensorKind {
    pub const ALL: [SensorKind; 6] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::SoilMoisture,
        SensorKind::Light,
        SensorKind::Ph,
        SensorKind::WaterLevel,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "temperature" => Some(SensorKind::Temperature),
            "humidity" => Some(SensorKind::Humidity),
            "soil_moisture" => Some(SensorKind::SoilMoisture),
            "light" => Some(SensorKind::Light),
            "ph" => Some(SensorKind::Ph),
            "water_level" => Some(SensorKind::WaterLevel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::SoilMoisture => "soil_moisture",
            SensorKind::Light => "light",
            SensorKind::Ph => "ph",
            SensorKind::WaterLevel => "water_level",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Arabic, SensorKind::Temperature) => "درجة الحرارة",
            (Locale::Arabic, SensorKind::Humidity) => "الرطوبة",
            (Locale::Arabic, SensorKind::SoilMoisture) => "رطوبة التربة",
            (Locale::Arabic, SensorKind::Light) => "شدة الإضاءة",
            (Locale::Arabic, SensorKind::Ph) => "درجة الحموضة",
            (Locale::Arabic, SensorKind::WaterLevel) => "مستوى المياه",
            (Locale::English, SensorKind::Temperature) => "Temperature",
            (Locale::English, SensorKind::Humidity) => "Humidity",
            (Locale::English, SensorKind::SoilMoisture) => "Soil Moisture",
            (Locale::English, SensorKind::Light) => "Light Intensity",
            (Locale::English, SensorKind::Ph) => "pH",
            (Locale::English, SensorKind::WaterLevel) => "Water Level",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SensorKind::Temperature => Color::RED,
            SensorKind::Humidity => Color::BLUE,
            SensorKind::SoilMoisture => Color::BROWN,
            SensorKind::Light => Color::AMBER,
            SensorKind::Ph => Color::PURPLE,
            SensorKind::WaterLevel => Color::CYAN,
        }
    }
}

/// A point the chart can plot
pub trait ChartSample {
    fn value(&self) -> f64;
    fn timestamp(&self) -> &DateTime<FixedOffset>;
}

impl ChartSample for SensorReading {
    fn value(&self) -> f64 {
        self.value
    }

    fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }
}

impl ChartSample for (f64, DateTime<FixedOffset>) {
    fn value(&self) -> f64 {
        self.0
    }

    fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub y_interval: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Position in the input series, not the timestamp
    pub x: f64,
    pub y: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub position: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub label: String,
    pub unit: String,
    pub color: Color,
    pub bounds: AxisBounds,
    pub y_ticks: Vec<f64>,
    pub points: Vec<ChartPoint>,
    pub x_labels: Vec<AxisLabel>,
}

/// Renderer-agnostic description of a sensor chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// Nothing to plot; shown as an empty-state message
    NoData {
        label: String,
        unit: String,
        color: Color,
    },
    Line(LineChart),
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartSpec::NoData { .. })
    }

    pub fn bounds(&self) -> Option<&AxisBounds> {
        match self {
            ChartSpec::Line(chart) => Some(&chart.bounds),
            ChartSpec::NoData { .. } => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ChartSpec::Line(chart) => &chart.label,
            ChartSpec::NoData { label, .. } => label,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ChartSpec::Line(chart) => chart.color,
            ChartSpec::NoData { color, .. } => *color,
        }
    }
}

/// Y grid step for a given Y range
pub fn y_interval(range: f64) -> f64 {
    if range <= 20.0 {
        5.0
    } else if range <= 50.0 {
        10.0
    } else if range <= 100.0 {
        20.0
    } else {
        50.0
    }
}

/// Above this many grid lines only the two ends are ticked
pub const MAX_Y_TICKS: usize = 1000;

/// Tick positions from `min` to `max` inclusive
fn y_ticks(min: f64, max: f64, interval: f64) -> Vec<f64> {
    let steps = ((max - min) / interval).floor();
    if steps >= MAX_Y_TICKS as f64 {
        return vec![min, max];
    }
    (0..=steps as usize)
        .map(|i| min + interval * i as f64)
        .collect()
}

/// Builds [`ChartSpec`]s with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct SensorChart {
    config: ChartConfig,
}

impl SensorChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Label and colour for a sensor type tag; unknown tags show the raw tag
    pub fn style(&self, sensor_type: &str) -> (String, Color) {
        match SensorKind::from_tag(sensor_type) {
            Some(kind) => (kind.label(self.config.locale).to_string(), kind.color()),
            None => (sensor_type.to_string(), self.config.default_color),
        }
    }

    /// Build the chart for `readings`, which must already be in time order.
    ///
    /// Non-finite values are left out of the bounds and the plotted points
    /// but keep their index, so the X axis still lines up with the input.
    pub fn build<S: ChartSample>(&self, readings: &[S], sensor_type: &str, unit: &str) -> ChartSpec {
        let (label, color) = self.style(sensor_type);

        let finite: Vec<(usize, &S)> = readings
            .iter()
            .enumerate()
            .filter(|(_, r)| r.value().is_finite())
            .collect();

        let dropped = readings.len() - finite.len();
        if dropped > 0 {
            warn!(sensor_type, dropped, "Dropped non-finite readings from chart");
        }

        if finite.is_empty() {
            debug!(sensor_type, "No readings to chart");
            return ChartSpec::NoData {
                label,
                unit: unit.to_string(),
                color,
            };
        }

        let (min_value, max_value) = finite.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), (_, r)| (lo.min(r.value()), hi.max(r.value())),
        );

        let min_y = (min_value - self.config.padding).floor();
        let max_y = (max_value + self.config.padding).ceil();
        let interval = y_interval(max_y - min_y);

        let bounds = AxisBounds {
            min_x: 0.0,
            max_x: (readings.len() - 1) as f64,
            min_y,
            max_y,
            y_interval: interval,
        };

        let points = finite
            .iter()
            .map(|(i, r)| ChartPoint {
                x: *i as f64,
                y: r.value(),
                tooltip: format!(
                    "{:.1} {}\n{}",
                    r.value(),
                    unit,
                    format_day_month_time(r.timestamp())
                ),
            })
            .collect();

        let x_labels = readings
            .iter()
            .enumerate()
            .map(|(i, r)| AxisLabel {
                position: i as f64,
                text: format_time_of_day(r.timestamp()),
            })
            .collect();

        debug!(
            sensor_type,
            points = finite.len(),
            min_y,
            max_y,
            "Built sensor chart"
        );

        ChartSpec::Line(LineChart {
            label,
            unit: unit.to_string(),
            color,
            bounds,
            y_ticks: y_ticks(min_y, max_y, interval),
            points,
            x_labels,
        })
    }
}

/// Build a chart with the default configuration
pub fn build_chart<S: ChartSample>(readings: &[S], sensor_type: &str, unit: &str) -> ChartSpec {
    SensorChart::new().build(readings, sensor_type, unit)
}
