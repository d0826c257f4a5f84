//! # Zoom Classification
//!
//! Maps a record's tags to the first zoom it becomes visible at.
//!
//! Bigger infrastructure earns lower zooms:
//! - Lines by their highest voltage
//! - Plants by their electrical output
//! - Everything else by category
//!
//! Unknown or unreadable values land in the least prominent bucket.

use gridlayer_core::{SourceRecord, Zoom};

use crate::tags::POWER_KEY;
use crate::units::{parse_max_voltage, parse_power_output};

/// Tag holding a line's voltage list.
pub const VOLTAGE_KEY: &str = "voltage";

/// Tag holding a plant's electrical output.
pub const PLANT_OUTPUT_KEY: &str = "plant:output:electricity";

/// Tag holding a generator's energy source.
pub const GENERATOR_SOURCE_KEY: &str = "generator:source";

/// Voltage bands as (inclusive lower bound in volts, zoom).
const VOLTAGE_BANDS: [(u32, Zoom); 6] = [
    (345_000, 4),
    (220_000, 5),
    (110_000, 6),
    (33_000, 7),
    (10_000, 8),
    (1_000, 9),
];

/// Zoom for lines below every voltage band, or of unknown voltage.
const LOW_VOLTAGE_ZOOM: Zoom = 10;

/// Zoom for power lines that are not `line` or `cable`.
const MINOR_LINE_ZOOM: Zoom = 13;

/// Plant output bands as (inclusive lower bound in MW, zoom).
const OUTPUT_BANDS: [(f64, Zoom); 5] = [
    (1000.0, 6),
    (500.0, 7),
    (100.0, 8),
    (50.0, 9),
    (10.0, 10),
];

/// Zoom for small plants and plants without a known output.
const SMALL_PLANT_ZOOM: Zoom = 11;

/// Value of the `power` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerKind {
    /// High-voltage overhead line.
    Line,
    /// Underground or submarine cable.
    Cable,
    /// Distribution line.
    MinorLine,
    /// Power station.
    Plant,
    /// Single generating unit.
    Generator,
    /// Substation.
    Substation,
    /// Transmission tower.
    Tower,
    /// Distribution pole.
    Pole,
    /// Transformer.
    Transformer,
    /// Any other or missing value.
    Other,
}

impl PowerKind {
    /// Reads the kind from a `power` tag value.
    #[must_use]
    pub fn from_tag(value: Option<&str>) -> Self {
        match value {
            Some("line") => Self::Line,
            Some("cable") => Self::Cable,
            Some("minor_line") => Self::MinorLine,
            Some("plant") => Self::Plant,
            Some("generator") => Self::Generator,
            Some("substation") => Self::Substation,
            Some("tower") => Self::Tower,
            Some("pole") => Self::Pole,
            Some("transformer") => Self::Transformer,
            _ => Self::Other,
        }
    }

    /// Reads the kind of a record.
    #[must_use]
    pub fn of<R: SourceRecord + ?Sized>(record: &R) -> Self {
        Self::from_tag(record.tag(POWER_KEY))
    }
}

/// Minimum zoom for a record rendered as a line.
///
/// `line` and `cable` are graded by voltage; every other kind is a minor
/// line.
#[must_use]
pub fn line_min_zoom<R: SourceRecord + ?Sized>(record: &R) -> Zoom {
    match PowerKind::of(record) {
        PowerKind::Line | PowerKind::Cable => {
            voltage_min_zoom(record.tag(VOLTAGE_KEY).map_or(0, parse_max_voltage))
        }
        _ => MINOR_LINE_ZOOM,
    }
}

/// Minimum zoom for a line of the given voltage. Zero means unknown.
#[must_use]
pub fn voltage_min_zoom(volts: u32) -> Zoom {
    VOLTAGE_BANDS
        .iter()
        .find(|&&(floor, _)| volts >= floor)
        .map_or(LOW_VOLTAGE_ZOOM, |&(_, zoom)| zoom)
}

/// Minimum zoom for a record's point or label.
#[must_use]
pub fn label_min_zoom<R: SourceRecord + ?Sized>(record: &R) -> Zoom {
    match PowerKind::of(record) {
        PowerKind::Plant => plant_min_zoom(record),
        PowerKind::Tower | PowerKind::Substation => 12,
        PowerKind::Generator => match record.tag(GENERATOR_SOURCE_KEY) {
            Some("wind") => 13,
            _ => 15,
        },
        // Poles, transformers and everything else.
        _ => 14,
    }
}

/// Minimum zoom for a plant, graded by its electrical output.
#[must_use]
pub fn plant_min_zoom<R: SourceRecord + ?Sized>(record: &R) -> Zoom {
    match record.tag(PLANT_OUTPUT_KEY) {
        Some(output) => output_min_zoom(parse_power_output(output)),
        None => SMALL_PLANT_ZOOM,
    }
}

/// Minimum zoom for a plant producing `megawatts`.
#[must_use]
pub fn output_min_zoom(megawatts: f64) -> Zoom {
    OUTPUT_BANDS
        .iter()
        .find(|&&(floor, _)| megawatts >= floor)
        .map_or(SMALL_PLANT_ZOOM, |&(_, zoom)| zoom)
}
