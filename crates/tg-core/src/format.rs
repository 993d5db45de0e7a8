//! Coordinate formatting, normalisation and validation.
//!
//! Validation is opt-in.  Distance, bearing and containment functions trust
//! their inputs; call [`is_valid_coordinates`] once where a fix enters the
//! system.

use std::fmt;

use crate::Coordinate;

/// Default decimal places for [`CoordinateFormat::Decimal`].
pub const DEFAULT_PRECISION: usize = 6;

// ── DMS ───────────────────────────────────────────────────────────────────────

/// Which axis a decimal-degree value belongs to.  Picks the hemisphere letters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Hemisphere::N => "N",
            Hemisphere::S => "S",
            Hemisphere::E => "E",
            Hemisphere::W => "W",
        };
        f.write_str(s)
    }
}

/// Degrees / minutes / seconds breakdown of a decimal-degree value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dms {
    pub degrees:    u32,
    pub minutes:    u32,
    /// Rounded to three decimal places.
    pub seconds:    f64,
    pub hemisphere: Hemisphere,
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{}\"{}",
            self.degrees, self.minutes, self.seconds, self.hemisphere
        )
    }
}

/// Split `decimal` into degrees, minutes and seconds.  The sign becomes the
/// hemisphere letter for `axis`.
///
/// Seconds that round up to 60 carry into the minutes (and minutes into
/// degrees), so `seconds < 60` and `minutes < 60` always hold.
pub fn degrees_to_dms(decimal: f64, axis: Axis) -> Dms {
    let hemisphere = match (axis, decimal < 0.0) {
        (Axis::Latitude, false)  => Hemisphere::N,
        (Axis::Latitude, true)   => Hemisphere::S,
        (Axis::Longitude, false) => Hemisphere::E,
        (Axis::Longitude, true)  => Hemisphere::W,
    };

    let abs = decimal.abs();
    let mut degrees = abs.floor();
    let minutes_f = (abs - degrees) * 60.0;
    let mut minutes = minutes_f.floor();
    let mut seconds = round_to((minutes_f - minutes) * 60.0, 3);

    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes -= 60.0;
        degrees += 1.0;
    }

    Dms {
        degrees: degrees as u32,
        minutes: minutes as u32,
        seconds,
        hemisphere,
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Output style for [`format_coordinates`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoordinateFormat {
    /// `"lat, lng"` with a fixed number of decimal places.
    Decimal { precision: usize },
    /// `28°36'50.04"N, 77°12'32.4"E`
    Dms,
}

impl Default for CoordinateFormat {
    fn default() -> Self {
        CoordinateFormat::Decimal { precision: DEFAULT_PRECISION }
    }
}

/// Render a coordinate for display.
pub fn format_coordinates(coord: Coordinate, format: CoordinateFormat) -> String {
    match format {
        CoordinateFormat::Decimal { precision } => {
            format!("{:.*}, {:.*}", precision, coord.lat, precision, coord.lng)
        }
        CoordinateFormat::Dms => format!(
            "{}, {}",
            degrees_to_dms(coord.lat, Axis::Latitude),
            degrees_to_dms(coord.lng, Axis::Longitude),
        ),
    }
}

// ── Normalisation & validation ────────────────────────────────────────────────

/// Wrap a longitude into `[-180, 180]` by whole turns.
///
/// Values already in range are returned untouched, so the function is
/// idempotent.  Equivalent to repeatedly adding or subtracting 360 but runs in
/// constant time.
pub fn normalize_longitude(lng: f64) -> f64 {
    if lng > 180.0 {
        lng - 360.0 * ((lng - 180.0) / 360.0).ceil()
    } else if lng < -180.0 {
        lng + 360.0 * ((-180.0 - lng) / 360.0).ceil()
    } else {
        lng
    }
}

/// Clamp a latitude into `[-90, 90]`.
#[inline]
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// `true` iff both fields are finite and within their valid ranges.
pub fn is_valid_coordinates(coord: Coordinate) -> bool {
    coord.lat.is_finite()
        && coord.lng.is_finite()
        && (-90.0..=90.0).contains(&coord.lat)
        && (-180.0..=180.0).contains(&coord.lng)
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
