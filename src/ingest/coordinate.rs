//! Decoder for the JMA compound hypocenter coordinate string.
//!
//! The upstream packs latitude, longitude, depth, and a tsunami-risk code
//! into one field with no delimiter between the first three, following
//! ISO 6709 sign conventions:
//!
//! ```text
//! +35.6762+139.6503-10000/     lat, lon, depth in meters, empty code
//! 35.6762+139.6503+10/0        unsigned lat, code "0"
//! +35.6+139.7                  no depth, no code
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoordinateError;

/// Decoded hypocenter position.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    /// Signed decimal degrees.
    pub latitude: f64,
    /// Signed decimal degrees.
    pub longitude: f64,
    /// Depth in kilometers, `None` when the string has no depth segment.
    pub depth_km: Option<f64>,
    /// Trailing text after the optional `/`, verbatim.
    pub tsunami_risk: String,
}

impl Coordinate {
    /// Depth in whole kilometers, truncated toward zero; `0` when absent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn depth_km_truncated(&self) -> i32 {
        self.depth_km.map_or(0, |km| km.trunc() as i32)
    }
}

#[allow(clippy::expect_used)]
fn coordinate_re() -> &'static Regex {
    static COORDINATE_RE: OnceLock<Regex> = OnceLock::new();
    COORDINATE_RE.get_or_init(|| {
        Regex::new(r"([+-]?\d+\.\d+)([+-]?\d+\.\d+)([+-]\d+)?/?(.*)$")
            .expect("valid coordinate regex")
    })
}

/// Parses a compound coordinate string.
///
/// Latitude and longitude are the first two signed-decimal tokens. An
/// integer token with a mandatory sign immediately after them is the depth
/// in meters. Everything after the optional `/` is the tsunami-risk code.
///
/// # Errors
///
/// Returns [`CoordinateError::MissingComponents`] when fewer than two
/// decimal tokens are present, and [`CoordinateError::InvalidComponent`]
/// when a matched token does not convert to a number.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, CoordinateError> {
    let caps = coordinate_re()
        .captures(input)
        .ok_or_else(|| CoordinateError::MissingComponents(input.to_string()))?;

    let token = |idx: usize| caps.get(idx).map(|m| m.as_str());
    let invalid = |component: &'static str, token: &str| CoordinateError::InvalidComponent {
        input: input.to_string(),
        component,
        token: token.to_string(),
    };

    let (Some(lat), Some(lon)) = (token(1), token(2)) else {
        return Err(CoordinateError::MissingComponents(input.to_string()));
    };
    let latitude: f64 = lat.parse().map_err(|_| invalid("latitude", lat))?;
    let longitude: f64 = lon.parse().map_err(|_| invalid("longitude", lon))?;

    let depth_km = match token(3) {
        Some(depth) => {
            let meters: i64 = depth.parse().map_err(|_| invalid("depth", depth))?;
            #[allow(clippy::cast_precision_loss)]
            Some(meters as f64 / 1000.0)
        }
        None => None,
    };

    Ok(Coordinate {
        latitude,
        longitude,
        depth_km,
        tsunami_risk: token(4).unwrap_or_default().to_string(),
    })
}
