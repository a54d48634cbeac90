use std::{fmt, str::FromStr};

use crate::error::ReminderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = ReminderError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| ReminderError::MalformedLocation {
            input: input.to_owned(),
            reason: reason.to_owned(),
        };

        let mut parts = input.split(',');
        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed("expected exactly two comma-separated components"));
        };

        let latitude = parse_degrees(lat).ok_or_else(|| malformed("latitude is not a number"))?;
        let longitude = parse_degrees(lng).ok_or_else(|| malformed("longitude is not a number"))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(malformed("latitude must be within -90..=90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(malformed("longitude must be within -180..=180"));
        }

        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

fn parse_degrees(component: &str) -> Option<f64> {
    component
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// User supplied location text together with its parsed point.
///
/// The mapping service accepts richer forms than `lat,lng`, so the original
/// text is what gets forwarded to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    text: String,
    point: GeoPoint,
}

impl Location {
    pub fn parse(text: &str) -> Result<Self, ReminderError> {
        let point = text.parse()?;
        Ok(Self {
            text: text.to_owned(),
            point,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }
}
