use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};

use crate::error::ReminderError;

/// Wall-clock time of day at which the user wants to arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetTime(NaiveTime);

impl TargetTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time = inner.with_nanosecond(0).expect("Will never fail.");
        Self(normalized_time)
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }

    pub fn seconds_since_midnight(&self) -> u64 {
        u64::from(self.0.num_seconds_from_midnight())
    }
}

impl FromStr for TargetTime {
    type Err = ReminderError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(TargetTime::new)
            .map_err(|_| ReminderError::MalformedTargetTime(input.to_owned()))
    }
}

impl fmt::Display for TargetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Latest time of day at which the ride has to be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderInstant(NaiveTime);

impl ReminderInstant {
    pub fn from_seconds_since_midnight(seconds: u32) -> Option<Self> {
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).map(Self)
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }
}

impl fmt::Display for ReminderInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_seconds() {
        let with_seconds: TargetTime = "18:00:30".parse().unwrap();
        let without_seconds: TargetTime = "18:00".parse().unwrap();

        assert_eq!(with_seconds.seconds_since_midnight(), 18 * 3600 + 30);
        assert_eq!(without_seconds.seconds_since_midnight(), 18 * 3600);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "6pm", "25:00:00", "18:61"] {
            assert_eq!(
                input.parse::<TargetTime>(),
                Err(ReminderError::MalformedTargetTime(input.to_owned()))
            );
        }
    }

    #[test]
    fn drops_sub_second_precision() {
        let time = NaiveTime::from_hms_milli_opt(7, 30, 0, 999).unwrap();

        assert_eq!(TargetTime::new(time).to_string(), "07:30:00");
    }

    #[test]
    fn fractional_seconds_are_accepted_and_dropped() {
        let time: TargetTime = "18:00:00.5".parse().unwrap();

        assert_eq!(time.to_string(), "18:00:00");
        assert_eq!(time.seconds_since_midnight(), 18 * 3600);
    }
}
