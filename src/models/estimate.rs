use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    Mapping,
    RideHailing,
}

impl fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateSource::Mapping => f.write_str("mapping"),
            EstimateSource::RideHailing => f.write_str("ride-hailing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateStatus {
    Ok { seconds: u64 },
    Unreachable,
    Unavailable,
}

/// A predicted travel time. Only `Ok` estimates carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationEstimate {
    pub source: EstimateSource,
    pub status: EstimateStatus,
}

impl DurationEstimate {
    pub fn ok(source: EstimateSource, seconds: u64) -> Self {
        Self {
            source,
            status: EstimateStatus::Ok { seconds },
        }
    }

    /// For callers that build estimates themselves. The resolvers report a
    /// missing route as `RouteUnreachable` instead.
    pub fn unreachable(source: EstimateSource) -> Self {
        Self {
            source,
            status: EstimateStatus::Unreachable,
        }
    }

    pub fn unavailable(source: EstimateSource) -> Self {
        Self {
            source,
            status: EstimateStatus::Unavailable,
        }
    }

    pub fn seconds(&self) -> Option<u64> {
        match self.status {
            EstimateStatus::Ok { seconds } => Some(seconds),
            EstimateStatus::Unreachable | EstimateStatus::Unavailable => None,
        }
    }
}
