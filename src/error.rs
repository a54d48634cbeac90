use std::fmt;

use thiserror::Error;

use crate::models::estimate::EstimateSource;

/// External collaborator that failed at the transport or protocol level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Mapping,
    RideHailing,
    Notification,
    Authorization,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Mapping => "mapping service",
            Service::RideHailing => "ride-hailing service",
            Service::Notification => "notification service",
            Service::Authorization => "authorization service",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("Location {input:?} is malformed: {reason}")]
    MalformedLocation { input: String, reason: String },

    #[error("Target time {0:?} is not a valid HH:MM[:SS] time")]
    MalformedTargetTime(String),

    #[error("Email address {0:?} is malformed")]
    MalformedEmail(String),

    #[error("Could not reach the {service}: {message}")]
    ServiceUnreachable { service: Service, message: String },

    #[error("The mapping service found no route (status {status})")]
    RouteUnreachable { status: String },

    #[error("The {0} estimate is unavailable")]
    EstimateUnavailable(EstimateSource),

    #[error("Travel takes {required_secs}s but the target is only {available_secs}s after midnight")]
    InfeasibleSchedule {
        required_secs: u64,
        available_secs: u64,
    },

    #[error("The notification was rejected: {0}")]
    NotificationRejected(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),
}

impl ReminderError {
    pub fn service_unreachable(service: Service, message: impl ToString) -> Self {
        ReminderError::ServiceUnreachable {
            service,
            message: message.to_string(),
        }
    }

    /// Text shown to the person who asked for the reminder.
    pub fn user_message(&self) -> String {
        match self {
            ReminderError::MalformedLocation { input, .. } => {
                format!("Could not understand the location {input:?}. Use \"latitude,longitude\".")
            }
            ReminderError::MalformedTargetTime(input) => {
                format!("Could not understand the time {input:?}. Use HH:MM or HH:MM:SS.")
            }
            ReminderError::MalformedEmail(input) => {
                format!("{input:?} does not look like an email address.")
            }
            ReminderError::ServiceUnreachable { .. } => {
                "Something went wrong on our side. Please try again.".to_owned()
            }
            ReminderError::RouteUnreachable { .. } => {
                "No driving route was found between these locations. Try different locations."
                    .to_owned()
            }
            ReminderError::EstimateUnavailable(source) => {
                format!(
                    "No {source} estimate is available right now. \
                     Try different locations or a later time."
                )
            }
            ReminderError::InfeasibleSchedule { .. } => {
                "No ride can get you there in time.".to_owned()
            }
            ReminderError::NotificationRejected(reason) => {
                format!("The reminder email could not be scheduled: {reason}")
            }
            ReminderError::AuthorizationFailed(_) => {
                "Authorization with the ride-hailing provider failed. Please sign in again."
                    .to_owned()
            }
        }
    }
}

pub type ReminderResult<T> = Result<T, ReminderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_schedule_explains_itself_without_a_time() {
        let error = ReminderError::InfeasibleSchedule {
            required_secs: 1200,
            available_secs: 600,
        };

        assert_eq!(error.user_message(), "No ride can get you there in time.");
    }

    #[test]
    fn unavailable_estimate_names_the_leg() {
        let error = ReminderError::EstimateUnavailable(EstimateSource::RideHailing);

        assert_eq!(error.to_string(), "The ride-hailing estimate is unavailable");
        assert!(error.user_message().contains("ride-hailing"));
    }

    #[test]
    fn transport_failures_ask_to_try_again() {
        let error = ReminderError::service_unreachable(Service::Mapping, "connection refused");

        assert!(error.user_message().contains("try again"));
        assert!(error.to_string().contains("mapping service"));
    }
}
