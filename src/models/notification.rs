use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;

use crate::error::ReminderError;

pub const REMINDER_MESSAGE: &str = "It's time to book your ride.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EmailAddress {
    type Err = ReminderError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let valid = match trimmed.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !trimmed.contains(char::is_whitespace)
            }
            None => false,
        };

        if valid {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ReminderError::MalformedEmail(input.to_owned()))
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What gets handed to a [`NotificationSink`](crate::delivery::NotificationSink).
///
/// `send_at` is a local wall-clock date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    recipient: EmailAddress,
    send_at: NaiveDateTime,
    message: String,
}

impl NotificationRequest {
    pub fn new(
        recipient: EmailAddress,
        send_at: NaiveDateTime,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            send_at,
            message: message.into(),
        }
    }

    pub fn recipient(&self) -> &EmailAddress {
        &self.recipient
    }

    pub fn send_at(&self) -> &NaiveDateTime {
        &self.send_at
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
