pub mod appsettings;
pub mod delivery;
pub mod error;
pub mod http;
pub mod models;
pub mod oauth;
pub mod ride_eta;
pub mod scheduling;
pub mod service;
pub mod travel_time;

pub use error::{ReminderError, ReminderResult};
pub use service::{RemindRequest, ReminderService};
