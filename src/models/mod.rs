pub mod estimate;
pub mod geo;
pub mod notification;
pub mod target_time;
pub mod token;
