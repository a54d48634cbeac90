use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveTime};

use crate::{
    delivery::NotificationSink,
    error::{ReminderError, ReminderResult},
    models::{
        estimate::{DurationEstimate, EstimateSource},
        notification::{EmailAddress, NotificationRequest, REMINDER_MESSAGE},
        target_time::{ReminderInstant, TargetTime},
    },
};

/// Both instants derived from one target time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPlan {
    /// Latest departure from the pickup point.
    pub book_by: NaiveTime,
    /// Latest moment to request the ride.
    pub remind_at: ReminderInstant,
}

pub struct ReminderScheduler {
    sink: Arc<dyn NotificationSink>,
}

impl ReminderScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Plans the reminder for today (local date) and hands it to the sink.
    pub async fn schedule(
        &self,
        target: TargetTime,
        mapping_duration: DurationEstimate,
        ride_eta: DurationEstimate,
        recipient: EmailAddress,
    ) -> ReminderResult<NotificationRequest> {
        let today = Local::now().date_naive();
        self.schedule_on(today, target, mapping_duration, ride_eta, recipient)
            .await
    }

    pub async fn schedule_on(
        &self,
        date: NaiveDate,
        target: TargetTime,
        mapping_duration: DurationEstimate,
        ride_eta: DurationEstimate,
        recipient: EmailAddress,
    ) -> ReminderResult<NotificationRequest> {
        let plan = plan_booking(&target, &mapping_duration, &ride_eta)?;

        log::info!(
            "Planned reminder. [target = {target}, book_by = {}, remind_at = {}]",
            plan.book_by.format("%H:%M:%S"),
            plan.remind_at
        );

        let request = NotificationRequest::new(
            recipient,
            date.and_time(*plan.remind_at.time()),
            REMINDER_MESSAGE,
        );

        self.sink.send(&request).await?;

        Ok(request)
    }
}

/// `target - mapping` gives the book-by time, minus the ride ETA gives the
/// reminder time. Either step going below midnight is infeasible.
pub fn plan_booking(
    target: &TargetTime,
    mapping_duration: &DurationEstimate,
    ride_eta: &DurationEstimate,
) -> ReminderResult<BookingPlan> {
    let driving = mapping_duration
        .seconds()
        .ok_or(ReminderError::EstimateUnavailable(EstimateSource::Mapping))?;
    let pickup = ride_eta
        .seconds()
        .ok_or(ReminderError::EstimateUnavailable(EstimateSource::RideHailing))?;

    let available = target.seconds_since_midnight();
    let infeasible = || ReminderError::InfeasibleSchedule {
        required_secs: driving.saturating_add(pickup),
        available_secs: available,
    };

    let book_by = available.checked_sub(driving).ok_or_else(infeasible)?;
    let remind_at = book_by.checked_sub(pickup).ok_or_else(infeasible)?;

    Ok(BookingPlan {
        book_by: time_of_day(book_by),
        remind_at: ReminderInstant::from_seconds_since_midnight(remind_at as u32)
            .expect("Never exceeds the target time."),
    })
}

fn time_of_day(seconds: u64) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0)
        .expect("Never exceeds the target time.")
}
