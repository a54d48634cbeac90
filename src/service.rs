use crate::{
    error::ReminderResult,
    models::{
        geo::Location,
        notification::{EmailAddress, NotificationRequest},
        target_time::TargetTime,
        token::BearerToken,
    },
    ride_eta::RideEtaResolver,
    scheduling::ReminderScheduler,
    travel_time::TravelTimeResolver,
};

/// One reminder request as the outer layer receives it.
#[derive(Debug, Clone)]
pub struct RemindRequest {
    pub source: String,
    pub destination: String,
    pub target_time: String,
    pub recipient: String,
    pub token: BearerToken,
}

pub struct ReminderService {
    travel_time: TravelTimeResolver,
    ride_eta: RideEtaResolver,
    scheduler: ReminderScheduler,
}

impl ReminderService {
    pub fn new(
        travel_time: TravelTimeResolver,
        ride_eta: RideEtaResolver,
        scheduler: ReminderScheduler,
    ) -> Self {
        Self {
            travel_time,
            ride_eta,
            scheduler,
        }
    }

    /// Validates every input, then resolves both legs and schedules the
    /// reminder. Nothing is sent unless both estimates are usable.
    pub async fn remind(&self, request: RemindRequest) -> ReminderResult<NotificationRequest> {
        let source = Location::parse(&request.source)?;
        let destination = Location::parse(&request.destination)?;
        let target: TargetTime = request.target_time.parse()?;
        let recipient: EmailAddress = request.recipient.parse()?;

        let mapping_duration = self
            .travel_time
            .resolve_locations(&source, &destination)
            .await?;
        let ride_eta = self.ride_eta.estimate(source.point(), &request.token).await?;

        log::debug!(
            "Estimates resolved. [mapping = {:?}, ride = {:?}, product = {}]",
            mapping_duration.status,
            ride_eta.status,
            self.ride_eta.product_name()
        );

        self.scheduler
            .schedule(target, mapping_duration, ride_eta, recipient)
            .await
    }
}
