pub mod uber;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::ReminderResult,
    models::{
        estimate::{DurationEstimate, EstimateSource},
        geo::GeoPoint,
        token::BearerToken,
    },
};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TimeEstimates {
    #[serde(default)]
    pub times: Vec<ProductEstimate>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProductEstimate {
    pub display_name: String,
    /// Seconds until a car reaches the pickup point.
    pub estimate: u64,
}

/// ETA capability of a ride-hailing provider.
#[async_trait]
pub trait RideEtaService: Send + Sync + 'static {
    async fn query(&self, pickup: GeoPoint, token: &BearerToken) -> ReminderResult<TimeEstimates>;
}

pub struct RideEtaResolver {
    service: Arc<dyn RideEtaService>,
    product_name: String,
}

impl RideEtaResolver {
    pub fn new(service: Arc<dyn RideEtaService>, product_name: impl Into<String>) -> Self {
        Self {
            service,
            product_name: product_name.into(),
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// ETA of the configured product at `pickup`. A product the provider does
    /// not offer there yields an unavailable estimate.
    pub async fn estimate(
        &self,
        pickup: GeoPoint,
        token: &BearerToken,
    ) -> ReminderResult<DurationEstimate> {
        let estimates = self.service.query(pickup, token).await?;
        let estimate = select_product_estimate(&estimates, &self.product_name);

        if estimate.seconds().is_none() {
            log::info!(
                "Ride-hailing provider offers no {} at {pickup}. [offered = {:?}]",
                self.product_name,
                estimates
                    .times
                    .iter()
                    .map(|row| row.display_name.as_str())
                    .collect::<Vec<_>>()
            );
        }

        Ok(estimate)
    }
}

/// Picks the row whose product name equals `product_name` exactly.
pub fn select_product_estimate(estimates: &TimeEstimates, product_name: &str) -> DurationEstimate {
    estimates
        .times
        .iter()
        .find(|row| row.display_name == product_name)
        .map(|row| DurationEstimate::ok(EstimateSource::RideHailing, row.estimate))
        .unwrap_or_else(|| DurationEstimate::unavailable(EstimateSource::RideHailing))
}
