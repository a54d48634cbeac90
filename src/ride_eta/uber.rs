use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};

use crate::{
    error::{ReminderError, ReminderResult, Service},
    http,
    models::{geo::GeoPoint, token::BearerToken},
};

use super::{RideEtaService, TimeEstimates};

pub struct UberEtaClient {
    client: Client,
    base_url: String,
}

impl UberEtaClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn request(&self, pickup: GeoPoint, token: &BearerToken) -> RequestBuilder {
        let url = format!("{}/estimates/time", self.base_url.trim_end_matches('/'));
        self.client
            .get(url)
            .bearer_auth(token.secret())
            .header(header::CONTENT_TYPE, "application/json")
            .query(&[
                ("start_latitude", pickup.latitude),
                ("start_longitude", pickup.longitude),
            ])
    }
}

#[async_trait]
impl RideEtaService for UberEtaClient {
    async fn query(&self, pickup: GeoPoint, token: &BearerToken) -> ReminderResult<TimeEstimates> {
        log::debug!("[RIDE] Requesting time estimates for pickup {pickup}");

        let response = self
            .request(pickup, token)
            .send()
            .await
            .map_err(|e| ReminderError::service_unreachable(Service::RideHailing, e))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ReminderError::AuthorizationFailed(
                "the ride-hailing provider rejected the bearer token".to_owned(),
            ));
        }

        let response = http::ensure_success(Service::RideHailing, response).await?;

        response.json::<TimeEstimates>().await.map_err(|e| {
            log::error!("Failed to parse time estimates response. Error: {e}");
            ReminderError::service_unreachable(Service::RideHailing, e)
        })
    }
}
