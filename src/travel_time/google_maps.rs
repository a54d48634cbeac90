use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{ReminderError, ReminderResult, Service},
    http,
};

use super::{DistanceMatrix, DistanceMatrixService};

pub struct GoogleDistanceMatrixClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleDistanceMatrixClient {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn request(&self, origin: &str, destination: &str) -> reqwest::RequestBuilder {
        self.client.get(&self.base_url).query(&[
            ("origins", origin),
            ("destinations", destination),
            ("mode", "driving"),
            ("key", self.api_key.as_str()),
        ])
    }
}

#[async_trait]
impl DistanceMatrixService for GoogleDistanceMatrixClient {
    async fn query(&self, origin: &str, destination: &str) -> ReminderResult<DistanceMatrix> {
        let response = self
            .request(origin, destination)
            .send()
            .await
            .map_err(|e| ReminderError::service_unreachable(Service::Mapping, e))?;

        let response = http::ensure_success(Service::Mapping, response).await?;

        response.json::<DistanceMatrix>().await.map_err(|e| {
            log::error!("Failed to parse distance matrix response. Error: {e}");
            ReminderError::service_unreachable(Service::Mapping, e)
        })
    }
}
