pub mod google_maps;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{ReminderError, ReminderResult, Service},
    models::{
        estimate::{DurationEstimate, EstimateSource},
        geo::Location,
    },
};

pub const ELEMENT_OK: &str = "OK";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DistanceMatrix {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DistanceMatrixElement {
    pub status: String,
    #[serde(default)]
    pub duration: Option<DurationValue>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct DurationValue {
    pub value: u64,
}

impl DistanceMatrix {
    pub fn first_element(&self) -> Option<&DistanceMatrixElement> {
        self.rows.first()?.elements.first()
    }
}

/// Distance-matrix capability of a mapping service.
///
/// `origin` and `destination` are passed through as the user typed them.
#[async_trait]
pub trait DistanceMatrixService: Send + Sync + 'static {
    async fn query(&self, origin: &str, destination: &str) -> ReminderResult<DistanceMatrix>;
}

pub struct TravelTimeResolver {
    service: Arc<dyn DistanceMatrixService>,
}

impl TravelTimeResolver {
    pub fn new(service: Arc<dyn DistanceMatrixService>) -> Self {
        Self { service }
    }

    /// Driving time between two `lat,lng` locations.
    ///
    /// Both inputs are validated before the mapping service is contacted.
    pub async fn resolve(
        &self,
        source: &str,
        destination: &str,
    ) -> ReminderResult<DurationEstimate> {
        let source = Location::parse(source)?;
        let destination = Location::parse(destination)?;
        self.resolve_locations(&source, &destination).await
    }

    pub async fn resolve_locations(
        &self,
        source: &Location,
        destination: &Location,
    ) -> ReminderResult<DurationEstimate> {
        log::debug!(
            "Querying driving time. [source = {}, destination = {}]",
            source.text(),
            destination.text()
        );

        let matrix = self.service.query(source.text(), destination.text()).await?;
        extract_duration(&matrix)
    }
}

fn extract_duration(matrix: &DistanceMatrix) -> ReminderResult<DurationEstimate> {
    if let Some(status) = matrix.status.as_deref().filter(|status| *status != ELEMENT_OK) {
        return Err(ReminderError::service_unreachable(
            Service::Mapping,
            format!("request status {status}"),
        ));
    }

    let element = matrix.first_element().ok_or_else(|| {
        ReminderError::service_unreachable(Service::Mapping, "response contained no elements")
    })?;

    if element.status != ELEMENT_OK {
        log::info!("Mapping service reports no route. [status = {}]", element.status);
        return Err(ReminderError::RouteUnreachable {
            status: element.status.clone(),
        });
    }

    let duration = element.duration.ok_or_else(|| {
        ReminderError::service_unreachable(Service::Mapping, "OK element without a duration")
    })?;

    Ok(DurationEstimate::ok(EstimateSource::Mapping, duration.value))
}
