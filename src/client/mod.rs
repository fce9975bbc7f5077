//! Client side of the trip pipeline: the API seam, the saved-itinerary
//! panel and the orchestrator that drives the trip view.

#[cfg(test)]
pub(crate) mod fake;
pub mod itineraries;
pub mod orchestrator;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::ClientError,
    models::{
        catalog::Airport,
        itinerary::{ItineraryList, ItineraryResponse, SaveItineraryRequest, SaveItineraryResponse},
        trip::{TripRequest, TripResponse},
    },
};

/// Endpoints the pipeline consumes.
#[async_trait]
pub trait TripApi: Send + Sync {
    async fn airports(&self) -> Result<Vec<Airport>, ClientError>;
    async fn destinations(&self) -> Result<Vec<String>, ClientError>;
    /// Non-2xx answers that carry a body come back with `success == false`.
    async fn create_trip(&self, trip: &TripRequest) -> Result<TripResponse, ClientError>;
    async fn list_itineraries(&self) -> Result<ItineraryList, ClientError>;
    async fn load_itinerary(&self, name: &str) -> Result<ItineraryResponse, ClientError>;
    async fn save_itinerary(
        &self,
        request: &SaveItineraryRequest,
    ) -> Result<SaveItineraryResponse, ClientError>;
}

#[async_trait]
impl<T: TripApi + ?Sized> TripApi for Arc<T> {
    async fn airports(&self) -> Result<Vec<Airport>, ClientError> {
        (**self).airports().await
    }

    async fn destinations(&self) -> Result<Vec<String>, ClientError> {
        (**self).destinations().await
    }

    async fn create_trip(&self, trip: &TripRequest) -> Result<TripResponse, ClientError> {
        (**self).create_trip(trip).await
    }

    async fn list_itineraries(&self) -> Result<ItineraryList, ClientError> {
        (**self).list_itineraries().await
    }

    async fn load_itinerary(&self, name: &str) -> Result<ItineraryResponse, ClientError> {
        (**self).load_itinerary(name).await
    }

    async fn save_itinerary(
        &self,
        request: &SaveItineraryRequest,
    ) -> Result<SaveItineraryResponse, ClientError> {
        (**self).save_itinerary(request).await
    }
}

/// Responses whose failure details travel in the body.
trait Reply {
    fn mark_failed(&mut self);
}

impl Reply for TripResponse {
    fn mark_failed(&mut self) {
        self.success = false;
    }
}

impl Reply for ItineraryResponse {
    fn mark_failed(&mut self) {
        self.success = false;
    }
}

impl Reply for SaveItineraryResponse {
    fn mark_failed(&mut self) {
        self.success = false;
    }
}

#[derive(Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: Url::parse(base_url)?,
        })
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_strict<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.http.get(self.endpoint(segments)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }
}

async fn decode_reply<T: DeserializeOwned + Reply>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    match serde_json::from_slice::<T>(&body) {
        Ok(mut reply) => {
            if !status.is_success() {
                reply.mark_failed();
            }
            Ok(reply)
        }
        Err(_) if !status.is_success() => Err(ClientError::Status(status)),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl TripApi for HttpApi {
    async fn airports(&self) -> Result<Vec<Airport>, ClientError> {
        self.get_strict(&["api", "airports"]).await
    }

    async fn destinations(&self) -> Result<Vec<String>, ClientError> {
        self.get_strict(&["api", "destinations"]).await
    }

    async fn create_trip(&self, trip: &TripRequest) -> Result<TripResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "trip"])?)
            .json(trip)
            .send()
            .await?;
        decode_reply(response).await
    }

    async fn list_itineraries(&self) -> Result<ItineraryList, ClientError> {
        self.get_strict(&["api", "itineraries"]).await
    }

    async fn load_itinerary(&self, name: &str) -> Result<ItineraryResponse, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "itineraries", name])?)
            .send()
            .await?;
        decode_reply(response).await
    }

    async fn save_itinerary(
        &self,
        request: &SaveItineraryRequest,
    ) -> Result<SaveItineraryResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "itineraries", "save"])?)
            .json(request)
            .send()
            .await?;
        decode_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_each_segment() {
        let api = HttpApi::new("http://127.0.0.1:5000").unwrap();
        let url = api.endpoint(&["api", "itineraries", "Spring break/2027"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/api/itineraries/Spring%20break%2F2027"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = HttpApi::new("http://localhost/planner/").unwrap();
        let url = api.endpoint(&["api", "trip"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/planner/api/trip");
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let api = HttpApi::new("mailto:someone@example.com").unwrap();
        assert!(matches!(api.endpoint(&["api"]), Err(ClientError::BaseUrl)));
    }
}
