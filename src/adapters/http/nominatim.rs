//! Nominatim reverse geocoder
//!
//! Implements the `ReverseGeocoder` port trait. Lookups are best effort
//! and only feed the address shown to the student.

use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::GeocodingConfig;
use crate::core::models::{GeoCoordinate, LocationDetails};
use crate::core::ports::ReverseGeocoder;

/// `/reverse?format=json&addressdetails=1` reply
#[derive(Debug, Default, Deserialize)]
pub struct ReverseReply {
    /// Full formatted address
    #[serde(default)]
    pub display_name: Option<String>,
    /// Address components
    #[serde(default)]
    pub address: Option<Address>,
}

/// Address components used for display
#[derive(Debug, Default, Deserialize)]
#[allow(missing_docs)]
pub struct Address {
    pub road: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
}

impl From<ReverseReply> for LocationDetails {
    fn from(reply: ReverseReply) -> Self {
        let Some(address) = reply.address else {
            return Self::unknown();
        };

        let suburb = [
            address.suburb,
            address.neighbourhood,
            address.city,
            address.town,
            address.village,
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default();

        Self {
            display_name: reply.display_name.unwrap_or_default(),
            street: address.road.unwrap_or_default(),
            suburb,
        }
    }
}

/// Reverse geocoder client
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    reverse_url: Url,
}

impl NominatimGeocoder {
    /// Create a client for the configured service
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(5))
            .build()?;
        let reverse = format!("{}/reverse", config.base_url.trim_end_matches('/'));
        let reverse_url = Url::parse(&reverse)
            .map_err(|e| anyhow::anyhow!("Invalid geocoding URL {reverse:?}: {e}"))?;

        Ok(Self {
            client,
            reverse_url,
        })
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn lookup(&self, position: GeoCoordinate) -> anyhow::Result<LocationDetails> {
        let mut url = self.reverse_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &position.latitude.to_string())
            .append_pair("lon", &position.longitude.to_string())
            .append_pair("addressdetails", "1");

        log::debug!("GET {url}");
        let reply: ReverseReply = self.client.get(url).send()?.error_for_status()?.json()?;
        Ok(reply.into())
    }
}
