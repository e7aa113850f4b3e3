use anshin_core::errors::{AnshinResult, SourceError};
use anshin_core::geo::GeoPoint;
use anshin_core::traits::{PlaceHit, PlaceQuery, PlaceSearch};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::transport::HttpClient;

const FIELD_MASK: &str = "places.id,places.name,places.displayName,places.formattedAddress,\
places.location,places.editorialSummary,places.photos,places.nationalPhoneNumber,\
places.internationalPhoneNumber,places.regularOpeningHours,places.websiteUri,\
places.parkingOptions,places.accessibilityOptions";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchTextResponse {
    places: Vec<ApiPlace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiPlace {
    id: Option<String>,
    name: Option<String>,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    location: Option<LatLng>,
    editorial_summary: Option<LocalizedText>,
    photos: Vec<ApiPhoto>,
    national_phone_number: Option<String>,
    international_phone_number: Option<String>,
    regular_opening_hours: Option<OpeningHours>,
    website_uri: Option<String>,
    parking_options: Option<ParkingOptions>,
    accessibility_options: Option<AccessibilityOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocalizedText {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPhoto {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OpeningHours {
    weekday_descriptions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ParkingOptions {
    free_parking_lot: Option<bool>,
    paid_parking_lot: Option<bool>,
    free_street_parking: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AccessibilityOptions {
    wheelchair_accessible_entrance: Option<bool>,
}

impl ApiPlace {
    fn into_hit(self) -> PlaceHit {
        let place_id = self.id.or_else(|| {
            self.name
                .as_deref()
                .map(|n| n.trim_start_matches("places/").to_string())
        });
        let name = self
            .display_name
            .map(|d| d.text)
            .filter(|t| !t.trim().is_empty())
            .or(self.name)
            .unwrap_or_default();
        let opening_hours = self
            .regular_opening_hours
            .map(|h| h.weekday_descriptions.join("\n"))
            .filter(|h| !h.is_empty());
        let parking = self.parking_options.map(|p| {
            [p.free_parking_lot, p.paid_parking_lot, p.free_street_parking]
                .iter()
                .any(|v| *v == Some(true))
        });

        PlaceHit {
            place_id,
            name,
            address: self.formatted_address,
            location: self.location.map(|l| GeoPoint::new(l.latitude, l.longitude)),
            photos: self.photos.into_iter().map(|p| p.name).filter(|n| !n.is_empty()).collect(),
            phone: self.national_phone_number.or(self.international_phone_number),
            opening_hours,
            website: self.website_uri,
            summary: self.editorial_summary.map(|s| s.text).filter(|s| !s.is_empty()),
            parking,
            wheelchair_accessible: self
                .accessibility_options
                .and_then(|a| a.wheelchair_accessible_entrance),
        }
    }
}

/// Places text search over the HTTP API.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: HttpClient,
    endpoint: String,
    api_key: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(http: HttpClient, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &PlaceQuery) -> AnshinResult<Vec<PlaceHit>> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(SourceError::MissingCredential {
                name: "GOOGLE_MAPS_API_KEY".to_string(),
            }
            .into());
        };

        let mut body = json!({
            "textQuery": query.text,
            "maxResultCount": query.max_results,
            "languageCode": "ja",
        });
        if let Some((center, radius)) = query.location_bias {
            body["locationBias"] = json!({
                "circle": {
                    "center": { "latitude": center.lat, "longitude": center.lng },
                    "radius": f64::from(radius),
                }
            });
        }

        let headers = [("X-Goog-Api-Key", key), ("X-Goog-FieldMask", FIELD_MASK)];
        let resp: SearchTextResponse = self.http.post_json(&self.endpoint, &headers, &body).await?;
        tracing::debug!(query = %query.text, results = resp.places.len(), "places search");

        Ok(resp.places.into_iter().map(ApiPlace::into_hit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_api_place_to_hit() {
        let raw = serde_json::json!({
            "name": "places/abc",
            "displayName": { "text": "米粉カフェ" },
            "formattedAddress": "福岡市中央区天神1-1",
            "location": { "latitude": 33.59, "longitude": 130.40 },
            "photos": [{ "name": "places/abc/photos/p1" }],
            "regularOpeningHours": { "weekdayDescriptions": ["月曜日: 9時00分～17時00分"] },
            "parkingOptions": { "freeParkingLot": false, "paidParkingLot": true },
            "accessibilityOptions": { "wheelchairAccessibleEntrance": true }
        });
        let place: ApiPlace = serde_json::from_value(raw).unwrap();
        let hit = place.into_hit();
        assert_eq!(hit.place_id.as_deref(), Some("abc"));
        assert_eq!(hit.name, "米粉カフェ");
        assert_eq!(hit.photos, vec!["places/abc/photos/p1".to_string()]);
        assert_eq!(hit.parking, Some(true));
        assert_eq!(hit.wheelchair_accessible, Some(true));
        assert!(hit.opening_hours.unwrap().starts_with("月曜日"));
    }

    #[test]
    fn unavailable_without_key() {
        let http = HttpClient::new(Default::default()).unwrap();
        let client = GooglePlacesClient::new(http, "http://localhost/x", Some("  ".into()));
        assert!(!client.is_available());
    }
}
