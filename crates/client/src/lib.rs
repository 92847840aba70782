//! Typed client for the Event Buddy HTTP API.
//!
//! This is the Rust counterpart of the mobile app's fetch wrapper: one method
//! per endpoint, a cookie store so the session survives across calls, and the
//! `{success, ...}` envelope normalized into `Result` values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false`.
    #[error("{0}")]
    Api(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// An event as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub our_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image: String,
    pub category: Option<String>,
    pub max_attendees: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Fields sent when creating or updating an event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    message: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_url: String,
    pub filename: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OurIdBody {
    our_id: i64,
}

/// Cookie-carrying client for one Event Buddy server.
pub struct EventBuddyClient {
    base_url: String,
    http: reqwest::Client,
}

impl EventBuddyClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode the response envelope, turning `success: false` into an error.
    async fn unwrap_envelope(response: reqwest::Response) -> ClientResult<serde_json::Value> {
        let envelope: Envelope = response.json().await?;
        if envelope.success {
            Ok(envelope.rest)
        } else {
            Err(ClientError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            ))
        }
    }

    fn field<T: serde::de::DeserializeOwned>(
        mut payload: serde_json::Value,
        key: &str,
    ) -> ClientResult<T> {
        let value = payload
            .get_mut(key)
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value)
            .map_err(|e| ClientError::Api(format!("unexpected response shape: {e}")))
    }

    pub async fn signup(&self, email: &str, password: &str) -> ClientResult<()> {
        let response = self
            .http
            .get(self.url("/signup"))
            .query(&[("email", email), ("pass", password)])
            .send()
            .await?;
        Self::unwrap_envelope(response).await?;
        Ok(())
    }

    /// Sign in; the session cookie is captured by the cookie store and sent
    /// on every following call.
    pub async fn signin(&self, email: &str, password: &str) -> ClientResult<()> {
        let response = self
            .http
            .get(self.url("/signin"))
            .query(&[("email", email), ("pass", password)])
            .send()
            .await?;
        Self::unwrap_envelope(response).await?;
        Ok(())
    }

    pub async fn signout(&self) -> ClientResult<()> {
        let response = self.http.get(self.url("/signout")).send().await?;
        Self::unwrap_envelope(response).await?;
        Ok(())
    }

    pub async fn events(&self) -> ClientResult<Vec<EventView>> {
        let response = self.http.get(self.url("/")).send().await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "events")
    }

    pub async fn sorted_events(&self) -> ClientResult<Vec<EventView>> {
        let response = self.http.get(self.url("/sortedEvents")).send().await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "events")
    }

    pub async fn event(&self, our_id: i64) -> ClientResult<EventView> {
        let response = self
            .http
            .post(self.url("/getSpecificEvent"))
            .json(&OurIdBody { our_id })
            .send()
            .await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "event")
    }

    pub async fn add_event(&self, fields: EventFields) -> ClientResult<EventView> {
        let response = self
            .http
            .post(self.url("/addEvent"))
            .json(&fields)
            .send()
            .await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "event")
    }

    pub async fn update_event(&self, our_id: i64, fields: EventFields) -> ClientResult<EventView> {
        let response = self
            .http
            .post(self.url("/updateSpecificEvent"))
            .query(&[("ourId", our_id)])
            .json(&fields)
            .send()
            .await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "event")
    }

    pub async fn delete_event(&self, our_id: i64) -> ClientResult<()> {
        let response = self
            .http
            .post(self.url("/deleteSpecificEvent"))
            .query(&[("ourId", our_id)])
            .send()
            .await?;
        Self::unwrap_envelope(response).await?;
        Ok(())
    }

    pub async fn join_event(&self, our_id: i64) -> ClientResult<()> {
        let response = self
            .http
            .post(self.url("/joinEvent"))
            .json(&OurIdBody { our_id })
            .send()
            .await?;
        Self::unwrap_envelope(response).await?;
        Ok(())
    }

    pub async fn leave_event(&self, our_id: i64) -> ClientResult<()> {
        let response = self
            .http
            .post(self.url("/leaveEvent"))
            .json(&OurIdBody { our_id })
            .send()
            .await?;
        Self::unwrap_envelope(response).await?;
        Ok(())
    }

    pub async fn my_created_events(&self) -> ClientResult<Vec<EventView>> {
        let response = self.http.get(self.url("/myCreatedEvents")).send().await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "createdEvents")
    }

    pub async fn my_joined_events(&self) -> ClientResult<Vec<EventView>> {
        let response = self.http.get(self.url("/myJoinedEvents")).send().await?;
        let payload = Self::unwrap_envelope(response).await?;
        Self::field(payload, "joinedEvents")
    }

    /// Upload an image; returns the URL to store in an event's `image` field.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime: &str,
    ) -> ClientResult<UploadedImage> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(self.url("/upload-image"))
            .multipart(form)
            .send()
            .await?;
        let payload = Self::unwrap_envelope(response).await?;
        serde_json::from_value(payload)
            .map_err(|e| ClientError::Api(format!("unexpected response shape: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_failure_becomes_api_error() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": false, "message": "Event not found"}"#).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Event not found"));
    }

    #[test]
    fn event_view_decodes_api_shape() {
        let json = r#"{
            "ourId": 3,
            "title": "Meetup",
            "description": null,
            "location": "Oslo",
            "date": "2026-06-01T10:00:00Z",
            "endDate": null,
            "image": "https://placehold.co/600x400?text=No+Image",
            "category": null,
            "maxAttendees": 20,
            "createdAt": "2026-05-01T09:00:00Z"
        }"#;
        let event: EventView = serde_json::from_str(json).unwrap();
        assert_eq!(event.our_id, 3);
        assert_eq!(event.max_attendees, Some(20));
    }

    #[test]
    fn event_fields_omits_absent_values() {
        let fields = EventFields {
            title: Some("New".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
    }
}
