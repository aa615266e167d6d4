//! Request and response types for the api.ai v1 API.
//!
//! These types mirror the remote service's JSON schema field for field. The
//! client performs no validation beyond what serde enforces; invariants are
//! owned by the remote service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Query requests
// ─────────────────────────────────────────────────────────────────────────────

/// A text or voice query request.
///
/// The API version is carried in the request URL (`v=<date>`), never in the
/// body, so it does not appear here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Natural language text to process. Multiple variants of the same
    /// query may be sent; the service scores each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<String>,
    /// Event to trigger instead of (or in addition to) a text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    /// Session ID. Queries sharing a session share active contexts.
    pub session_id: String,
    /// Query language code (e.g. `en`).
    pub lang: String,
    /// Contexts to activate before the query is processed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<Context>,
    /// Whether to clear all active contexts before processing.
    #[serde(default)]
    pub reset_contexts: bool,
    /// Session-scoped entity overrides.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityDescription>,
    /// IANA timezone name (e.g. `America/New_York`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Geographic coordinates of the end user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// The originating platform request, for platform-specific replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_request: Option<OriginalRequest>,
}

/// Default query language.
pub const DEFAULT_LANGUAGE: &str = "en";

impl QueryRequest {
    /// Create a request for a single text query in the default language.
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: vec![query.into()],
            lang: DEFAULT_LANGUAGE.to_string(),
            ..Default::default()
        }
    }

    /// Create a request that triggers an event instead of a text query.
    pub fn event(event: Event) -> Self {
        Self {
            event: Some(event),
            lang: DEFAULT_LANGUAGE.to_string(),
            ..Default::default()
        }
    }

    /// Set the session ID.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Set the query language.
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Add a context to activate for this query.
    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// Clear all active contexts before processing this query.
    pub fn with_reset_contexts(mut self) -> Self {
        self.reset_contexts = true;
        self
    }

    /// Set the user's timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Set the user's location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// An event that can trigger an intent without matching text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    /// Event name.
    pub name: String,
    /// Event parameters.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,
}

impl Event {
    /// Create a named event with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: HashMap::new(),
        }
    }
}

/// A named, time-limited parameter bag carried across queries in a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    /// Context name.
    pub name: String,
    /// Number of queries the context stays active for.
    #[serde(default)]
    pub lifespan: i32,
    /// Context parameters.
    #[serde(default, rename = "parameters", skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

impl Context {
    /// Create a named context with the given lifespan and no parameters.
    pub fn new(name: impl Into<String>, lifespan: i32) -> Self {
        Self {
            name: name.into(),
            lifespan,
            params: HashMap::new(),
        }
    }
}

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// The request as received from the originating platform (e.g. a messenger
/// integration), passed through for platform-specific fulfilment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OriginalRequest {
    /// Platform source identifier.
    pub source: String,
    /// Platform-specific payload.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Entities
// ─────────────────────────────────────────────────────────────────────────────

/// Summary info for a developer entity, as returned by the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDescription {
    /// Entity ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Entity name.
    pub name: String,
    /// Number of entries.
    #[serde(default)]
    pub count: i32,
    /// Preview of entry values.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub preview: String,
}

/// A developer entity with its full entry list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity ID. Assigned by the service on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity name.
    pub name: String,
    /// Entity entries.
    #[serde(default)]
    pub entries: Vec<EntityEntry>,
    /// Whether the entity is an enum (entries carry no synonyms).
    #[serde(default)]
    pub is_enum: bool,
    /// Whether the service may match values not listed in `entries`.
    #[serde(default)]
    pub automated_expansion: bool,
}

impl Entity {
    /// Create a named entity with no entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an entry.
    pub fn with_entry(mut self, entry: EntityEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// A single entity entry: a canonical value and its synonyms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityEntry {
    /// Canonical value.
    pub value: String,
    /// Synonyms that resolve to the canonical value.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl EntityEntry {
    /// Create an entry with a canonical value and synonyms.
    pub fn new(
        value: impl Into<String>,
        synonyms: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            value: value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query responses
// ─────────────────────────────────────────────────────────────────────────────

/// Response to a text or voice query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Response ID.
    #[serde(default)]
    pub id: String,
    /// Response timestamp (ISO 8601).
    #[serde(default)]
    pub timestamp: String,
    /// Language the query was processed in.
    #[serde(default)]
    pub lang: String,
    /// Query result.
    #[serde(default)]
    pub result: QueryResult,
    /// Request status. May carry a non-success code even inside a 2xx
    /// response for query-level failures.
    #[serde(default)]
    pub status: Status,
    /// Session ID the query was processed under.
    #[serde(default)]
    pub session_id: String,
}

/// The matched intent and its fulfilment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Source agent that produced the result.
    #[serde(default)]
    pub source: String,
    /// The query as understood by the service.
    #[serde(default)]
    pub resolved_query: String,
    /// Action name of the matched intent.
    #[serde(default)]
    pub action: String,
    /// Whether required parameters are still missing.
    #[serde(default)]
    pub action_incomplete: bool,
    /// Extracted parameter values.
    #[serde(default, rename = "parameters")]
    pub params: HashMap<String, String>,
    /// Output contexts active after this query.
    #[serde(default)]
    pub contexts: Vec<Context>,
    /// Structured response payload.
    #[serde(default)]
    pub fulfillment: Fulfillment,
    /// Matching confidence (0.0 - 1.0).
    #[serde(default)]
    pub score: f64,
    /// Matched intent metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Metadata about the matched intent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Matched intent ID.
    #[serde(default)]
    pub intent_id: String,
    /// Matched intent name.
    #[serde(default)]
    pub intent_name: String,
    /// Whether a webhook was called for fulfilment ("true"/"false").
    #[serde(default)]
    pub webhook_used: String,
}

/// Structured response payload: speech text plus rich message cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fulfillment {
    /// Text to be spoken or displayed.
    #[serde(default)]
    pub speech: String,
    /// Rich messages.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A rich response message. The `message_type` discriminant selects which of
/// the remaining fields are populated: 0 text, 1 card, 2 quick replies,
/// 3 image, 4 custom payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message type discriminant.
    #[serde(rename = "type")]
    pub message_type: i32,
    /// Speech text (type 0).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub speech: String,
    /// Image URL (types 1 and 3).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    /// Card title (types 1 and 2).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Card subtitle (type 1).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    /// Card buttons (type 1).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<CardButton>,
    /// Quick replies (type 2).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<String>,
    /// Custom payload (type 4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// A button on a rich message card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardButton {
    /// Button label.
    pub text: String,
    /// Text or URL sent back when the button is pressed.
    #[serde(default)]
    pub postback: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Request status block, present on every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// HTTP-style status code.
    pub code: u16,
    /// Error type (`success` when the request succeeded).
    #[serde(default)]
    pub error_type: String,
    /// Error ID, set on some failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    /// Human-readable error details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl Status {
    /// Whether the status code indicates success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self {
            code: 200,
            error_type: "success".to_string(),
            error_id: None,
            error_details: None,
        }
    }
}

/// Response to context and entity write operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// ID of the created or affected resource, when the service assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Request status.
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_serialization_skips_empty_fields() {
        let request = QueryRequest::text("hello").with_session("session-1");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["query"], serde_json::json!(["hello"]));
        assert_eq!(json["sessionId"], "session-1");
        assert_eq!(json["lang"], "en");
        assert!(json.get("event").is_none());
        assert!(json.get("contexts").is_none());
        assert!(json.get("timezone").is_none());
        assert!(json.get("location").is_none());
        assert!(json.get("originalRequest").is_none());
    }

    #[test]
    fn test_context_uses_wire_field_names() {
        let mut context = Context::new("weather", 5);
        context.params.insert("city".to_string(), "Paris".to_string());
        let json = serde_json::to_value(&context).unwrap();

        assert_eq!(json["name"], "weather");
        assert_eq!(json["lifespan"], 5);
        assert_eq!(json["parameters"]["city"], "Paris");
    }

    #[test]
    fn test_query_response_deserialization() {
        let body = r#"{
            "id": "b340a1f7-abee-4e13-9bdd-5e8938a48b7d",
            "timestamp": "2016-09-14T14:10:07.64Z",
            "lang": "en",
            "result": {
                "source": "agent",
                "resolvedQuery": "what is the weather in paris",
                "action": "weather.get",
                "actionIncomplete": false,
                "parameters": { "city": "Paris" },
                "contexts": [
                    { "name": "weather", "lifespan": 2, "parameters": { "city": "Paris" } }
                ],
                "metadata": {
                    "intentId": "51ee06e9-9ff5-428b-aafd-733bbd7e9978",
                    "intentName": "weather",
                    "webhookUsed": "true"
                },
                "fulfillment": {
                    "speech": "It is sunny in Paris.",
                    "messages": [
                        { "type": 0, "speech": "It is sunny in Paris." },
                        {
                            "type": 1,
                            "title": "Paris weather",
                            "subtitle": "Sunny, 24C",
                            "imageUrl": "https://example.com/sun.png",
                            "buttons": [ { "text": "Details", "postback": "https://example.com/paris" } ]
                        }
                    ]
                },
                "score": 0.87
            },
            "status": { "code": 200, "errorType": "success" },
            "sessionId": "session-1"
        }"#;

        let response: QueryResponse = serde_json::from_str(body).unwrap();
        assert!(response.status.is_success());
        assert_eq!(response.result.action, "weather.get");
        assert_eq!(response.result.params["city"], "Paris");
        assert_eq!(response.result.contexts[0].lifespan, 2);
        assert_eq!(response.result.fulfillment.speech, "It is sunny in Paris.");
        assert_eq!(response.result.fulfillment.messages[1].message_type, 1);
        assert_eq!(response.result.fulfillment.messages[1].buttons[0].text, "Details");
        assert_eq!(response.result.metadata.intent_name, "weather");
        assert_eq!(response.session_id, "session-1");
    }

    #[test]
    fn test_entity_wire_format() {
        let entity = Entity::new("city")
            .with_entry(EntityEntry::new("Paris", ["paris", "city of light"]));
        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(json["name"], "city");
        assert_eq!(json["isEnum"], false);
        assert_eq!(json["automatedExpansion"], false);
        assert_eq!(json["entries"][0]["value"], "Paris");
        assert_eq!(json["entries"][0]["synonyms"][1], "city of light");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_status_failure_code() {
        let status: Status = serde_json::from_str(
            r#"{ "code": 401, "errorType": "unauthorized", "errorDetails": "Authentication parameters missing" }"#,
        )
        .unwrap();
        assert!(!status.is_success());
        assert_eq!(status.error_type, "unauthorized");
    }
}
