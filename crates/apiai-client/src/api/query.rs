//! Query API.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::client::ApiAiClient;
use crate::error::Result;
use crate::types::{QueryRequest, QueryResponse};

/// Query API client.
pub struct QueryApi {
    client: ApiAiClient,
}

impl QueryApi {
    pub(crate) fn new(client: ApiAiClient) -> Self {
        Self { client }
    }

    /// Submit a text query.
    pub async fn text(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.client.post("query", &request).await
    }

    /// Submit a text query in an existing session (convenience method).
    pub async fn text_message(
        &self,
        text: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Result<QueryResponse> {
        self.text(QueryRequest::text(text).with_session(session_id))
            .await
    }

    /// Submit a voice query from a WAV file (16000 Hz, signed 16-bit PCM,
    /// mono). The file is sent as a `voiceData` multipart field alongside a
    /// `request` field carrying the serialized request.
    ///
    /// This endpoint requires a paid plan on the service side.
    pub async fn voice(
        &self,
        request: QueryRequest,
        wav_path: impl AsRef<Path>,
    ) -> Result<QueryResponse> {
        let wav_path = wav_path.as_ref();
        let file_name = wav_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "voice.wav".to_string());

        // Read the file before building the form so a bad path fails as an
        // I/O error without any network traffic.
        let voice_data = tokio::fs::read(wav_path).await?;
        let request_json = serde_json::to_string(&request)?;

        let form = Form::new()
            .part("request", Part::text(request_json).mime_str("application/json")?)
            .part(
                "voiceData",
                Part::bytes(voice_data)
                    .file_name(file_name)
                    .mime_str("audio/wav")?,
            );

        self.client.post_multipart("query", form).await
    }
}
