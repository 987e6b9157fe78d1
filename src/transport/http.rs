//! HTTP implementation of [`Transport`] over reqwest.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::errors::TransportError;
use crate::job::{InputSource, SubmissionPrefs, VoicePreference};
use crate::review::EditMap;
use crate::transport::{FinalResponse, Stage1Response, Transport};

/// Request body for `POST /process-final-stage`. Chunk indices are sent as
/// string keys, matching the backend's JSON object shape.
#[derive(Debug, Serialize)]
struct FinalStageRequest<'a> {
    job_id: &'a str,
    edited_translated_texts: BTreeMap<String, &'a str>,
    tts_voice: &'a str,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport against a server base URL such as
    /// `http://127.0.0.1:5000`. No request timeout is configured: an
    /// in-flight call is awaited until the server resolves or rejects it.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn build_stage1_form(
        &self,
        input: &InputSource,
        prefs: SubmissionPrefs,
    ) -> Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();

        match input {
            InputSource::File(path) => {
                let bytes =
                    tokio::fs::read(path)
                        .await
                        .map_err(|source| TransportError::InputRead {
                            path: path.clone(),
                            source,
                        })?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "video".to_string());
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime.essence_str())
                    .map_err(TransportError::Network)?;
                form = form.part("videoFile", part);
            }
            InputSource::Url(url) => {
                form = form.text("youtube_url", url.clone());
            }
        }

        Ok(form
            .text("tts_voice", prefs.voice.as_str())
            .text("reviewPreference", prefs.mode.as_str()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit_stage1(
        &self,
        input: &InputSource,
        prefs: SubmissionPrefs,
    ) -> Result<Stage1Response, TransportError> {
        let url = format!("{}/process-stage1", self.base_url);
        debug!(%url, mode = prefs.mode.as_str(), "submitting stage-1");

        let form = self.build_stage1_form(input, prefs).await?;
        let response = self.client.post(&url).multipart(form).send().await?;
        decode_json(response).await
    }

    async fn submit_final(
        &self,
        job_id: &str,
        edits: &EditMap,
        voice: VoicePreference,
    ) -> Result<FinalResponse, TransportError> {
        let url = format!("{}/process-final-stage", self.base_url);
        debug!(%url, job_id, chunks = edits.len(), "submitting final stage");

        let body = FinalStageRequest {
            job_id,
            edited_translated_texts: edits
                .iter()
                .map(|(index, text)| (index.to_string(), text.as_str()))
                .collect(),
            tts_voice: voice.as_str(),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        decode_json(response).await
    }

    fn chunk_url(&self, job_id: &str, audio_chunk: &str) -> String {
        format!("{}/serve-chunk/{}/{}", self.base_url, job_id, audio_chunk)
    }

    fn artifact_url(&self, filename: &str) -> String {
        format!("{}/final_video/{}", self.base_url, filename)
    }
}

/// Decode a 2xx body as `T`, or turn any other outcome into a
/// [`TransportError`] with the best available human-readable message.
async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(TransportError::Server {
            status: status.as_u16(),
            message: extract_error_message(&body, status.as_u16()),
        });
    }

    serde_json::from_str(&body).map_err(|_| TransportError::UnexpectedResponse { body })
}

/// Message preference order: structured `message` field, raw body text,
/// generic `"Server error: <status>"`.
fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(|m| m.as_str())
    {
        return message.to_string();
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    format!("Server error: {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::ReviewMode;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prefs(mode: ReviewMode) -> SubmissionPrefs {
        SubmissionPrefs {
            voice: VoicePreference::Female,
            mode,
        }
    }

    fn temp_video() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("clip.mp4")).unwrap();
        file.write_all(b"not really a video").unwrap();
        dir
    }

    #[test]
    fn error_message_prefers_structured_field() {
        let body = r#"{"message": "Job not found"}"#;
        assert_eq!(extract_error_message(body, 404), "Job not found");
    }

    #[test]
    fn error_message_falls_back_to_raw_text() {
        assert_eq!(extract_error_message("Internal Server Error", 500), "Internal Server Error");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(extract_error_message("", 502), "Server error: 502");
        // JSON without a message field also falls through to the raw text.
        assert_eq!(extract_error_message(r#"{"detail": "x"}"#, 500), r#"{"detail": "x"}"#);
    }

    #[test]
    fn url_templates() {
        let transport = HttpTransport::new("http://localhost:5000/");
        assert_eq!(
            transport.chunk_url("job1", "chunk_0.wav"),
            "http://localhost:5000/serve-chunk/job1/chunk_0.wav"
        );
        assert_eq!(
            transport.artifact_url("out.mp4"),
            "http://localhost:5000/final_video/out.mp4"
        );
    }

    #[tokio::test]
    async fn stage1_url_submission_decodes_direct_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-stage1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "mode": "direct",
                "message": "Video processing complete!",
                "final_video_filename": "clip_translated.mp4"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let input = InputSource::Url("https://youtu.be/abc".into());
        let resp = transport
            .submit_stage1(&input, prefs(ReviewMode::Direct))
            .await
            .unwrap();
        assert!(matches!(resp, Stage1Response::Direct { .. }));
    }

    #[tokio::test]
    async fn stage1_file_submission_sends_multipart_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-stage1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "mode": "review",
                "review_data": {"job_id": "j1", "chunks": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = temp_video();
        let transport = HttpTransport::new(server.uri());
        let input = InputSource::File(dir.path().join("clip.mp4"));
        transport
            .submit_stage1(&input, prefs(ReviewMode::Review))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"videoFile\""));
        assert!(body.contains("filename=\"clip.mp4\""));
        assert!(body.contains("name=\"tts_voice\""));
        assert!(body.contains("female"));
        assert!(body.contains("name=\"reviewPreference\""));
        assert!(body.contains("review"));
    }

    #[tokio::test]
    async fn stage1_surfaces_structured_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-stage1"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "YouTube download failed"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let input = InputSource::Url("https://youtu.be/abc".into());
        let err = transport
            .submit_stage1(&input, prefs(ReviewMode::Direct))
            .await
            .unwrap_err();
        match err {
            TransportError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "YouTube download failed");
            }
            other => panic!("Expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stage1_rejects_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-stage1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"mode": "mystery"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let input = InputSource::Url("https://youtu.be/abc".into());
        let err = transport
            .submit_stage1(&input, prefs(ReviewMode::Direct))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn final_stage_sends_string_keyed_edit_map() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-final-stage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Video processing complete!",
                "final_video_filename": "clip_translated.mp4"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let mut edits = EditMap::new();
        edits.insert(0, "A".to_string());
        edits.insert(1, "B2".to_string());
        let resp = transport
            .submit_final("j1", &edits, VoicePreference::Male)
            .await
            .unwrap();
        assert_eq!(resp.final_video_filename.as_deref(), Some("clip_translated.mp4"));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["job_id"], "j1");
        assert_eq!(body["tts_voice"], "male");
        assert_eq!(body["edited_translated_texts"]["0"], "A");
        assert_eq!(body["edited_translated_texts"]["1"], "B2");
    }

    #[tokio::test]
    async fn missing_file_is_an_input_read_error() {
        let transport = HttpTransport::new("http://127.0.0.1:1");
        let input = InputSource::File("/nonexistent/clip.mp4".into());
        let err = transport
            .submit_stage1(&input, prefs(ReviewMode::Direct))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::InputRead { .. }));
    }
}
