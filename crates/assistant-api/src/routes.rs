//! Route definitions and handlers

use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use assistant_llm::generate_market_summary;

use crate::state::AppState;

/// Build the application router
///
/// CORS is wide open: the browser frontend is served from a different
/// origin in every deployment we run.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/summary", get(summary))
        .route("/prompt", get(prompt))
        .route("/transcribe", post(transcribe))
        .route("/speak", post(speak))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn home() -> Json<Value> {
    Json(json!({"message": "Finance assistant API is running."}))
}

#[derive(Debug, Deserialize)]
struct SummaryParams {
    ticker: String,
}

/// Market brief plus generated natural-language summary
async fn summary(State(state): State<AppState>, Query(params): Query<SummaryParams>) -> Json<Value> {
    let ticker = params.ticker.to_uppercase();
    info!(%ticker, "summary requested");

    // The brief itself never fails; sub-failures ride inside it.
    let brief = state.market.market_brief(&params.ticker).await;
    let raw_data = match serde_json::to_value(&brief) {
        Ok(value) => value,
        Err(err) => {
            return Json(json!({"error": format!("Error processing request: {err}")}));
        }
    };

    match generate_market_summary(state.generator.as_ref(), &raw_data).await {
        Ok(text) => Json(json!({
            "ticker": ticker,
            "summary": text,
            "raw_data": raw_data,
        })),
        Err(err) => Json(json!({"error": format!("Error processing request: {err}")})),
    }
}

#[derive(Debug, Deserialize)]
struct PromptParams {
    prompt: String,
}

/// Free-form prompt to the text backend
async fn prompt(State(state): State<AppState>, Query(params): Query<PromptParams>) -> Json<Value> {
    match state.generator.generate(&params.prompt).await {
        Ok(response) => Json(json!({
            "prompt": params.prompt,
            "response": response,
        })),
        Err(err) => Json(json!({"error": format!("AI prompt handling failed: {err}")})),
    }
}

/// Multipart audio upload, transcribed via the speech backend
///
/// The upload stays in memory; nothing is spooled to disk.
async fn transcribe(State(state): State<AppState>, mut multipart: Multipart) -> Json<Value> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    let file_name = field.file_name().unwrap_or("upload.wav").to_string();
                    match field.bytes().await {
                        Ok(bytes) => {
                            upload = Some((file_name, bytes.to_vec()));
                            break;
                        }
                        Err(err) => {
                            return Json(
                                json!({"error": format!("Transcription failed: {err}")}),
                            );
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                return Json(json!({"error": format!("Transcription failed: {err}")}));
            }
        }
    }

    let Some((file_name, bytes)) = upload else {
        return Json(json!({"error": "Transcription failed: no file field in upload"}));
    };

    match state.transcriber.transcribe(&file_name, bytes).await {
        Ok(text) => Json(json!({"transcription": text})),
        Err(err) => Json(json!({"error": format!("Transcription failed: {err}")})),
    }
}

#[derive(Debug, Deserialize)]
struct SpeakParams {
    text: String,
}

/// Speech synthesis; answers with the mp3 bytes themselves
async fn speak(State(state): State<AppState>, Query(params): Query<SpeakParams>) -> Response {
    match state.speech.synthesize(&params.text).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response(),
        Err(err) => {
            Json(json!({"error": format!("Speech synthesis failed: {err}")})).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use assistant_llm::{LLMError, TextGenerator};
    use assistant_market::{FinnhubClient, MarketConfig};
    use assistant_speech::{SpeechClient, TranscriptionClient, TtsConfig, WhisperConfig};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mockito::{Matcher, ServerGuard};
    use tower::ServiceExt;

    struct StubGenerator {
        reply: Option<String>,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> assistant_llm::Result<String> {
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(LLMError::RequestFailed("backend down".to_string())),
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn test_state(server: &ServerGuard, reply: Option<&str>) -> AppState {
        let market_config = MarketConfig::new("test-token").with_api_base(server.url());
        let whisper_config = WhisperConfig::new(server.url());
        let tts_config = TtsConfig::new("test-token").with_api_base(server.url());

        AppState {
            market: Arc::new(FinnhubClient::with_config(market_config).unwrap()),
            generator: Arc::new(StubGenerator {
                reply: reply.map(String::from),
            }),
            transcriber: Arc::new(TranscriptionClient::with_config(whisper_config).unwrap()),
            speech: Arc::new(SpeechClient::with_config(tts_config).unwrap()),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn mount_market_stubs(server: &mut ServerGuard) {
        server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .with_body(r#"{"c": 189.5, "o": 187.0, "h": 190.1, "l": 186.8, "pc": 186.2}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/stock/profile2")
            .match_query(Matcher::Any)
            .with_body(r#"{"name": "Apple Inc", "currency": "USD", "finnhubIndustry": "Technology"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/calendar/earnings")
            .match_query(Matcher::Any)
            .with_body(r#"{"earningsCalendar": [{"date": "2025-01-30", "epsEstimate": 2.35}]}"#)
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn home_reports_running() {
        let server = mockito::Server::new_async().await;
        let app = router(test_state(&server, Some("ok")));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Finance assistant API is running.");
    }

    #[tokio::test]
    async fn summary_wraps_brief_and_generated_text() {
        let mut server = mockito::Server::new_async().await;
        mount_market_stubs(&mut server).await;
        let app = router(test_state(&server, Some("Apple looks steady today.")));

        let response = app
            .oneshot(
                Request::get("/summary?ticker=aapl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["summary"], "Apple looks steady today.");
        assert_eq!(body["raw_data"]["summary"]["symbol"], "AAPL");
        assert_eq!(body["raw_data"]["history"], json!([]));
        assert_eq!(body["raw_data"]["earnings"]["date"], "2025-01-30");
    }

    #[tokio::test]
    async fn summary_generator_failure_is_error_payload() {
        let mut server = mockito::Server::new_async().await;
        mount_market_stubs(&mut server).await;
        let app = router(test_state(&server, None));

        let response = app
            .oneshot(
                Request::get("/summary?ticker=AAPL")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Error processing request:"));
    }

    #[tokio::test]
    async fn prompt_echoes_prompt_and_reply() {
        let server = mockito::Server::new_async().await;
        let app = router(test_state(&server, Some("EPS is earnings per share.")));

        let response = app
            .oneshot(
                Request::get("/prompt?prompt=what%20is%20eps")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["prompt"], "what is eps");
        assert_eq!(body["response"], "EPS is earnings per share.");
    }

    #[tokio::test]
    async fn transcribe_forwards_upload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/inference")
            .with_body(r#"{"text": "summarize apple"}"#)
            .create_async()
            .await;
        let app = router(test_state(&server, Some("ok")));

        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"q.wav\"\r\nContent-Type: audio/wav\r\n\r\nRIFFdata\r\n--{boundary}--\r\n"
        );
        let response = app
            .oneshot(
                Request::post("/transcribe")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["transcription"], "summarize apple");
    }

    #[tokio::test]
    async fn transcribe_without_file_is_error_payload() {
        let server = mockito::Server::new_async().await;
        let app = router(test_state(&server, Some("ok")));

        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
        );
        let response = app
            .oneshot(
                Request::post("/transcribe")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Transcription failed: no file field in upload"
        );
    }

    #[tokio::test]
    async fn speak_returns_audio_bytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/audio/speech")
            .with_body([0x49u8, 0x44, 0x33])
            .create_async()
            .await;
        let app = router(test_state(&server, Some("ok")));

        let response = app
            .oneshot(
                Request::post("/speak?text=hello")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/mpeg"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.to_vec(), vec![0x49u8, 0x44, 0x33]);
    }

    #[tokio::test]
    async fn speak_failure_is_error_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/audio/speech")
            .with_status(500)
            .create_async()
            .await;
        let app = router(test_state(&server, Some("ok")));

        let response = app
            .oneshot(
                Request::post("/speak?text=hello")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Speech synthesis failed:"));
    }
}
