use super::client::GeminiHttpClient;
use crate::ai::ImageGenerationService;
use crate::models::{GenerationRequest, ImageArtifact};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format requested from the provider for every generation.
const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Exactly one image per generation; the studio renders a single result.
const SAMPLE_COUNT: u32 = 1;

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

/// Text-to-image client backed by an Imagen `predict` endpoint.
pub struct GeminiGenerateClient {
    http: GeminiHttpClient,
}

impl GeminiGenerateClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiGenerateClient);

#[async_trait]
impl ImageGenerationService for GeminiGenerateClient {
    async fn generate_image(&self, request: &GenerationRequest) -> Result<ImageArtifact> {
        let wire_request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: SAMPLE_COUNT,
                aspect_ratio: request.aspect_ratio.as_str().to_string(),
                output_mime_type: OUTPUT_MIME_TYPE.to_string(),
            },
        };

        let response: PredictResponse = self.http.predict(&wire_request).await?;

        let (encoded, mime_type) = response
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded.map(|encoded| (encoded, p.mime_type)))
            .ok_or_else(|| Error::AiProvider("No image produced by generation".to_string()))?;
        let mime_type = mime_type.unwrap_or_else(|| OUTPUT_MIME_TYPE.to_string());

        tracing::debug!("Generation returned image with mime_type: {}", mime_type);

        use base64::Engine as _;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .map_err(|e| Error::AiProvider(format!("Failed to decode base64 image: {}", e)))?;

        Ok(ImageArtifact::new(bytes, mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::models::AspectRatio;
    use wiremock::{MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "imagen-4.0-generate-001";

    fn make_client(server: &MockServer) -> GeminiGenerateClient {
        GeminiGenerateClient::new("key".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url(server.uri())
    }

    fn square_request(prompt: &str) -> GenerationRequest {
        GenerationRequest::new(prompt, AspectRatio::Square)
    }

    #[tokio::test]
    async fn test_generate_image_parses_prediction() {
        let server = MockServer::start().await;

        use base64::Engine as _;
        let fake_image = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let b64 = base64::engine::general_purpose::STANDARD.encode(&fake_image);

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{
                    "bytesBase64Encoded": b64,
                    "mimeType": "image/jpeg"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let artifact = client
            .generate_image(&square_request("a lighthouse at dusk"))
            .await
            .unwrap();
        assert_eq!(artifact.data, fake_image);
        assert_eq!(artifact.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_request_carries_aspect_ratio_and_single_sample() {
        let server = MockServer::start().await;

        use base64::Engine as _;
        let b64 = base64::engine::general_purpose::STANDARD.encode([0x00]);

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .and(wiremock::matchers::body_string_contains(
                "\"aspectRatio\":\"16:9\"",
            ))
            .and(wiremock::matchers::body_string_contains("\"sampleCount\":1"))
            .and(wiremock::matchers::body_string_contains(
                "\"outputMimeType\":\"image/jpeg\"",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": b64, "mimeType": "image/jpeg" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);
        client
            .generate_image(&GenerationRequest::new("test", AspectRatio::Wide))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_mime_type_defaults_to_jpeg() {
        let server = MockServer::start().await;

        use base64::Engine as _;
        let b64 = base64::engine::general_purpose::STANDARD.encode([0x01, 0x02]);

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": b64 }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let artifact = client.generate_image(&square_request("test")).await.unwrap();
        assert_eq!(artifact.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client
            .generate_image(&square_request("a lighthouse"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_empty_predictions_rejected() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "predictions": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.generate_image(&square_request("test")).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert!(err.to_string().contains("No image produced"));
    }

    #[tokio::test]
    async fn test_invalid_base64_rejected() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": "!!!not-base64!!!" }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.generate_image(&square_request("test")).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
