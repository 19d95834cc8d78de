use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageEditService;
use crate::models::{EditPart, ImageArtifact};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct EditRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: EditGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditGenerationConfig {
    response_modalities: Vec<String>,
}

/// Image-editing client backed by a Gemini `generateContent` endpoint.
pub struct GeminiEditClient {
    http: GeminiHttpClient,
}

impl GeminiEditClient {
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
super::impl_with_gemini_base_url!(GeminiEditClient);

#[async_trait]
impl ImageEditService for GeminiEditClient {
    async fn edit_image(
        &self,
        source: &ImageArtifact,
        instruction: &str,
    ) -> Result<Vec<EditPart>> {
        tracing::debug!(
            "Sending edit request ({} source bytes, mime {})",
            source.data.len(),
            source.mime_type
        );

        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&source.data);

        let request = EditRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: source.mime_type.clone(),
                            data: encoded,
                        },
                    },
                    Part::Text {
                        text: instruction.to_string(),
                    },
                ],
            }],
            generation_config: EditGenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No candidates in edit response".to_string()))?;

        // Arrival order matters to the caller; map parts one-for-one.
        let mut parts = Vec::with_capacity(candidate.content.parts.len());
        for part in candidate.content.parts {
            match part {
                Part::Text { text } => parts.push(EditPart::Text(text)),
                Part::InlineData { inline_data } => {
                    let bytes = base64::engine::general_purpose::STANDARD
                        .decode(&inline_data.data)
                        .map_err(|e| {
                            Error::AiProvider(format!("Failed to decode edited image: {}", e))
                        })?;
                    parts.push(EditPart::Image(ImageArtifact::new(
                        bytes,
                        inline_data.mime_type,
                    )));
                }
            }
        }

        Ok(parts)
    }
}
