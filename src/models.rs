//! Data models and structures
//!
//! Defines the core data structures for image artifacts, generation
//! requests, edit responses, and environment configuration.

use std::fmt;
use std::str::FromStr;

/// One rendered image: raw bytes plus the mime type reported by the
/// provider. Replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImageArtifact {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

/// Closed set of aspect ratios accepted by the generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Wide,
    Tall,
    Landscape,
    Portrait,
}

impl AspectRatio {
    /// Wire form expected by the provider (`"1:1"`, `"16:9"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Portrait => "3:4",
        }
    }

    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Wide,
        AspectRatio::Tall,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
    ];
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == input)
            .ok_or_else(|| {
                let options: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
                format!(
                    "Invalid aspect ratio '{}'. Expected one of: {}",
                    input,
                    options.join(", ")
                )
            })
    }
}

/// Parameters for one generation call. The image count (1) and output
/// format (`image/jpeg`) are fixed by the generation client.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio,
        }
    }
}

/// One part of an edit response, in provider order. The model may
/// interleave commentary text with the edited image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPart {
    Image(ImageArtifact),
    Text(String),
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub generate_model: String,
    pub edit_model: String,
    pub output_dir: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?,
            generate_model: std::env::var("GENERATE_MODEL")
                .unwrap_or_else(|_| "imagen-4.0-generate-001".to_string()),
            edit_model: std::env::var("EDIT_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()),
        })
    }
}
