//! Remote model client integration
//!
//! Capability traits for the hosted text-to-image and image-editing
//! endpoints, with a Gemini implementation and builder-style mocks.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiEditClient, GeminiGenerateClient};
pub use mock::{MockEditClient, MockGenerateClient};

use crate::models::{EditPart, GenerationRequest, ImageArtifact};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Produces exactly one image for the request's prompt and aspect ratio.
    async fn generate_image(&self, request: &GenerationRequest) -> Result<ImageArtifact>;
}

#[async_trait]
pub trait ImageEditService: Send + Sync {
    /// Applies `instruction` to `source`, returning the provider's response
    /// parts in arrival order. Both image and text parts are requested.
    async fn edit_image(&self, source: &ImageArtifact, instruction: &str)
        -> Result<Vec<EditPart>>;
}
