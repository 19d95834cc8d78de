use super::{ImageEditService, ImageGenerationService};
use crate::models::{EditPart, GenerationRequest, ImageArtifact};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

fn default_artifact() -> ImageArtifact {
    // Tiny valid PNG (1x1 pixel)
    ImageArtifact::new(
        vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
            0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
            0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
            0x44, 0x41, // IDAT chunk
            0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2,
            0x25, 0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
            0x44, 0xAE, 0x42, 0x60, 0x82,
        ],
        "image/png",
    )
}

#[derive(Clone)]
pub struct MockGenerateClient {
    responses: Arc<Mutex<Vec<std::result::Result<ImageArtifact, String>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerateClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, artifact: ImageArtifact) -> Self {
        self.responses.lock().unwrap().push(Ok(artifact));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Requests seen so far, in call order.
    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockGenerateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockGenerateClient {
    async fn generate_image(&self, request: &GenerationRequest) -> Result<ImageArtifact> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.requests.lock().unwrap().push(request.clone());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(default_artifact());
        }
        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok(artifact) => Ok(artifact.clone()),
            Err(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

#[derive(Clone)]
pub struct MockEditClient {
    responses: Arc<Mutex<Vec<std::result::Result<Vec<EditPart>, String>>>>,
    instructions: Arc<Mutex<Vec<String>>>,
    sources: Arc<Mutex<Vec<ImageArtifact>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockEditClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            instructions: Arc::new(Mutex::new(Vec::new())),
            sources: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_parts_response(self, parts: Vec<EditPart>) -> Self {
        self.responses.lock().unwrap().push(Ok(parts));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn recorded_instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }

    /// Source artifacts the client was asked to edit, in call order.
    pub fn recorded_sources(&self) -> Vec<ImageArtifact> {
        self.sources.lock().unwrap().clone()
    }
}

impl Default for MockEditClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageEditService for MockEditClient {
    async fn edit_image(
        &self,
        source: &ImageArtifact,
        instruction: &str,
    ) -> Result<Vec<EditPart>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.instructions.lock().unwrap().push(instruction.to_string());
        self.sources.lock().unwrap().push(source.clone());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(vec![EditPart::Image(default_artifact())]);
        }
        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok(parts) => Ok(parts.clone()),
            Err(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}
