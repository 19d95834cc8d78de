//! Flow orchestration for the studio session.
//!
//! Two user-triggered flows share one session: generate produces the
//! original image, edit derives a new image from it. Each flow brackets its
//! remote call with gate transitions and catches every failure at its own
//! boundary; nothing propagates to the presenter as an unhandled error.

use crate::ai::{
    GeminiEditClient, GeminiGenerateClient, ImageEditService, ImageGenerationService,
};
use crate::download::{DiskDownloader, Downloader};
use crate::gate::ControlGate;
use crate::models::{AspectRatio, Config, EditPart, GenerationRequest, ImageArtifact};
use crate::session::SessionState;
use crate::ui::{Control, Presenter, Region, TerminalPresenter};
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::{error, info};

/// Filename prefix for saved generation results.
pub const GENERATED_PREFIX: &str = "generated-image";
/// Filename prefix for saved edit results.
pub const EDITED_PREFIX: &str = "edited-image";

/// Coordinates the generate and edit flows over one session.
pub struct Studio {
    generate: Box<dyn ImageGenerationService>,
    edit: Box<dyn ImageEditService>,
    presenter: Box<dyn Presenter>,
    downloader: Box<dyn Downloader>,
    session: SessionState,
    generate_gate: ControlGate,
    edit_gate: ControlGate,
}

/// Injectable service bundle used to construct [`Studio`] in tests/harnesses.
pub struct StudioServices {
    pub generate: Box<dyn ImageGenerationService>,
    pub edit: Box<dyn ImageEditService>,
    pub presenter: Box<dyn Presenter>,
    pub downloader: Box<dyn Downloader>,
}

impl Studio {
    /// Build a studio from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and harnesses that
    /// need to inject mocks.
    pub fn with_services(services: StudioServices) -> Self {
        Self {
            generate: services.generate,
            edit: services.edit,
            presenter: services.presenter,
            downloader: services.downloader,
            session: SessionState::new(),
            // Editing is impossible until a generation succeeds.
            generate_gate: ControlGate::new(true),
            edit_gate: ControlGate::new(false),
        }
    }

    /// Construct a studio wired to the Gemini provider and the terminal
    /// presenter, from environment configuration.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Generation model: {}", config.generate_model);
        info!("Edit model: {}", config.edit_model);

        Self::with_services(StudioServices {
            generate: Box::new(GeminiGenerateClient::new_with_client(
                config.gemini_api_key.clone(),
                config.generate_model.clone(),
                http_client.clone(),
            )),
            edit: Box::new(GeminiEditClient::new_with_client(
                config.gemini_api_key.clone(),
                config.edit_model.clone(),
                http_client,
            )),
            presenter: Box::new(TerminalPresenter::new()),
            downloader: Box::new(DiskDownloader::new(&config.output_dir)),
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether the generate trigger may currently be fired.
    pub fn can_generate(&self) -> bool {
        self.generate_gate.is_enabled()
    }

    /// Whether the edit trigger may currently be fired.
    pub fn can_edit(&self) -> bool {
        self.edit_gate.is_enabled()
    }

    /// Generate flow: one prompt, one remote call, one original image.
    pub async fn generate(&mut self, prompt: &str, aspect_ratio: AspectRatio) {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.presenter
                .render_warning("Enter a prompt before generating");
            return;
        }
        if !self.generate_gate.begin() {
            return;
        }
        self.presenter.set_control_enabled(Control::Generate, false);

        // Forced override: editing is locked out for the whole generation,
        // even if the edit trigger was enabled or its flow mid-flight.
        self.edit_gate.force_disable();
        self.presenter.set_control_enabled(Control::Edit, false);

        // A regenerated original invalidates any edit derived from the old
        // one, so both slots go before the request is issued.
        self.session.clear();
        self.presenter.clear(Region::Edited);
        self.presenter.render_loading(Region::Original);

        let request = GenerationRequest::new(prompt, aspect_ratio);
        match self.generate.generate_image(&request).await {
            Ok(artifact) => {
                info!(
                    "Generated image ({} bytes, {})",
                    artifact.data.len(),
                    artifact.mime_type
                );
                self.presenter.clear(Region::Original);
                self.presenter.render_image(Region::Original, &artifact, prompt);
                self.presenter
                    .expose_save_action(Region::Original, &artifact, GENERATED_PREFIX);
                self.session.set_original(artifact);
                self.edit_gate.enable();
            }
            Err(e) => {
                error!("Image generation failed: {}", e);
                self.presenter
                    .render_error(Region::Original, &format!("Image generation failed: {}", e));
            }
        }

        self.generate_gate.finish(true);
        self.presenter.set_control_enabled(Control::Generate, true);
        self.presenter
            .set_control_enabled(Control::Edit, self.edit_gate.is_enabled());
    }

    /// Edit flow: applies an instruction to the current original image.
    pub async fn edit(&mut self, instruction: &str) {
        let Some(source) = self.session.original().cloned() else {
            self.presenter
                .render_warning("Generate an image before editing");
            return;
        };
        let instruction = instruction.trim();
        if instruction.is_empty() {
            self.presenter.render_warning("Enter an edit instruction");
            return;
        }
        if !self.edit_gate.begin() {
            return;
        }
        self.presenter.set_control_enabled(Control::Edit, false);

        self.session.clear_edited();
        self.presenter.render_loading(Region::Edited);

        if let Err(e) = self.run_edit(&source, instruction).await {
            error!("Image edit failed: {}", e);
            self.presenter
                .render_error(Region::Edited, &format!("Image edit failed: {}", e));
        }

        // Re-enablement is conditional: the original must still exist.
        self.edit_gate.finish(self.session.original().is_some());
        self.presenter
            .set_control_enabled(Control::Edit, self.edit_gate.is_enabled());
    }

    async fn run_edit(&mut self, source: &ImageArtifact, instruction: &str) -> Result<()> {
        let parts = self.edit.edit_image(source, instruction).await?;
        self.presenter.clear(Region::Edited);

        let mut saw_image = false;
        for part in parts {
            match part {
                EditPart::Text(text) => {
                    self.presenter.render_text(Region::Edited, &text);
                }
                EditPart::Image(artifact) => {
                    saw_image = true;
                    // Images go above any text already rendered; when the
                    // provider returns several, each is rendered but the
                    // last one processed wins in the session.
                    self.presenter.render_image(Region::Edited, &artifact, "");
                    self.presenter
                        .expose_save_action(Region::Edited, &artifact, EDITED_PREFIX);
                    self.session.set_edited(artifact);
                }
            }
        }

        if !saw_image {
            return Err(Error::AiProvider("No edited image produced".to_string()));
        }
        Ok(())
    }

    /// Saves the current original image; no-op when none exists.
    pub fn save_original(&self) -> Result<Option<PathBuf>> {
        self.downloader
            .save(self.session.original(), GENERATED_PREFIX)
    }

    /// Saves the current edited image; no-op when none exists.
    pub fn save_edited(&self) -> Result<Option<PathBuf>> {
        self.downloader.save(self.session.edited(), EDITED_PREFIX)
    }
}
