use super::validation::{
    format_file_size, optional_text, required_text, validate_product_upload,
    DESCRIPTION_MAX_CHARS, PROJECT_NAME_MAX_CHARS,
};
use super::{record_failure, require_project, Project, StatusMessage, StepError};
use crate::api::{ProductGenerateRequest, ProductUpload, StoryApi};
use crate::events::{EventBus, WorkflowEvent};
use crate::shared::ids::AssetId;

const STEP: &str = "product";

/// The two ways a product image can be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductInput {
    Upload(ProductUpload),
    Generate {
        name: String,
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSource {
    Upload {
        file_name: String,
        content_type: String,
        size_bytes: u64,
    },
    Generated {
        name: String,
        description: Option<String>,
    },
}

impl ProductSource {
    pub fn summary(&self) -> String {
        match self {
            ProductSource::Upload {
                file_name,
                size_bytes,
                ..
            } => format!("{file_name} ({})", format_file_size(*size_bytes)),
            ProductSource::Generated { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductResult {
    pub id: AssetId,
    pub image_url: String,
    pub source: ProductSource,
}

#[derive(Debug, Default)]
pub struct ProductStep {
    current: Option<ProductResult>,
    status: Option<StatusMessage>,
}

impl ProductStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ProductResult> {
        self.current.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Uploads or generates the product image. Both paths announce
    /// `ProductUploaded`.
    pub fn submit(
        &mut self,
        api: &dyn StoryApi,
        project: Option<&Project>,
        bus: &mut EventBus,
        input: ProductInput,
    ) -> Result<&ProductResult, StepError> {
        let result = match input {
            ProductInput::Upload(upload) => {
                validate_product_upload(&upload)
                    .map_err(|err| record_failure(STEP, &mut self.status, err))?;
                let project = require_project(project)
                    .map_err(|err| record_failure(STEP, &mut self.status, err))?;
                let record = api
                    .upload_product(&project.id, &upload)
                    .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;
                ProductResult {
                    id: record.id,
                    image_url: record.image_url,
                    source: ProductSource::Upload {
                        size_bytes: upload.size_bytes(),
                        file_name: upload.file_name,
                        content_type: upload.content_type,
                    },
                }
            }
            ProductInput::Generate { name, description } => {
                let name = required_text(
                    &name,
                    "Product name",
                    "Please enter a product name",
                    PROJECT_NAME_MAX_CHARS,
                )
                .map_err(|err| record_failure(STEP, &mut self.status, err))?;
                let description = optional_text(description.as_deref());
                if let Some(text) = &description {
                    required_text(text, "Product description", "", DESCRIPTION_MAX_CHARS)
                        .map_err(|err| record_failure(STEP, &mut self.status, err))?;
                }
                let project = require_project(project)
                    .map_err(|err| record_failure(STEP, &mut self.status, err))?;
                let request = ProductGenerateRequest {
                    name: name.clone(),
                    description: description.clone(),
                };
                let record = api
                    .generate_product(&project.id, &request)
                    .map_err(|err| record_failure(STEP, &mut self.status, err.into()))?;
                ProductResult {
                    id: record.id,
                    image_url: record.image_url,
                    source: ProductSource::Generated { name, description },
                }
            }
        };

        tracing::info!(product_id = %result.id, source = %result.source.summary(), "product ready");
        bus.publish(WorkflowEvent::ProductUploaded(result.clone()));
        let text = match result.source {
            ProductSource::Upload { .. } => "Product uploaded successfully!",
            ProductSource::Generated { .. } => "Product generated successfully!",
        };
        self.status = Some(StatusMessage::success(text));
        Ok(&*self.current.insert(result))
    }

    pub fn approve(&mut self, bus: &mut EventBus) -> Result<(), StepError> {
        let Some(result) = self.current.clone() else {
            return Err(record_failure(
                STEP,
                &mut self.status,
                StepError::Sequencing("Add a product before approving".to_string()),
            ));
        };
        bus.publish(WorkflowEvent::ProductApproved(result));
        self.status = Some(StatusMessage::success(
            "Product approved! You can now set up your background.",
        ));
        Ok(())
    }

    pub fn discard(&mut self) {
        self.current = None;
        self.status = Some(StatusMessage::info(
            "Product discarded. Upload or generate another image.",
        ));
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.status = None;
    }
}
