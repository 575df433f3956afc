use crate::shared::ids::ProjectId;

pub mod client;
pub mod multipart;
pub mod types;
pub mod urls;

pub use client::ApiClient;
pub use types::{
    AssetRecord, BackgroundRequest, CharacterRequest, CreateProjectRequest, GeneratedImage,
    GenerationRecord, ProductGenerateRequest, ProductUpload, ProjectRecord, StoryRecord,
    StoryRequest,
};
pub use urls::resolve_image_url;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Display is the server-provided message verbatim so callers can show it
    /// to the user unchanged.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

/// Remote project/asset API used by the step components and the workflow
/// controller. `ApiClient` is the HTTP implementation.
pub trait StoryApi {
    fn create_project(&self, request: &CreateProjectRequest) -> Result<ProjectRecord, ApiError>;

    fn get_project(&self, project_id: &ProjectId) -> Result<ProjectRecord, ApiError>;

    fn create_character(
        &self,
        project_id: &ProjectId,
        request: &CharacterRequest,
    ) -> Result<AssetRecord, ApiError>;

    fn generate_product(
        &self,
        project_id: &ProjectId,
        request: &ProductGenerateRequest,
    ) -> Result<AssetRecord, ApiError>;

    fn upload_product(
        &self,
        project_id: &ProjectId,
        upload: &ProductUpload,
    ) -> Result<AssetRecord, ApiError>;

    fn create_background(
        &self,
        project_id: &ProjectId,
        request: &BackgroundRequest,
    ) -> Result<AssetRecord, ApiError>;

    fn create_story(
        &self,
        project_id: &ProjectId,
        request: &StoryRequest,
    ) -> Result<StoryRecord, ApiError>;

    fn generate_images(&self, project_id: &ProjectId) -> Result<GenerationRecord, ApiError>;

    fn resolve_image_url(&self, raw: &str) -> String;
}

/// Extracts the user-facing failure reason from a non-success response body.
pub fn error_message_from_body(status: u16, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) if !detail.is_empty() => return detail.clone(),
        Some(serde_json::Value::Null) | None => {}
        Some(serde_json::Value::String(_)) => {}
        Some(other) => return other.to_string(),
    }
    if let Some(message) = value
        .get("message")
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
    {
        return message.to_string();
    }
    format!("HTTP {status}")
}
