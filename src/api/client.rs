use super::multipart::{boundary_for, content_type_header, encode_file_field};
use super::{
    error_message_from_body, resolve_image_url, ApiError, AssetRecord, BackgroundRequest,
    CharacterRequest, CreateProjectRequest, GenerationRecord, ProductGenerateRequest,
    ProductUpload, ProjectRecord, StoryApi, StoryRecord, StoryRequest,
};
use crate::config::ClientSettings;
use crate::shared::ids::ProjectId;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ApiClient {
    api_base: String,
    asset_base: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Self {
        Self::with_base_urls(
            &settings.resolved_api_base_url(),
            &settings.resolved_asset_base_url(),
        )
    }

    pub fn with_base_urls(api_base: &str, asset_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            asset_base: asset_base.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn project_path(project_id: &ProjectId, suffix: &str) -> String {
        format!(
            "/projects/{}{suffix}",
            urlencoding::encode(project_id.as_str())
        )
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(method = "GET", %url, "api request");
        let result = self
            .agent
            .get(&url)
            .set("Content-Type", "application/json")
            .call();
        decode_response(&url, result)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(method = "POST", %url, "api request");
        let request = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json");
        let result = match body {
            Some(body) => {
                let value =
                    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
                request.send_json(value)
            }
            None => request.call(),
        };
        decode_response(&url, result)
    }
}

fn decode_response<T: DeserializeOwned>(
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            let message = error_message_from_body(status, &body);
            tracing::error!(%url, status, %message, "api request failed");
            return Err(ApiError::Status { status, message });
        }
        Err(ureq::Error::Transport(transport)) => {
            tracing::error!(%url, error = %transport, "api transport failure");
            return Err(ApiError::Transport {
                url: url.to_string(),
                reason: transport.to_string(),
            });
        }
    };

    response.into_json::<T>().map_err(|e| ApiError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl StoryApi for ApiClient {
    fn create_project(&self, request: &CreateProjectRequest) -> Result<ProjectRecord, ApiError> {
        self.post_json("/projects", Some(request))
    }

    fn get_project(&self, project_id: &ProjectId) -> Result<ProjectRecord, ApiError> {
        self.get_json(&Self::project_path(project_id, ""))
    }

    fn create_character(
        &self,
        project_id: &ProjectId,
        request: &CharacterRequest,
    ) -> Result<AssetRecord, ApiError> {
        self.post_json(&Self::project_path(project_id, "/character"), Some(request))
    }

    fn generate_product(
        &self,
        project_id: &ProjectId,
        request: &ProductGenerateRequest,
    ) -> Result<AssetRecord, ApiError> {
        self.post_json(
            &Self::project_path(project_id, "/product/generate"),
            Some(request),
        )
    }

    fn upload_product(
        &self,
        project_id: &ProjectId,
        upload: &ProductUpload,
    ) -> Result<AssetRecord, ApiError> {
        let url = self.endpoint(&Self::project_path(project_id, "/product/upload"));
        tracing::debug!(method = "POST", %url, bytes = upload.bytes.len(), "api upload");
        let boundary = boundary_for(&upload.bytes);
        let body = encode_file_field(
            &boundary,
            "image",
            &upload.file_name,
            &upload.content_type,
            &upload.bytes,
        );
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", &content_type_header(&boundary))
            .send_bytes(&body);
        decode_response(&url, result)
    }

    fn create_background(
        &self,
        project_id: &ProjectId,
        request: &BackgroundRequest,
    ) -> Result<AssetRecord, ApiError> {
        self.post_json(&Self::project_path(project_id, "/background"), Some(request))
    }

    fn create_story(
        &self,
        project_id: &ProjectId,
        request: &StoryRequest,
    ) -> Result<StoryRecord, ApiError> {
        self.post_json(&Self::project_path(project_id, "/story"), Some(request))
    }

    fn generate_images(&self, project_id: &ProjectId) -> Result<GenerationRecord, ApiError> {
        self.post_json::<(), _>(&Self::project_path(project_id, "/generate"), None)
    }

    fn resolve_image_url(&self, raw: &str) -> String {
        resolve_image_url(&self.asset_base, raw)
    }
}
