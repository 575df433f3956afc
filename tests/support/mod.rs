#![allow(dead_code)]

use brandstory::api::{
    resolve_image_url, ApiError, AssetRecord, BackgroundRequest, CharacterRequest,
    CreateProjectRequest, GeneratedImage, GenerationRecord, ProductGenerateRequest, ProductUpload,
    ProjectRecord, StoryApi, StoryRecord, StoryRequest,
};
use brandstory::shared::ids::{AssetId, ImageId, ProjectId};
use std::cell::RefCell;
use std::collections::HashMap;

pub const ASSET_HOST: &str = "http://assets.test";

/// In-memory `StoryApi` that records every call and can be primed to fail.
#[derive(Debug)]
pub struct RecordingApi {
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<&'static str, (u16, String)>>,
    character_requests: RefCell<Vec<CharacterRequest>>,
    batches: RefCell<usize>,
    projects: RefCell<usize>,
    batch_size: usize,
}

impl Default for RecordingApi {
    fn default() -> Self {
        Self::with_batch_size(3)
    }
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
            character_requests: RefCell::new(Vec::new()),
            batches: RefCell::new(0),
            projects: RefCell::new(0),
            batch_size,
        }
    }

    /// The next call to `operation` fails with `status` and `message`.
    pub fn fail_next(&self, operation: &'static str, status: u16, message: &str) {
        self.failures
            .borrow_mut()
            .insert(operation, (status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    pub fn character_requests(&self) -> Vec<CharacterRequest> {
        self.character_requests.borrow().clone()
    }

    fn record(&self, operation: &'static str, detail: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("{operation}:{detail}"));
        match self.failures.borrow_mut().remove(operation) {
            Some((status, message)) => Err(ApiError::Status { status, message }),
            None => Ok(()),
        }
    }

    fn asset(id: &str, path: &str) -> AssetRecord {
        AssetRecord {
            id: AssetId::parse(id).expect("asset id"),
            image_url: path.to_string(),
        }
    }
}

impl StoryApi for RecordingApi {
    fn create_project(&self, request: &CreateProjectRequest) -> Result<ProjectRecord, ApiError> {
        self.record("create_project", &request.name)?;
        let mut count = self.projects.borrow_mut();
        *count += 1;
        Ok(ProjectRecord {
            id: ProjectId::parse(&format!("proj-{count}")).expect("project id"),
            name: request.name.clone(),
            created_at: "2025-01-02T03:04:05.000123".to_string(),
        })
    }

    fn get_project(&self, project_id: &ProjectId) -> Result<ProjectRecord, ApiError> {
        self.record("get_project", project_id.as_str())?;
        Ok(ProjectRecord {
            id: project_id.clone(),
            name: "Refreshed".to_string(),
            created_at: String::new(),
        })
    }

    fn create_character(
        &self,
        project_id: &ProjectId,
        request: &CharacterRequest,
    ) -> Result<AssetRecord, ApiError> {
        self.record("create_character", project_id.as_str())?;
        self.character_requests.borrow_mut().push(request.clone());
        Ok(Self::asset("char-1", "/uploads/character.png"))
    }

    fn generate_product(
        &self,
        project_id: &ProjectId,
        _request: &ProductGenerateRequest,
    ) -> Result<AssetRecord, ApiError> {
        self.record("generate_product", project_id.as_str())?;
        Ok(Self::asset("prod-gen-1", "/uploads/product.png"))
    }

    fn upload_product(
        &self,
        project_id: &ProjectId,
        _upload: &ProductUpload,
    ) -> Result<AssetRecord, ApiError> {
        self.record("upload_product", project_id.as_str())?;
        Ok(Self::asset("prod-1", "/uploads/product.png"))
    }

    fn create_background(
        &self,
        project_id: &ProjectId,
        _request: &BackgroundRequest,
    ) -> Result<AssetRecord, ApiError> {
        self.record("create_background", project_id.as_str())?;
        Ok(Self::asset("bg-1", "/uploads/background.png"))
    }

    fn create_story(
        &self,
        project_id: &ProjectId,
        _request: &StoryRequest,
    ) -> Result<StoryRecord, ApiError> {
        self.record("create_story", project_id.as_str())?;
        Ok(StoryRecord {
            id: AssetId::parse("story-1").expect("story id"),
        })
    }

    fn generate_images(&self, project_id: &ProjectId) -> Result<GenerationRecord, ApiError> {
        self.record("generate_images", project_id.as_str())?;
        let mut batch = self.batches.borrow_mut();
        *batch += 1;
        let images = (0..self.batch_size)
            .map(|i| GeneratedImage {
                id: ImageId::parse(&format!("img-{batch}-{i}")).expect("image id"),
                image_url: format!("/generated/{batch}-{i}.png"),
                prompt: format!("prompt {i}"),
                fusion_style: (i % 2 == 0).then(|| "Layered".to_string()),
            })
            .collect();
        Ok(GenerationRecord { images })
    }

    fn resolve_image_url(&self, raw: &str) -> String {
        resolve_image_url(ASSET_HOST, raw)
    }
}

pub fn story_text(len: usize) -> String {
    "Our brand story ".chars().cycle().take(len).collect()
}

pub fn png_upload() -> ProductUpload {
    ProductUpload::new("shoe.png", "image/png", vec![0x89, b'P', b'N', b'G'])
}
