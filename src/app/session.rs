use crate::api::{ProductUpload, StoryApi};
use crate::events::WorkflowEvent;
use crate::steps::{
    BackgroundInput, CharacterInput, Lighting, Personality, ProductInput, StylePreference,
};
use crate::workflow::{parse_scripted_keys, wizard_action_from_key, WorkflowController};
use serde::Deserialize;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// YAML description of one pass through the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionScript {
    pub project: String,
    #[serde(default)]
    pub character: Option<CharacterScript>,
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub product: Option<ProductScript>,
    #[serde(default)]
    pub background: Option<BackgroundScript>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub gallery: Option<GalleryScript>,
    #[serde(default)]
    pub keys: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterScript {
    pub details: String,
    #[serde(default)]
    pub personality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductScript {
    /// Path to an image file, relative to the script.
    Upload(PathBuf),
    Generate {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackgroundScript {
    pub scene_details: String,
    #[serde(default)]
    pub lighting: Option<String>,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryScript {
    #[serde(default)]
    pub generate_more: bool,
    #[serde(default)]
    pub select: Vec<usize>,
    #[serde(default)]
    pub select_all: bool,
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub finish: bool,
}

impl SessionScript {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("failed to read session script {}: {e}", path.display()))?;
        Self::parse(&raw).map_err(|e| format!("invalid session script {}: {e}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_yaml::from_str(raw).map_err(|e| e.to_string())
    }
}

fn step_failed(step: &str, err: impl std::fmt::Display) -> String {
    format!("{step} step failed: {err}")
}

/// Runs `script` through `controller` and returns `key=value` report lines.
/// Relative upload paths resolve against `base_dir`.
pub fn run_session<A: StoryApi>(
    controller: &mut WorkflowController<A>,
    script: &SessionScript,
    base_dir: &Path,
) -> Result<Vec<String>, String> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    controller.subscribe_all(move |event: &WorkflowEvent| {
        sink.borrow_mut().push(event.kind().as_str().to_string());
    });

    let mut lines = Vec::new();

    let project = controller
        .create_project(&script.project)
        .map_err(|e| step_failed("project", e))?;
    lines.push(format!("project_id={}", project.id));
    lines.push(format!("project_name={}", project.name));
    lines.push(format!("project_created_at={}", project.created_at_display()));

    if let Some(character) = &script.character {
        let personality = character
            .personality
            .as_deref()
            .map(Personality::parse)
            .transpose()
            .map_err(|e| step_failed("character", e))?;
        let result = controller
            .submit_character(CharacterInput::new(&character.details, personality))
            .map_err(|e| step_failed("character", e))?;
        lines.push(format!("character_id={}", result.id));
        lines.push(format!(
            "character_image_url={}",
            controller.api().resolve_image_url(&result.image_url)
        ));
        controller
            .approve_character()
            .map_err(|e| step_failed("character", e))?;
    }

    if let Some(product) = &script.product {
        let input = match product {
            ProductScript::Upload(path) => {
                let path = base_dir.join(path);
                let upload = ProductUpload::from_path(&path).map_err(|e| {
                    step_failed("product", format!("failed to read {}: {e}", path.display()))
                })?;
                ProductInput::Upload(upload)
            }
            ProductScript::Generate { name, description } => ProductInput::Generate {
                name: name.clone(),
                description: description.clone(),
            },
        };
        let result = controller
            .submit_product(input)
            .map_err(|e| step_failed("product", e))?;
        lines.push(format!("product_id={}", result.id));
        lines.push(format!("product_source={}", result.source.summary()));
        controller
            .approve_product()
            .map_err(|e| step_failed("product", e))?;
    }

    if let Some(background) = &script.background {
        let lighting = background
            .lighting
            .as_deref()
            .map(Lighting::parse)
            .transpose()
            .map_err(|e| step_failed("background", e))?;
        let mut input = BackgroundInput::new(&background.scene_details, lighting);
        if let Some(styles) = &background.styles {
            input.styles = styles
                .iter()
                .map(|s| StylePreference::parse(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| step_failed("background", e))?;
        }
        let result = controller
            .submit_background(input)
            .map_err(|e| step_failed("background", e))?;
        lines.push(format!("background_id={}", result.id));
        lines.push(format!("background_styles={}", result.styles_label()));
        controller
            .approve_background()
            .map_err(|e| step_failed("background", e))?;
    }

    if let Some(story) = &script.story {
        let result = controller
            .submit_story(story)
            .map_err(|e| step_failed("story", e))?;
        lines.push(format!("story_id={}", result.id));
        lines.push(format!("story_length={}", result.length));
        controller
            .approve_story()
            .map_err(|e| step_failed("story", e))?;
        if let Some(message) = controller.global_error() {
            return Err(message.to_string());
        }
        lines.push(format!("images_generated={}", controller.gallery().images().len()));
    }

    if let Some(gallery) = &script.gallery {
        if gallery.generate_more {
            controller.generate_more();
            if let Some(message) = controller.global_error() {
                return Err(message.to_string());
            }
            lines.push(format!("images_regenerated={}", controller.gallery().images().len()));
        }
        if gallery.select_all {
            controller.select_all_images();
        }
        for index in &gallery.select {
            controller
                .toggle_image(*index)
                .map_err(|e| step_failed("gallery", e))?;
        }
        for index in 0..controller.gallery().images().len() {
            if let Some(preview) = controller.preview_image(index) {
                lines.push(format!(
                    "image.{index}={} selected={} style={}",
                    preview.image_url, preview.selected, preview.fusion_style
                ));
            }
        }
        if gallery.save {
            controller
                .save_selected_images()
                .map_err(|e| step_failed("gallery", e))?;
            lines.push(format!("saved_images={}", controller.saved_images().len()));
        }
        if gallery.finish {
            controller
                .finish_project()
                .map_err(|e| step_failed("gallery", e))?;
            if let Some(summary) = controller.completion() {
                lines.push(format!(
                    "completed={}/{}",
                    summary.selected_images, summary.total_images
                ));
                lines.push(format!("headline={}", summary.headline()));
            }
        }
    }

    if let Some(keys) = &script.keys {
        for (index, key) in parse_scripted_keys(keys)?.into_iter().enumerate() {
            if let Some(action) = wizard_action_from_key(key) {
                let applied = controller.apply_action(action);
                lines.push(format!("key.{index}={action} applied={applied}"));
            }
        }
    }

    let progress = controller.progress();
    lines.push(format!("current_step={}", progress.step));
    lines.push(format!("progress={}", progress.text));
    lines.push(format!("events={}", events.borrow().join(",")));
    Ok(lines)
}
