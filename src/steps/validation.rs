use super::StepError;
use crate::api::ProductUpload;

pub const PROJECT_NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const STORY_MIN_CHARS: usize = 50;
pub const STORY_MAX_CHARS: usize = 2000;
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Trims `raw` and checks it is non-empty and at most `max_chars` characters.
pub fn required_text(
    raw: &str,
    field: &str,
    empty_message: &str,
    max_chars: usize,
) -> Result<String, StepError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(StepError::Validation(empty_message.to_string()));
    }
    let count = value.chars().count();
    if count > max_chars {
        return Err(StepError::Validation(format!(
            "{field} must be at most {max_chars} characters (got {count})"
        )));
    }
    Ok(value.to_string())
}

pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_story_text(raw: &str) -> Result<String, StepError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(StepError::Validation(
            "Please write your brand story".to_string(),
        ));
    }
    let count = value.chars().count();
    if count < STORY_MIN_CHARS {
        return Err(StepError::Validation(format!(
            "Please write a more detailed story (at least {STORY_MIN_CHARS} characters)"
        )));
    }
    if count > STORY_MAX_CHARS {
        return Err(StepError::Validation(format!(
            "Story must be at most {STORY_MAX_CHARS} characters (got {count})"
        )));
    }
    Ok(value.to_string())
}

pub fn validate_product_upload(upload: &ProductUpload) -> Result<(), StepError> {
    if upload.bytes.is_empty() {
        return Err(StepError::Validation(
            "Please select a product image".to_string(),
        ));
    }
    let content_type = upload.content_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(StepError::Validation(
            "Please select a valid image file (JPEG, PNG, or WebP)".to_string(),
        ));
    }
    if upload.size_bytes() > MAX_UPLOAD_BYTES {
        return Err(StepError::Validation(
            "File size must be less than 10MB".to_string(),
        ));
    }
    Ok(())
}

/// Human-readable byte size, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_bounds_length() {
        assert_eq!(
            required_text("  Acme  ", "Project name", "Please enter a project name", 100)
                .expect("valid"),
            "Acme"
        );
        assert!(required_text("   ", "Project name", "empty", 100).is_err());
        let long = "x".repeat(101);
        let err = required_text(&long, "Project name", "empty", 100).expect_err("too long");
        assert_eq!(
            err.to_string(),
            "Project name must be at most 100 characters (got 101)"
        );
    }

    #[test]
    fn story_length_bounds_are_inclusive() {
        assert!(validate_story_text(&"a".repeat(49)).is_err());
        assert!(validate_story_text(&"a".repeat(50)).is_ok());
        assert!(validate_story_text(&"a".repeat(2000)).is_ok());
        assert!(validate_story_text(&"a".repeat(2001)).is_err());
    }

    #[test]
    fn story_length_counts_characters_not_bytes() {
        assert!(validate_story_text(&"é".repeat(50)).is_ok());
    }

    #[test]
    fn upload_checks_type_size_and_emptiness() {
        assert!(validate_product_upload(&ProductUpload::new("a.png", "image/png", vec![1])).is_ok());
        assert!(
            validate_product_upload(&ProductUpload::new("a.gif", "image/gif", vec![1])).is_err()
        );
        assert!(validate_product_upload(&ProductUpload::new("a.png", "image/png", vec![])).is_err());
        let oversized = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
        let err = validate_product_upload(&ProductUpload::new("a.png", "image/png", oversized))
            .expect_err("oversized");
        assert_eq!(err.to_string(), "File size must be less than 10MB");
    }

    #[test]
    fn file_sizes_format_with_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }
}
