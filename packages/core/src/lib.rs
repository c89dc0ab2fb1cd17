// ABOUTME: Core constants and validation rules for Gazette
// ABOUTME: Foundational package shared by the storage, domain and API packages

pub mod constants;
pub mod validation;

// Re-export constants
pub use constants::{database_file, gazette_dir, DATABASE_FILE_NAME};

// Re-export validation
pub use validation::{
    validate_author_name, validate_description, validate_publish_date, validate_tag_name,
    validate_title, ValidationErrors, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
