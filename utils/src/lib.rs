mod logging;
mod schema_validation;
mod validators;

pub use logging::setup_logging;
pub use schema_validation::{validate_schema, SchemaValidationError};
pub use validators::{
    validate_annotation_map, validate_base64, validate_label_map, validate_name,
    validate_qualified_name,
};
