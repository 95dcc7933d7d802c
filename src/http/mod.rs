//! HTTP protocol layer module
//!
//! Response construction shared by every function endpoint, decoupled from
//! the endpoints' own logic.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_413_response, build_json_response, build_skill_error_response,
    build_text_response, SKILL_ERROR_BODY,
};
