/*!
 * Serialization Utilities
 * JSON for request payloads and response buffers
 */

pub mod json;

pub use json::{JsonError, JsonResult};
