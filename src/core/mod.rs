pub mod commands;
pub mod confirm;
pub mod dispatch;
pub mod manifest;
pub mod render;
pub mod request;

pub use crate::domain::model::{ServiceListEntry, ServiceManifest};
pub use crate::domain::ports::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
pub use crate::utils::error::Result;
