//! Infrastructure layer for Vellum: file-system paths, the config file and
//! document loading.

pub mod config_service;
pub mod document_loader;
pub mod paths;

pub use config_service::{ConfigService, ENDPOINT_ENV_VAR};
pub use document_loader::load_document;
pub use paths::VellumPaths;
