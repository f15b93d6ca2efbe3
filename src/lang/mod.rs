//! Source language frontends.

pub mod common;
pub mod registry;

pub use common::LanguageFrontend;
pub use registry::{frontend_for, language_info, registered_languages, LanguageInfo};
