// src/documents/mod.rs
pub mod loader;
pub mod models;

pub use loader::load_documents;
pub use models::Document;
