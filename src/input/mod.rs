//! Input processing module
//! Handles file detection, text extraction, and loading uploads from disk

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
