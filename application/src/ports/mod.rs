//! Ports (interfaces) for external collaborators.

pub mod aqi_source;
pub mod publisher;
pub mod summarizer;
