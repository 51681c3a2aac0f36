//! Oral proficiency scoring for spoken Spanish.
//!
//! Turns speech-recognition output into a composite 0-100 score, places it on
//! the eleven-level ACTFL scale and renders structured learner feedback.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
