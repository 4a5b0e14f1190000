//! Rule-based symptom classifier for the ED and PE diagnosis engines.
//!
//! [`engine`] holds the normalization/classification core, [`http`] the axum
//! transport around it.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;

pub use engine::{DiagnosisResult, Engine, EngineKind, Engines};
pub use error::{DiagnosisError, Result};
