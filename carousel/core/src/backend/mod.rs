//! Content Generator Integration
//!
//! This module defines the contract with the external content generator and
//! the helpers for turning its output into slide triples.
//!
//! # Usage
//!
//! ```ignore
//! use carousel_core::backend::{ContentGenerator, GenerationRequest, Tone};
//!
//! let request = GenerationRequest::new("morning routines", Tone::Motivational)?;
//! let payload = generator.generate(&request).await?;
//! let triples = carousel_core::backend::slides_from_payload(payload)?;
//! ```

mod payload;
mod traits;

pub use payload::{decode_payload, slides_from_payload, GeneratedSlide};
pub use traits::{
    ContentGenerator, GenerationError, GenerationRequest, Tone, UnknownTone, ValidationError,
};
