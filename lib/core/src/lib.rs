//! # docscope Core
//!
//! Shared data model for the docscope engines.
//!
//! - [`Document`] - A free-text document with opaque metadata
//! - [`Vector`] - Dense embedding vector with cosine similarity
//! - [`Error`] - The error taxonomy shared by every docscope crate
//!
//! ## Example
//!
//! ```rust
//! use docscope_core::{Document, Vector};
//!
//! let doc = Document::new("doc_1", "report.pdf", "Quarterly performance metrics.");
//! assert!(doc.validate().is_ok());
//!
//! let a = Vector::new(vec![1.0, 0.0]);
//! let b = Vector::new(vec![1.0, 0.0]);
//! assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
//! ```

pub mod document;
pub mod error;
pub mod vector;

pub use document::{Document, Metadata};
pub use error::{Error, Result};
pub use vector::Vector;
