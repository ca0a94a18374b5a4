//! # Vinculo
//!
//! Related-resolution ranking for a corpus of legal resolutions.
//!
//! ## Features
//!
//! - Cosine similarity with tolerant handling of degenerate vectors
//! - Maximal Marginal Relevance selection of related documents
//! - Five-band labels and four-band tiers for similarity scores
//! - Corpus loading and a forward (prefix) full-text index
//!
//! ```
//! use vinculo::corpus::Corpus;
//! use vinculo::mmr::MmrConfig;
//!
//! let corpus = Corpus::from_json_str(r#"{"datos": [
//!     {"id": "a", "titulo": "Uno", "texto": "datos", "vector": [1.0, 0.0]},
//!     {"id": "b", "titulo": "Dos", "texto": "datos", "vector": [0.9, 0.3]}
//! ]}"#)?;
//!
//! let related = corpus.related("a", &MmrConfig::default());
//! assert_eq!(related[0].item.id, "b");
//! assert_eq!(vinculo::classifier::format_score(related[0].similarity), "Muy alta (95%)");
//! # Ok::<(), vinculo::error::VinculoError>(())
//! ```

pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod document;
pub mod error;
pub mod lexical;
pub mod mmr;
pub mod similarity;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
