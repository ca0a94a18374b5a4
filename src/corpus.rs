//! The resolution corpus and related-set computation.
//!
//! A corpus is loaded once from the JSON export, whose layout is
//!
//! ```json
//! { "datos": [ { "id": "...", "titulo": "...", "texto": "...",
//!                "metadatos": { ... }, "vector": [ ... ] } ] }
//! ```
//!
//! and is read-only afterwards. Records without an id, title or text are
//! dropped at load time; records without a vector are kept (they are
//! searchable but take no part in semantic ranking).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Embedded, Resolution, ResolutionMetadata};
use crate::error::{Result, VinculoError};
use crate::lexical::{ForwardIndex, LexicalIndex};
use crate::mmr::{MmrConfig, Scored, select_related};

/// A record as it appears in the export, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Value,
    titulo: Option<String>,
    texto: Option<String>,
    metadatos: Option<ResolutionMetadata>,
    vector: Option<Vec<f32>>,
    embedding: Option<Vec<f32>>,
}

impl RawRecord {
    fn into_resolution(self) -> Option<Resolution> {
        let id = match self.id {
            Value::String(id) if !id.is_empty() => id,
            Value::Number(id) => id.to_string(),
            _ => return None,
        };
        let title = self.titulo.filter(|t| !t.is_empty())?;
        let text = self.texto.filter(|t| !t.is_empty())?;

        Some(Resolution {
            id,
            title,
            text,
            metadata: self.metadatos.unwrap_or_default(),
            vector: self.vector.or(self.embedding),
        })
    }
}

/// Summary of a loaded corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub embedded: usize,
    /// Number of embedded documents per vector dimension.
    pub dimensions: BTreeMap<usize, usize>,
}

/// An immutable collection of resolutions addressable by id.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Resolution>,
    positions: AHashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus from already-parsed resolutions. Later duplicates of an
    /// id are dropped.
    pub fn new(resolutions: impl IntoIterator<Item = Resolution>) -> Self {
        let mut corpus = Corpus::default();
        for resolution in resolutions {
            if corpus.positions.contains_key(&resolution.id) {
                warn!("skipping duplicate resolution id {}", resolution.id);
                continue;
            }
            corpus
                .positions
                .insert(resolution.id.clone(), corpus.documents.len());
            corpus.documents.push(resolution);
        }
        corpus
    }

    /// Load a corpus export from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let corpus = Self::from_json_str(&content)?;
        info!(
            "loaded {} resolutions ({} with embeddings) from {}",
            corpus.len(),
            corpus.embedded_count(),
            path.display()
        );
        Ok(corpus)
    }

    /// Parse a corpus export. A missing or non-array `datos` yields an empty
    /// corpus; the top level itself must be a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(mut root) = root else {
            return Err(VinculoError::corpus("expected a JSON object at the top level"));
        };

        let records = match root.remove("datos") {
            Some(Value::Array(records)) => records,
            _ => {
                debug!("corpus export has no `datos` array");
                Vec::new()
            }
        };

        let total = records.len();
        let resolutions: Vec<Resolution> = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let parsed = serde_json::from_value::<RawRecord>(record)
                    .map_err(|e| debug!("record {position} is malformed: {e}"))
                    .ok()?
                    .into_resolution();
                if parsed.is_none() {
                    debug!("record {position} lacks an id, title or text");
                }
                parsed
            })
            .collect();

        if resolutions.len() < total {
            debug!("dropped {} of {} records", total - resolutions.len(), total);
        }
        Ok(Self::new(resolutions))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resolution> {
        self.documents.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Resolution> {
        self.positions.get(id).map(|&i| &self.documents[i])
    }

    /// Number of resolutions carrying an embedding.
    pub fn embedded_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.embedding().is_some())
            .count()
    }

    pub fn stats(&self) -> CorpusStats {
        let mut dimensions = BTreeMap::new();
        for dimension in self.documents.iter().filter_map(Resolution::dimension) {
            *dimensions.entry(dimension).or_insert(0) += 1;
        }
        CorpusStats {
            documents: self.len(),
            embedded: dimensions.values().sum(),
            dimensions,
        }
    }

    /// Build a [`ForwardIndex`] over titles and texts, in corpus order.
    pub fn forward_index(&self) -> ForwardIndex {
        let mut index = ForwardIndex::new();
        for document in &self.documents {
            index.add(document.id.as_str(), &document.title, &document.text);
        }
        index
    }

    /// Run `query` against `index` and resolve the hits, keeping the index
    /// order. Identifiers unknown to this corpus are ignored.
    pub fn search<I: LexicalIndex + ?Sized>(
        &self,
        index: &I,
        query: &str,
        limit: usize,
    ) -> Vec<&Resolution> {
        index
            .search(query, limit)
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Resolutions related to the one with the given id.
    ///
    /// The target is excluded from its own candidate pool. Unknown ids and
    /// targets without an embedding yield an empty result.
    pub fn related(&self, id: &str, config: &MmrConfig) -> Vec<Scored<&Resolution>> {
        let Some(&position) = self.positions.get(id) else {
            return Vec::new();
        };
        let target = &self.documents[position];
        let Some(vector) = target.embedding() else {
            return Vec::new();
        };

        let pool: Vec<&Resolution> = self
            .documents
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != position)
            .map(|(_, d)| d)
            .collect();

        select_related(Some(vector), &pool, config)
            .into_iter()
            .map(|scored| Scored {
                item: *scored.item,
                similarity: scored.similarity,
            })
            .collect()
    }

    /// [`related`](Self::related) for several targets, computed in parallel.
    /// The output is in the order of `ids`.
    pub fn related_for<S: AsRef<str> + Sync>(
        &self,
        ids: &[S],
        config: &MmrConfig,
    ) -> Vec<Vec<Scored<&Resolution>>> {
        ids.par_iter()
            .map(|id| self.related(id.as_ref(), config))
            .collect()
    }
}
