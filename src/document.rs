//! Resolution records and the embedding capability used by the selector.
//!
//! A [`Resolution`] is one entry of the corpus export: an identifier, the
//! title and full text of the resolution, some optional bibliographic
//! metadata and, when the export was produced with embeddings, a fixed-length
//! vector. The ranking code never looks at anything but the identifier and
//! the vector, which is what the [`Embedded`] trait captures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layouts found in the `fecha` field of the export.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Anything that can take part in semantic ranking.
///
/// Items without an embedding are accepted everywhere and silently skipped
/// by the selector.
pub trait Embedded {
    /// Stable identifier of the item.
    fn id(&self) -> &str;

    /// The embedding vector, if the item has one.
    fn embedding(&self) -> Option<&[f32]>;
}

impl<T: Embedded + ?Sized> Embedded for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn embedding(&self) -> Option<&[f32]> {
        (**self).embedding()
    }
}

/// Bibliographic metadata attached to a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionMetadata {
    /// Case file number ("expediente").
    #[serde(rename = "expediente", default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,

    /// Resolution number.
    #[serde(rename = "resolucion", default, skip_serializing_if = "Option::is_none")]
    pub resolution_number: Option<String>,

    /// Resolution date as written in the export.
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Link or path to the source document.
    #[serde(rename = "archivo_origen", default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl ResolutionMetadata {
    /// Parse [`date`](Self::date) as `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }
}

/// A legal resolution from the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: String,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "texto")]
    pub text: String,

    #[serde(rename = "metadatos", default)]
    pub metadata: ResolutionMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

impl Resolution {
    /// Create a resolution without metadata or embedding.
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            metadata: ResolutionMetadata::default(),
            vector: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ResolutionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Dimensionality of the embedding, if any.
    pub fn dimension(&self) -> Option<usize> {
        self.vector.as_ref().map(Vec::len)
    }
}

impl Embedded for Resolution {
    fn id(&self) -> &str {
        &self.id
    }

    fn embedding(&self) -> Option<&[f32]> {
        self.vector.as_deref()
    }
}
