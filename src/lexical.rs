//! Free-text lookup of resolutions.
//!
//! The ranking core only needs an ordered list of identifiers for a query,
//! which is what [`LexicalIndex`] describes. [`ForwardIndex`] is a small
//! in-memory implementation over titles and texts with forward (prefix)
//! matching: the query `"proteccion dat"` matches a document containing
//! "Protección de datos".

use std::collections::BTreeMap;
use std::ops::Bound;

use ahash::AHashMap;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

/// Term frequency weight of a title occurrence relative to a text occurrence.
const TITLE_WEIGHT: u32 = 2;

/// A full-text index returning document identifiers, best match first.
pub trait LexicalIndex {
    fn search(&self, query: &str, limit: usize) -> Vec<String>;
}

/// Split text into lowercase, accent-free words.
///
/// ```
/// use vinculo::lexical::tokenize;
///
/// assert_eq!(tokenize("Protección de DATOS, art. 5"), ["proteccion", "de", "datos", "art", "5"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    folded.unicode_words().map(str::to_string).collect()
}

/// In-memory index with prefix matching on every query term.
///
/// All query terms must match (each as a prefix of some indexed word). Hits
/// are ranked by the summed frequency of the matched words, title
/// occurrences counting double, and then by insertion order.
#[derive(Debug, Clone, Default)]
pub struct ForwardIndex {
    ids: Vec<String>,
    postings: BTreeMap<String, Vec<(usize, u32)>>,
}

impl ForwardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document. Documents are ranked by insertion order on ties.
    pub fn add(&mut self, id: impl Into<String>, title: &str, text: &str) {
        let doc = self.ids.len();
        self.ids.push(id.into());

        let mut frequencies: AHashMap<String, u32> = AHashMap::new();
        for term in tokenize(title) {
            *frequencies.entry(term).or_default() += TITLE_WEIGHT;
        }
        for term in tokenize(text) {
            *frequencies.entry(term).or_default() += 1;
        }

        for (term, frequency) in frequencies {
            self.postings.entry(term).or_default().push((doc, frequency));
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct indexed words.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Scores of every document containing a word that starts with `prefix`.
    fn prefix_scores(&self, prefix: &str) -> AHashMap<usize, u32> {
        let mut scores = AHashMap::new();
        let range = self
            .postings
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(term, _)| term.starts_with(prefix));

        for (_, postings) in range {
            for &(doc, frequency) in postings {
                *scores.entry(doc).or_insert(0) += frequency;
            }
        }
        scores
    }
}

impl LexicalIndex for ForwardIndex {
    fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let terms = tokenize(query);
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut combined: Option<AHashMap<usize, u32>> = None;
        for term in &terms {
            let scores = self.prefix_scores(term);
            combined = Some(match combined {
                None => scores,
                Some(previous) => previous
                    .into_iter()
                    .filter_map(|(doc, score)| scores.get(&doc).map(|s| (doc, score + s)))
                    .collect(),
            });
        }

        let mut hits: Vec<(usize, u32)> = combined.unwrap_or_default().into_iter().collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        hits.into_iter()
            .take(limit)
            .map(|(doc, _)| self.ids[doc].clone())
            .collect()
    }
}
