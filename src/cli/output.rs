//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::classifier::{SimilarityTier, format_score, label, tier};
use crate::cli::args::{OutputFormat, VinculoArgs};
use crate::corpus::CorpusStats;
use crate::document::Resolution;
use crate::error::Result;
use crate::mmr::{MmrConfig, Scored};

/// Maximum number of characters of resolution text shown in human output.
const PREVIEW_CHARS: usize = 300;

/// Result types that can be printed for a human reader.
pub trait HumanReadable {
    fn render_human(&self) -> String;
}

/// Identifying fields of a resolution, without its text or vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub preview: String,
}

impl From<&Resolution> for ResolutionSummary {
    fn from(resolution: &Resolution) -> Self {
        let metadata = &resolution.metadata;
        Self {
            id: resolution.id.clone(),
            title: resolution.title.clone(),
            case_number: metadata.case_number.clone(),
            resolution_number: metadata.resolution_number.clone(),
            date: metadata
                .parsed_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .or_else(|| metadata.date.clone()),
            source_file: metadata.source_file.clone(),
            preview: preview(&resolution.text),
        }
    }
}

/// A related resolution with its score classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedEntry {
    #[serde(flatten)]
    pub resolution: ResolutionSummary,
    pub similarity: f64,
    pub label: String,
    pub tier: SimilarityTier,
}

impl From<&Scored<&Resolution>> for RelatedEntry {
    fn from(scored: &Scored<&Resolution>) -> Self {
        Self {
            resolution: ResolutionSummary::from(scored.item),
            similarity: scored.similarity,
            label: label(scored.similarity).to_string(),
            tier: tier(scored.similarity),
        }
    }
}

/// A search hit, with its related resolutions when requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub resolution: ResolutionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<RelatedEntry>>,
}

/// Result structure for search operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total_hits: usize,
    pub duration_ms: u64,
}

/// Result structure for the related command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedResults {
    pub target: ResolutionSummary,
    pub config: MmrConfig,
    pub related: Vec<RelatedEntry>,
    pub duration_ms: u64,
}

/// Classification of a single score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreClassification {
    pub similarity: f64,
    pub label: String,
    pub tier: SimilarityTier,
}

impl ScoreClassification {
    pub fn new(similarity: f64) -> Self {
        Self {
            similarity,
            label: label(similarity).to_string(),
            tier: tier(similarity),
        }
    }
}

/// Result structure for the classify command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResults {
    pub scores: Vec<ScoreClassification>,
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &VinculoArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReadable>(message: &str, result: &T, args: &VinculoArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VinculoArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// First [`PREVIEW_CHARS`] characters of `text`, with an ellipsis when cut.
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

fn write_summary(out: &mut String, summary: &ResolutionSummary, indent: &str) {
    let _ = writeln!(out, "{indent}{} [{}]", summary.title, summary.id);

    let mut details = Vec::new();
    if let Some(case_number) = &summary.case_number {
        details.push(format!("Exp: {case_number}"));
    }
    if let Some(resolution_number) = &summary.resolution_number {
        details.push(format!("Res: {resolution_number}"));
    }
    if let Some(date) = &summary.date {
        details.push(date.clone());
    }
    if !details.is_empty() {
        let _ = writeln!(out, "{indent}{}", details.join(" · "));
    }
    if let Some(source_file) = &summary.source_file {
        let _ = writeln!(out, "{indent}{source_file}");
    }
}

fn write_related(out: &mut String, related: &[RelatedEntry], indent: &str) {
    if related.is_empty() {
        let _ = writeln!(out, "{indent}No related resolutions.");
        return;
    }
    for entry in related {
        let _ = writeln!(out, "{indent}{}", format_score(entry.similarity));
        write_summary(out, &entry.resolution, &format!("{indent}  "));
    }
}

impl HumanReadable for SearchResults {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Search Results: {}", self.query);
        let _ = writeln!(out, "═══════════════");

        for (i, hit) in self.hits.iter().enumerate() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Result {}:", i + 1);
            let _ = writeln!(out, "─────────────");
            write_summary(&mut out, &hit.resolution, "");
            let _ = writeln!(out, "{}", hit.resolution.preview);

            if let Some(related) = &hit.related {
                let _ = writeln!(out);
                let _ = writeln!(out, "  Related resolutions ({}):", related.len());
                write_related(&mut out, related, "  ");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Total hits: {}", self.total_hits);
        let _ = writeln!(out, "Search time: {}ms", self.duration_ms);
        out
    }
}

impl HumanReadable for RelatedResults {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Related Resolutions ({}):", self.related.len());
        let _ = writeln!(out, "════════════════════");
        write_summary(&mut out, &self.target, "");
        let _ = writeln!(out);
        write_related(&mut out, &self.related, "");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "top_n={} diversity={} threshold={} ({}ms)",
            self.config.top_n, self.config.diversity_factor, self.config.threshold, self.duration_ms
        );
        out
    }
}

impl HumanReadable for ClassificationResults {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for score in &self.scores {
            let _ = writeln!(
                out,
                "{:>8.4}  {:<9} {}",
                score.similarity, score.label, score.tier
            );
        }
        out
    }
}

impl HumanReadable for CorpusStats {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Corpus Statistics:");
        let _ = writeln!(out, "══════════════════");
        let _ = writeln!(out, "Total documents: {}", self.documents);
        let _ = writeln!(out, "With embeddings: {}", self.embedded);
        for (dimension, count) in &self.dimensions {
            let _ = writeln!(out, "  dimension {dimension}: {count}");
        }
        out
    }
}
