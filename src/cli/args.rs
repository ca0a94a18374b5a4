//! Command line argument parsing for the Vinculo CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mmr::MmrConfig;

/// Vinculo - find legal resolutions and the ones related to them
#[derive(Parser, Debug, Clone)]
#[command(name = "vinculo")]
#[command(about = "Search legal resolutions and surface semantically related ones")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VinculoArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VinculoArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Full-text search, optionally with related resolutions per hit
    Search(SearchArgs),

    /// Resolutions related to a given resolution
    Related(RelatedArgs),

    /// Label and tier for similarity scores
    Classify(ClassifyArgs),

    /// Corpus statistics
    Stats(StatsArgs),
}

/// Location of the corpus export.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Path to the corpus export (JSON with a `datos` array)
    #[arg(short, long, value_name = "CORPUS_FILE", env = "VINCULO_CORPUS")]
    pub corpus: PathBuf,
}

/// Parameters of the related-resolutions selection.
#[derive(Args, Debug, Clone)]
pub struct RankingArgs {
    /// Maximum number of related resolutions
    #[arg(short = 'n', long, default_value = "5")]
    pub top_n: usize,

    /// Relevance/diversity trade-off (1.0 = pure relevance) [default: 0.6
    /// for search, 0.5 for related]
    #[arg(short, long)]
    pub diversity: Option<f64>,

    /// Minimum cosine similarity to the target
    #[arg(short, long, default_value = "0.5")]
    pub threshold: f64,
}

/// Diversity factor used when `search --related` gets no `--diversity`.
pub const SEARCH_DIVERSITY: f64 = 0.6;

/// Diversity factor used when `related` gets no `--diversity`.
pub const RELATED_DIVERSITY: f64 = 0.5;

impl RankingArgs {
    /// Build and validate the selection config, falling back to
    /// `default_diversity` when no diversity factor was given.
    pub fn to_config(&self, default_diversity: f64) -> Result<MmrConfig> {
        let config = MmrConfig::default()
            .with_top_n(self.top_n)
            .with_diversity_factor(self.diversity.unwrap_or(default_diversity))
            .with_threshold(self.threshold);
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Attach related resolutions to every hit
    #[arg(long)]
    pub related: bool,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

/// Arguments for the related command
#[derive(Parser, Debug, Clone)]
pub struct RelatedArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Identifier of the target resolution
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub ranking: RankingArgs,
}

/// Arguments for classifying scores
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Similarity scores to classify
    #[arg(value_name = "SCORE", required = true, allow_negative_numbers = true)]
    pub scores: Vec<f64>,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_search_command() {
        let args = VinculoArgs::try_parse_from([
            "vinculo",
            "search",
            "--corpus",
            "/data/indice.json",
            "datos personales",
            "--limit",
            "20",
            "--related",
            "--top-n",
            "3",
        ])
        .unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.corpus.corpus, PathBuf::from("/data/indice.json"));
            assert_eq!(search_args.query, "datos personales");
            assert_eq!(search_args.limit, 20);
            assert!(search_args.related);

            let config = search_args.ranking.to_config(SEARCH_DIVERSITY).unwrap();
            assert_eq!(config.top_n, 3);
            assert_eq!(config.diversity_factor, 0.6);
            assert_eq!(config.threshold, 0.5);
        } else {
            panic!("Expected search command");
        }
    }

    #[test]
    fn test_related_command() {
        let args = VinculoArgs::try_parse_from([
            "vinculo", "related", "-c", "corpus.json", "res-12", "-d", "1.0", "-t", "0.7",
        ])
        .unwrap();

        if let Command::Related(related_args) = args.command {
            assert_eq!(related_args.id, "res-12");
            let config = related_args.ranking.to_config(RELATED_DIVERSITY).unwrap();
            assert_eq!(config.diversity_factor, 1.0);
            assert_eq!(config.threshold, 0.7);
        } else {
            panic!("Expected related command");
        }
    }

    #[test]
    fn test_out_of_range_ranking_is_rejected() {
        let args = VinculoArgs::try_parse_from([
            "vinculo", "related", "-c", "corpus.json", "res-12", "-t", "1.5",
        ])
        .unwrap();

        if let Command::Related(related_args) = args.command {
            assert!(related_args.ranking.to_config(RELATED_DIVERSITY).is_err());
        } else {
            panic!("Expected related command");
        }
    }

    #[test]
    fn test_classify_accepts_negative_scores() {
        let args = VinculoArgs::try_parse_from(["vinculo", "classify", "0.95", "-0.2"]).unwrap();
        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.scores, vec![0.95, -0.2]);
        } else {
            panic!("Expected classify command");
        }

        assert!(VinculoArgs::try_parse_from(["vinculo", "classify"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = VinculoArgs::try_parse_from(["vinculo", "classify", "0.5"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = VinculoArgs::try_parse_from(["vinculo", "-vv", "classify", "0.5"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = VinculoArgs::try_parse_from(["vinculo", "-q", "-vvv", "classify", "0.5"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            VinculoArgs::try_parse_from(["vinculo", "--format", "json", "classify", "0.5"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
