//! Command implementations for the Vinculo CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::Corpus;
use crate::document::Embedded;
use crate::error::{Result, VinculoError};

/// Execute a CLI command.
pub fn execute_command(args: VinculoArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Related(related_args) => related(related_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Stats(stats_args) => stats(stats_args, &args),
    }
}

fn load_corpus(path: &Path) -> Result<Corpus> {
    if !path.exists() {
        return Err(VinculoError::not_found(format!(
            "corpus file {}",
            path.display()
        )));
    }
    Corpus::load(path)
}

/// Search the corpus, optionally attaching related resolutions.
fn search(args: &SearchArgs, cli_args: &VinculoArgs) -> Result<()> {
    let config = args.ranking.to_config(SEARCH_DIVERSITY)?;
    let corpus = load_corpus(&args.corpus.corpus)?;

    let start_time = Instant::now();
    let index = corpus.forward_index();
    debug!("indexed {} distinct words", index.term_count());

    let hits = corpus.search(&index, &args.query, args.limit);
    info!("query {:?} matched {} resolutions", args.query, hits.len());

    let related = if args.related {
        let ids: Vec<&str> = hits.iter().map(|hit| hit.id.as_str()).collect();
        Some(corpus.related_for(&ids, &config))
    } else {
        None
    };

    let hits: Vec<SearchHit> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| SearchHit {
            resolution: ResolutionSummary::from(*hit),
            related: related
                .as_ref()
                .map(|all| all[i].iter().map(RelatedEntry::from).collect()),
        })
        .collect();

    let results = SearchResults {
        query: args.query.clone(),
        total_hits: hits.len(),
        hits,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    output_result("Search completed", &results, cli_args)
}

/// Show the resolutions related to one resolution.
fn related(args: &RelatedArgs, cli_args: &VinculoArgs) -> Result<()> {
    let config = args.ranking.to_config(RELATED_DIVERSITY)?;
    let corpus = load_corpus(&args.corpus.corpus)?;

    let target = corpus
        .get(&args.id)
        .ok_or_else(|| VinculoError::not_found(format!("resolution {}", args.id)))?;
    if target.embedding().is_none() {
        warn!("resolution {} has no embedding, nothing to rank", target.id);
    }

    let start_time = Instant::now();
    let related = corpus.related(&args.id, &config);

    let results = RelatedResults {
        target: ResolutionSummary::from(target),
        config,
        related: related.iter().map(RelatedEntry::from).collect(),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    output_result("Related resolutions", &results, cli_args)
}

/// Classify similarity scores.
fn classify(args: &ClassifyArgs, cli_args: &VinculoArgs) -> Result<()> {
    let results = ClassificationResults {
        scores: args
            .scores
            .iter()
            .map(|&score| ScoreClassification::new(score))
            .collect(),
    };
    output_result("Score classification", &results, cli_args)
}

/// Show corpus statistics.
fn stats(args: &StatsArgs, cli_args: &VinculoArgs) -> Result<()> {
    let corpus = load_corpus(&args.corpus.corpus)?;
    let stats = corpus.stats();
    if stats.dimensions.len() > 1 {
        warn!(
            "embeddings have {} different dimensions; mismatched ones never match",
            stats.dimensions.len()
        );
    }
    output_result("Corpus statistics", &stats, cli_args)
}
