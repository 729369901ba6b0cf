//! Command execution for the mayday CLI.

use std::collections::BTreeMap;

use tracing::info;

use crate::cli::args::{ClassifyArgs, Command, MaydayArgs, ServeArgs, TrainArgs};
use crate::corpus::store::{CorpusConfig, load_corpus};
use crate::error::{MaydayError, Result};
use crate::ml::metrics::ClassificationReport;
use crate::ml::pipeline::{AnalyzerKind, ClassificationPipeline, PipelineConfig};
use crate::ml::search::{GridSearch, ParamGrid};
use crate::ml::split::train_test_split;
use crate::ml::vectorizer::TfIdfConfig;
use crate::web::context::AppContext;
use crate::web::routes::serve;

/// Dispatch the parsed CLI command.
pub fn execute_command(args: MaydayArgs) -> Result<()> {
    match args.command {
        Command::Train(train_args) => execute_train(train_args),
        Command::Serve(serve_args) => execute_serve(serve_args),
        Command::Classify(classify_args) => execute_classify(classify_args),
    }
}

/// The training batch job: load, split, search, fit, report, persist.
///
/// The per-category evaluation report goes to stdout; failures abort with a
/// diagnostic, since an offline batch job has no partial or retry semantics.
fn execute_train(args: TrainArgs) -> Result<()> {
    let corpus_config = CorpusConfig {
        table: args.table.clone(),
        expected_categories: args.expect_categories,
    };
    let corpus = load_corpus(&args.database, &corpus_config)?;
    if corpus.is_empty() {
        return Err(MaydayError::corpus("corpus is empty; nothing to train on"));
    }

    let (train_idx, test_idx) = train_test_split(corpus.len(), args.test_size, args.seed)?;
    info!(
        train = train_idx.len(),
        test = test_idx.len(),
        categories = corpus.categories().len(),
        "corpus split"
    );

    let (train_messages, train_labels) = corpus.select(&train_idx);

    // Normalization is deterministic and unfitted, so it runs once up front;
    // the vectorizer refits inside every cross-validation fold.
    let analyzer = AnalyzerKind::Message.build();
    let train_docs = train_messages
        .iter()
        .map(|message| analyzer.normalize(message))
        .collect::<Result<Vec<_>>>()?;

    let tfidf = TfIdfConfig::default();
    let grid = ParamGrid::default();
    info!(
        grid_points = grid.len(),
        folds = args.folds,
        "starting grid search"
    );

    let search = GridSearch::new(grid, args.folds, args.seed);
    let outcome = search.run(&tfidf, corpus.categories(), &train_docs, &train_labels)?;
    let best = outcome.best();
    info!(
        score = best.mean_score,
        config = %best.config.describe(),
        "grid search complete"
    );

    let pipeline_config = PipelineConfig {
        analyzer: AnalyzerKind::Message,
        tfidf,
        boost: best.config.clone(),
    };
    let pipeline = ClassificationPipeline::fit(
        &pipeline_config,
        &train_messages,
        corpus.categories(),
        &train_labels,
    )?;

    let (test_messages, test_labels) = corpus.select(&test_idx);
    let predictions = pipeline.predict_batch(&test_messages)?;
    let report = ClassificationReport::new(corpus.categories(), &test_labels, &predictions);

    println!("{report}");
    println!("Best parameters found: {}", best.config.describe());
    println!("Cross-validated micro-F1: {:.4}", best.mean_score);

    pipeline.save(&args.model)?;
    info!(model = %args.model.display(), "pipeline artifact written");

    Ok(())
}

/// Start the HTTP service over the loaded corpus and pipeline.
fn execute_serve(args: ServeArgs) -> Result<()> {
    let corpus_config = CorpusConfig {
        table: args.table,
        expected_categories: None,
    };
    let context = AppContext::initialize(&args.database, &corpus_config, &args.model)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(context, args.addr))
}

/// One-shot classification printed as JSON.
fn execute_classify(args: ClassifyArgs) -> Result<()> {
    let pipeline = ClassificationPipeline::load(&args.model)?;
    let prediction = pipeline.predict(&args.query)?;

    let classification: BTreeMap<&str, u8> = prediction
        .labels()
        .iter()
        .map(|(category, label)| (category.as_str(), *label))
        .collect();
    let payload = serde_json::json!({
        "query": args.query,
        "classification": classification,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
