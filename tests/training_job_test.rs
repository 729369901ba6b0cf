//! End-to-end test of the training batch job and the serving context.

use std::path::Path;

use clap::Parser;
use rusqlite::Connection;

use mayday::cli::args::MaydayArgs;
use mayday::cli::commands::execute_command;
use mayday::corpus::store::CorpusConfig;
use mayday::ml::pipeline::ClassificationPipeline;
use mayday::web::context::AppContext;
use mayday::web::dashboard::build_dashboard;

/// Write a small but separable labeled corpus.
///
/// Categories follow the production table layout: `related` and `offer`
/// flags plus the request categories.
fn create_corpus(path: &Path) {
    let connection = Connection::open(path).unwrap();
    connection
        .execute_batch(
            "CREATE TABLE messages_categories (
                 id INTEGER PRIMARY KEY,
                 message TEXT,
                 original TEXT,
                 genre TEXT,
                 related INTEGER,
                 water INTEGER,
                 food INTEGER,
                 offer INTEGER
             );",
        )
        .unwrap();

    let water = [
        "we need water urgently",
        "please send drinking water",
        "water supply is gone",
        "no clean water in the camp",
        "water truck never arrived",
        "need water for the children",
        "water containers are empty",
        "drinking water ran out today",
    ];
    let food = [
        "children need food",
        "no food since monday",
        "send food rations please",
        "food stores are empty",
        "we are out of food",
        "need food for the shelter",
        "food packages not delivered",
        "families without food here",
    ];
    let other = [
        "hello how are you",
        "thanks for the update",
        "weather report for today",
        "the meeting is at noon",
        "general announcement only",
        "status unchanged since yesterday",
        "nothing new to report",
        "all quiet in this area",
    ];

    let mut insert = connection
        .prepare(
            "INSERT INTO messages_categories
                 (message, original, genre, related, water, food, offer)
             VALUES (?1, NULL, 'direct', ?2, ?3, ?4, 0)",
        )
        .unwrap();
    for message in water {
        insert.execute((message, 1, 1, 0)).unwrap();
    }
    for message in food {
        insert.execute((message, 1, 0, 1)).unwrap();
    }
    for message in other {
        insert.execute((message, 0, 0, 0)).unwrap();
    }
}

#[test]
fn train_job_writes_a_working_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("corpus.db");
    let model = dir.path().join("pipeline.bin");
    create_corpus(&database);

    let args = MaydayArgs::parse_from([
        "mayday",
        "--quiet",
        "train",
        "--database",
        database.to_str().unwrap(),
        "--model",
        model.to_str().unwrap(),
        "--expect-categories",
        "4",
        "--folds",
        "3",
    ]);
    execute_command(args).unwrap();

    assert!(model.exists());

    // The artifact must load and classify the strongly-signaled messages
    let pipeline = ClassificationPipeline::load(&model).unwrap();
    assert_eq!(
        pipeline.categories(),
        &["related", "water", "food", "offer"]
    );

    let prediction = pipeline.predict("we need water urgently").unwrap();
    assert_eq!(prediction.get("water"), Some(1));

    let prediction = pipeline.predict("children need food").unwrap();
    assert_eq!(prediction.get("food"), Some(1));

    // "offer" has zero positive examples: the trivial negative predictor
    let prediction = pipeline.predict("offering supplies to anyone nearby").unwrap();
    assert_eq!(prediction.get("offer"), Some(0));
}

#[test]
fn serving_context_initializes_from_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("corpus.db");
    let model = dir.path().join("pipeline.bin");
    create_corpus(&database);

    let args = MaydayArgs::parse_from([
        "mayday",
        "--quiet",
        "train",
        "--database",
        database.to_str().unwrap(),
        "--model",
        model.to_str().unwrap(),
        "--folds",
        "3",
    ]);
    execute_command(args).unwrap();

    let context =
        AppContext::initialize(&database, &CorpusConfig::default(), &model).unwrap();
    assert_eq!(context.corpus().len(), 24);

    let dashboard = build_dashboard(context.corpus()).unwrap();
    // related pie, offer pie, token frequency bar
    assert_eq!(dashboard.graphs.len(), 3);
}

#[test]
fn training_on_a_missing_database_fails_with_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let args = MaydayArgs::parse_from([
        "mayday",
        "--quiet",
        "train",
        "--database",
        dir.path().join("missing.db").to_str().unwrap(),
        "--model",
        dir.path().join("pipeline.bin").to_str().unwrap(),
    ]);

    assert!(execute_command(args).is_err());
}
