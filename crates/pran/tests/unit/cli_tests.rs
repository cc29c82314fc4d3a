//! CLI parsing and offline command tests

use std::process::ExitCode;

use clap::Parser;
use pran::cli::{self, Cli, Command};
use pran::infrastructure::AppContext;
use pran::infrastructure::config::{AppConfig, EmbeddingProviderKind, LanguageModelKind};
use tempfile::TempDir;

fn offline_context(dir: &TempDir) -> AppContext {
    let mut config = AppConfig::default();
    config.embedding.provider = EmbeddingProviderKind::Null;
    config.language_model.provider = LanguageModelKind::Ollama;
    config.vector_store.dimensions = 8;
    config.vector_store.upsert_batch_size = 2;
    config.vector_store.local.base_path = dir.path().join("vectors");
    AppContext::new(config)
}

#[test]
fn test_parse_ask_with_global_config() {
    let cli = Cli::try_parse_from([
        "pran",
        "ask",
        "Is turmeric good for joints?",
        "--trace",
        "--config",
        "pran.toml",
    ])
    .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("pran.toml")));
    match cli.command {
        Command::Ask { query, trace } => {
            assert_eq!(query, "Is turmeric good for joints?");
            assert!(trace);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_migrate_defaults_to_all_collections() {
    let cli = Cli::try_parse_from(["pran", "migrate", "--from", "./old"]).unwrap();
    match cli.command {
        Command::Migrate { collections, from } => {
            assert!(collections.is_empty());
            assert_eq!(from.as_deref(), Some(std::path::Path::new("./old")));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["pran"]).is_err());
    assert!(Cli::try_parse_from(["pran", "ingest", "only_collection"]).is_err());
}

#[tokio::test]
async fn test_ingest_then_count_and_list() {
    let dir = TempDir::new().unwrap();
    let context = offline_context(&dir);

    let file = dir.path().join("docs.jsonl");
    std::fs::write(
        &file,
        concat!(
            "{\"content\": \"Anulom vilom breathing\", \"metadata\": {\"source\": \"pranayama.pdf\"}}\n",
            "{\"text\": \"Child's pose for back strain\"}\n",
            "{\"content\": \"Shavasana to close a session\"}\n",
        ),
    )
    .unwrap();

    let code = cli::run(
        Command::Ingest {
            collection: "yoga_collection".to_string(),
            file,
        },
        &context,
    )
    .await
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let store = context.local_store(None);
    assert_eq!(store.count("yoga_collection").await.unwrap(), 3);

    let code = cli::run(
        Command::Count {
            collection: "yoga_collection".to_string(),
        },
        &context,
    )
    .await
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let code = cli::run(Command::Collections { path: None }, &context)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[tokio::test]
async fn test_ingest_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let context = offline_context(&dir);

    let result = cli::run(
        Command::Ingest {
            collection: "yoga_collection".to_string(),
            file: dir.path().join("absent.jsonl"),
        },
        &context,
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_migrate_between_local_stores() {
    let dir = TempDir::new().unwrap();
    let legacy_dir = dir.path().join("legacy");

    let mut legacy_config = AppConfig::default();
    legacy_config.embedding.provider = EmbeddingProviderKind::Null;
    legacy_config.vector_store.dimensions = 8;
    legacy_config.vector_store.local.base_path = legacy_dir.clone();
    let legacy = AppContext::new(legacy_config);
    let seeded = legacy.open_partition("ayush_collection").await.unwrap();
    seeded
        .add_documents(&[pran::domain::value_objects::Document::new("Ashwagandha dosage")])
        .await
        .unwrap();

    let context = offline_context(&dir);
    let code = cli::run(
        Command::Migrate {
            collections: Vec::new(),
            from: Some(legacy_dir),
        },
        &context,
    )
    .await
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(
        context.local_store(None).count("ayush_collection").await.unwrap(),
        1
    );
}
