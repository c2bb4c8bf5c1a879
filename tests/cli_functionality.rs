use chrono::NaiveDate;
use clap::Parser;
use std::sync::Arc;
use task_analyzer::cli::{Args, ExecutionMode, FileError, TaskLoader};
use task_analyzer::{AnalyzeError, AnalyzerConfig, FixedClock, Strategy, TaskAnalyzer};
use tempfile::TempDir;

fn analyzer() -> TaskAnalyzer {
    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    TaskAnalyzer::new(Arc::new(FixedClock(today)), AnalyzerConfig::default())
}

#[test]
fn test_analyze_task_file_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let task_file = temp_dir.path().join("tasks.json");
    std::fs::write(
        &task_file,
        r#"{
            "strategy": "fastest_wins",
            "tasks": [
                {"title": "Big refactor", "due_date": "2026-01-20", "estimated_hours": 12, "importance": 7},
                {"title": "Typo fix", "due_date": "2026-01-20", "estimated_hours": 0.5, "importance": 2}
            ]
        }"#,
    )
    .unwrap();

    let request = TaskLoader::load_request(&task_file).unwrap();
    let response = analyzer().analyze(&request).unwrap();

    assert_eq!(response.strategy, Strategy::FastestWins);
    assert_eq!(response.total_tasks, 2);
    assert_eq!(response.tasks[0].task.title, "Typo fix");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["tasks"][0]["title"], "Typo fix");
    assert!(json["tasks"][0]["priority_score"].is_number());
}

#[test]
fn test_bare_array_uses_configured_default_strategy() {
    let temp_dir = TempDir::new().unwrap();
    let task_file = temp_dir.path().join("tasks.json");
    std::fs::write(
        &task_file,
        r#"[{"title": "Only", "due_date": "2026-01-15", "estimated_hours": 1, "importance": 5}]"#,
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let analyzer = TaskAnalyzer::new(
        Arc::new(FixedClock(today)),
        AnalyzerConfig {
            default_strategy: Strategy::DeadlineDriven,
        },
    );

    let request = TaskLoader::load_request(&task_file).unwrap();
    let response = analyzer.analyze(&request).unwrap();
    assert_eq!(response.strategy, Strategy::DeadlineDriven);
}

#[test]
fn test_cyclic_task_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let task_file = temp_dir.path().join("cyclic.json");
    std::fs::write(
        &task_file,
        r#"[
            {"title": "a", "due_date": "2026-01-20", "estimated_hours": 1, "importance": 5, "dependencies": [1]},
            {"title": "b", "due_date": "2026-01-20", "estimated_hours": 1, "importance": 5, "dependencies": [1]}
        ]"#,
    )
    .unwrap();

    let request = TaskLoader::load_request(&task_file).unwrap();
    let error = analyzer().analyze(&request).unwrap_err();

    assert_eq!(
        error,
        AnalyzeError::CircularDependency {
            cycles: vec![vec![1, 1]]
        }
    );
}

#[test]
fn test_missing_task_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = TaskLoader::load_request(temp_dir.path().join("nowhere.json"));
    assert!(matches!(result, Err(FileError::NotFound { .. })));
}

#[test]
fn test_analyze_command_parsing() {
    let args = Args::try_parse_from([
        "task-analyzer",
        "analyze",
        "tasks.json",
        "--strategy",
        "high_impact",
        "--today",
        "2026-01-15",
    ])
    .unwrap();

    match args.mode().unwrap() {
        ExecutionMode::Analyze(config) => {
            assert_eq!(config.file, std::path::PathBuf::from("tasks.json"));
            assert_eq!(config.strategy, Some(Strategy::HighImpact));
            assert_eq!(config.today, NaiveDate::from_ymd_opt(2026, 1, 15));
        }
        _ => panic!("Expected analyze mode"),
    }
}

#[test]
fn test_missing_subcommand_shows_help() {
    assert!(Args::try_parse_from(["task-analyzer"]).is_err());
}
