use anyhow::{Context, Result};
use std::sync::Arc;
use task_analyzer::cli::{
    AnalyzeConfig, Args, ConfigDiscovery, ExecutionMode, ServeConfig, TaskLoader,
};
use task_analyzer::server::{AppState, run_server};
use task_analyzer::{Clock, FixedClock, ServiceConfig, Strategy, SystemClock, TaskAnalyzer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mode = match args.mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let result = match mode {
        ExecutionMode::Serve(config) => run_serve_mode(config).await,
        ExecutionMode::Analyze(config) => run_analyze_mode(config),
        ExecutionMode::ListStrategies => {
            show_strategies();
            Ok(())
        }
        ExecutionMode::ShowConfig => show_config(),
        ExecutionMode::InitConfig(path) => init_config(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &ServiceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_serve_mode(config: ServeConfig) -> Result<()> {
    let mut service_config = ConfigDiscovery::load(config.config_override.as_deref())?;
    if let Some(bind) = config.bind_override {
        service_config.server.bind_address = bind;
    }

    init_logging(&service_config);
    info!(
        "Starting task analyzer {} (default strategy {})",
        env!("CARGO_PKG_VERSION"),
        service_config.scoring.default_strategy
    );

    let state = Arc::new(AppState::from_config(&service_config));
    run_server(state).await
}

fn run_analyze_mode(config: AnalyzeConfig) -> Result<()> {
    let service_config = ConfigDiscovery::load(config.config_override.as_deref())?;
    init_logging(&service_config);

    let mut request = TaskLoader::load_request(&config.file)?;
    if config.strategy.is_some() {
        request.strategy = config.strategy;
    }

    let clock: Arc<dyn Clock> = match config.today {
        Some(date) => Arc::new(FixedClock::new(date)),
        None => Arc::new(SystemClock),
    };
    let today = clock.today();

    let analyzer = TaskAnalyzer::new(clock, service_config.scoring);
    info!(
        "Analyzing {:?} as of {} (default strategy {})",
        config.file,
        today,
        analyzer.config().default_strategy
    );
    let response = analyzer
        .analyze(&request)
        .with_context(|| format!("Task list in {:?} was rejected", config.file))?;

    let output = if config.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{}", output);

    Ok(())
}

fn show_strategies() {
    println!(
        "{:<18} {:<18} {:>8} {:>11} {:>7} {:>12}",
        "strategy", "name", "urgency", "importance", "effort", "dependencies"
    );
    for strategy in Strategy::ALL {
        let weights = strategy.weights();
        let marker = if strategy == Strategy::default() { " (default)" } else { "" };
        println!(
            "{:<18} {:<18} {:>8.2} {:>11.2} {:>7.2} {:>12.2}{}",
            strategy.name(),
            strategy.display_name(),
            weights.urgency,
            weights.importance,
            weights.effort,
            weights.dependencies,
            marker
        );
    }
}

fn show_config() -> Result<()> {
    ConfigDiscovery::show_discovery_info();

    let config = ConfigDiscovery::discover_config()?;
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml_string()?);
    Ok(())
}

fn init_config(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Configuration file already exists: {:?}", path);
    }

    ServiceConfig::default().to_toml_file(path)?;
    println!("Wrote default configuration to {:?}", path);
    Ok(())
}
