mod cli;

use edgecount::{config, scenario};
use edgecount_db::{connect, ConnectionDescriptor, EdgeStore, NodeDegree, QueryShape};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "edgecount=debug,edgecount_db=debug".to_string()
        } else {
            "edgecount=warn,edgecount_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            targets,
            shape,
            json,
        } => run(cli.config.as_deref(), &targets, shape.map(Into::into), json),
        Commands::Query { db, shape, json } => query(&db, shape.into(), json),
        Commands::Add { db, from, to } => add(&db, &from, &to),
        Commands::Reset { db } => reset(&db),
        Commands::Targets => list_targets(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("edgecount {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn open(db: &str) -> Result<Box<dyn EdgeStore>> {
    let descriptor: ConnectionDescriptor = db
        .parse()
        .with_context(|| format!("Invalid connection descriptor: {}", db))?;
    connect(&descriptor).with_context(|| format!("Failed to connect to {}", descriptor))
}

fn print_rows(rows: &[NodeDegree]) {
    for row in rows {
        println!("{} {} {}", row.name, row.in_count, row.out_count);
    }
}

fn run(
    config_path: Option<&std::path::Path>,
    names: &[String],
    shape: Option<QueryShape>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let shape = shape.unwrap_or(config.shape);

    for name in names {
        if !config.targets.iter().any(|t| &t.name == name) {
            anyhow::bail!("Unknown target: {}", name);
        }
    }

    let selected: Vec<_> = config
        .targets
        .iter()
        .filter(|t| {
            if names.is_empty() {
                t.enabled
            } else {
                names.contains(&t.name)
            }
        })
        .collect();

    for skipped in config.targets.iter().filter(|t| !selected.contains(t)) {
        tracing::debug!("Skipping target {}", skipped.name);
    }

    if selected.is_empty() {
        anyhow::bail!("No enabled targets; name one with --target");
    }

    let reports: Vec<_> = selected
        .into_iter()
        .map(|target| scenario::run_target(target, shape))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("== {} ({}, {})", report.target, report.backend, report.shape);
            print_rows(&report.rows);
            if let Some(ref error) = report.error {
                println!("✗ error: {}", error);
            }
            for failure in &report.failures {
                println!("✗ {}", failure);
            }
            if report.passed() {
                println!("✓ passed");
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} targets failed", failed, reports.len());
    }

    Ok(())
}

fn query(db: &str, shape: QueryShape, json: bool) -> Result<()> {
    let mut store = open(db)?;
    let rows = store.node_degrees(shape)?;
    store.close()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_rows(&rows);
    }

    Ok(())
}

fn add(db: &str, from: &str, to: &str) -> Result<()> {
    let mut store = open(db)?;
    let edge = store.insert_edge(from, to)?;
    store.close()?;

    println!("{} {} -> {}", edge.id, edge.from, edge.to);
    Ok(())
}

fn reset(db: &str) -> Result<()> {
    let mut store = open(db)?;
    let removed = store.delete_all_edges()?;
    store.close()?;

    println!("Deleted {} edges", removed);
    Ok(())
}

fn list_targets(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    for target in &config.targets {
        let status = if target.enabled { "enabled" } else { "disabled" };
        // Parsed for display so passwords are not echoed.
        let url = target
            .url
            .parse::<ConnectionDescriptor>()
            .map(|d| d.to_string())
            .unwrap_or_else(|_| target.url.clone());
        println!("{} [{}] {}", target.name, status, url);
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("✓ Configuration is valid");
    println!("  Shape: {}", config.shape);
    println!("  Targets: {}", config.targets.len());
    println!(
        "    Enabled: {}",
        config.targets.iter().filter(|t| t.enabled).count()
    );

    Ok(())
}
