// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eduportal_catalog::metrics::PoolMetrics;
use eduportal_catalog::{
    Assistant, Backend, Catalog, CatalogError, Course, CourseFilter, CourseLevel,
    EnvironmentSelector, Field, config,
};
use prometheus::{Encoder, Registry, TextEncoder};
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eduportal", version, about = "Browse and edit the education portal course catalog")]
struct Cli {
    /// Print pool metrics in Prometheus text format when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prepare the catalog and report which backend is active
    Init,

    /// List courses
    Courses {
        #[arg(long, default_value_t = CourseLevel::All)]
        level: CourseLevel,
        #[arg(long, default_value_t = Field::All)]
        field: Field,
        #[arg(long)]
        json: bool,
    },

    /// Show one course
    Course {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// List colleges and the courses that feature them
    Colleges {
        #[arg(long)]
        json: bool,
    },

    /// List careers and the courses leading to them
    Careers {
        #[arg(long)]
        json: bool,
    },

    /// Insert or update a course from a JSON document
    Save { file: PathBuf },

    /// Ask the assistant a question
    Ask {
        #[arg(long, default_value_t = CourseLevel::All)]
        level: CourseLevel,
        #[arg(long, default_value_t = Field::All)]
        field: Field,
        #[arg(required = true)]
        message: Vec<String>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let registry = Registry::new();
    let mut selector = EnvironmentSelector::new(config);
    if cli.metrics {
        match PoolMetrics::new("eduportal", &registry) {
            Ok(metrics) => selector = selector.with_metrics(Arc::new(metrics)),
            Err(e) => warn!("Pool metrics unavailable: {e}"),
        }
    }

    let (catalog, status) = selector.initialize().await;
    eprintln!("{}", status.notice());

    let code = match run(cli.command, &catalog).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("Something went wrong while talking to the catalog. Please try again.");
            ExitCode::FAILURE
        }
    };

    if cli.metrics {
        if let Err(e) = print_metrics(&registry) {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    }
    code
}

async fn run(command: Command, catalog: &Catalog) -> Result<ExitCode, CliError> {
    match command {
        Command::Init => println!("{} backend ready", catalog.backend()),
        Command::Courses { level, field, json } => {
            let courses = catalog.find_courses(&CourseFilter { level, field }).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&courses)?);
            } else {
                for course in &courses {
                    println!("{}", render::course_line(course));
                }
            }
        }
        Command::Course { id, json } => match catalog.get_course_by_id(&id).await? {
            Some(course) if json => println!("{}", serde_json::to_string_pretty(&course)?),
            Some(course) => print!("{}", render::course_detail(&course)),
            None => {
                eprintln!("Course '{id}' not found");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Colleges { json } => {
            let colleges = catalog.list_colleges().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&colleges)?);
            } else {
                for college in &colleges {
                    println!("{}", render::college_line(college));
                }
            }
        }
        Command::Careers { json } => {
            let careers = catalog.list_careers().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&careers)?);
            } else {
                for career in &careers {
                    println!("{}", render::career_line(career));
                }
            }
        }
        Command::Save { file } => {
            let contents = std::fs::read_to_string(&file).map_err(|e| CliError::ReadFile {
                path: file.display().to_string(),
                source: e,
            })?;
            let course: Course = serde_json::from_str(&contents)?;
            catalog.save_course(&course).await?;
            match catalog.backend() {
                Backend::Database => println!("Saved course {}", course.id),
                Backend::Static => {
                    println!("Static catalog active, course {} was not persisted", course.id)
                }
            }
        }
        Command::Ask {
            level,
            field,
            message,
        } => {
            let assistant = Assistant::new(catalog.clone());
            let reply = assistant
                .reply(&message.join(" "), &CourseFilter { level, field })
                .await;
            println!("{reply}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_metrics(registry: &Registry) -> Result<(), CliError> {
    let mut buffer = vec![];
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    print!("{}", String::from_utf8_lossy(&buffer));
    Ok(())
}
