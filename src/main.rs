#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    api::client::HttpStudentsApi,
    config::{DbConfig, FrontendConfig, default_collection},
    error::{BindSnafu, RosterResult, SerialiseRecordsSnafu, ServeSnafu, WriteFileSnafu},
    frontend::{Frontend, notice::LogReporter},
    importer::{
        Importer,
        seed::{DEFAULT_SEED_COUNT, generate_students, today},
    },
    routes::{
        index::get_index_route,
        students::{
            internal_delete_student, internal_get_add_student_form, internal_get_student_in_detail,
            internal_get_students, internal_put_new_student,
        },
    },
    state::RosterState,
    store::postgres::PgConnector,
};
use axum::{Router, routing::get};
use clap::{Parser, Subcommand};
use snafu::ResultExt;
use sqlx::postgres::PgPoolOptions;
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod api;
mod config;
mod data;
mod error;
mod frontend;
mod importer;
mod inspect;
mod maud_conveniences;
mod routes;
mod state;
mod store;

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Student records importer and browser")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the student list frontend (the default)
    Serve,
    /// Replace a collection with the records in a JSON file
    Import {
        #[arg(default_value = "./student_data.json")]
        file: PathBuf,
        /// Target collection, defaults to `ROSTER_COLLECTION` or `students`
        #[arg(long)]
        collection: Option<String>,
    },
    /// Print the documents in a collection, or just the one with `ID`
    Show {
        id: Option<String>,
        #[arg(long)]
        collection: Option<String>,
    },
    /// Remove one document from a collection
    Remove {
        id: String,
        #[arg(long)]
        collection: Option<String>,
    },
    /// Generate random student records
    Seed {
        #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,
        /// Write the records here instead of loading them into the database
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        collection: Option<String>,
    },
}

fn pg_connector() -> RosterResult<PgConnector> {
    let config = DbConfig::from_env()?;
    Ok(PgConnector::new(
        Arc::new(config),
        PgPoolOptions::new().max_connections(5),
    ))
}

pub fn app(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route(
            "/internal/students",
            get(internal_get_students).put(internal_put_new_student),
        )
        .route(
            "/internal/student",
            get(internal_get_student_in_detail).delete(internal_delete_student),
        )
        .route(
            "/internal/students/new_form",
            get(internal_get_add_student_form),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(?e, "Unable to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(?e, "Unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

async fn serve() -> RosterResult<()> {
    let config = FrontendConfig::from_env()?;
    let api = HttpStudentsApi::new(config.api_base_url())?;
    info!(
        api = config.api_base_url(),
        locale = %config.date_locale().locale,
        "Using students API"
    );

    let state = RosterState::new(Frontend::new(
        Arc::new(api),
        Arc::new(LogReporter),
        config.date_locale(),
    ));

    let server_ip = config.server_ip();
    let listener = TcpListener::bind(server_ip).await.context(BindSnafu {
        address: server_ip.to_string(),
    })?;

    info!(?server_ip, "Listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)
}

async fn seed(count: usize, out: Option<PathBuf>, collection: Option<String>) -> RosterResult<()> {
    let records = generate_students(&mut rand::rng(), count, today())?;
    info!(count = records.len(), "Generated student records");

    match out {
        Some(path) => {
            let contents = serde_json::to_string_pretty(&records).context(SerialiseRecordsSnafu)?;
            tokio::fs::write(&path, contents)
                .await
                .context(WriteFileSnafu { path: path.clone() })?;
            info!(?path, "Wrote student records");
        }
        None => {
            let collection = collection.unwrap_or_else(default_collection);
            Importer::new(pg_connector()?).load(&collection, records).await?;
        }
    }

    Ok(())
}

async fn run(command: Command) -> RosterResult<()> {
    match command {
        Command::Serve => serve().await,
        Command::Import { file, collection } => {
            let collection = collection.unwrap_or_else(default_collection);
            let summary = Importer::new(pg_connector()?).run(&file, &collection).await?;
            info!(?summary, "Finished importing");
            Ok(())
        }
        Command::Show { id, collection } => {
            let collection = collection.unwrap_or_else(default_collection);
            let documents = inspect::show(&pg_connector()?, &collection, id.as_deref()).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&documents).context(SerialiseRecordsSnafu)?
            );
            Ok(())
        }
        Command::Remove { id, collection } => {
            let collection = collection.unwrap_or_else(default_collection);
            inspect::remove(&pg_connector()?, &collection, &id).await?;
            Ok(())
        }
        Command::Seed {
            count,
            out,
            collection,
        } => seed(count, out, collection).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    if let Err(e) = tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .finish(),
    ) {
        eprintln!("unable to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    info!("`tracing` online");
    match dotenv {
        Ok(path) => debug!(?path, "Loaded env file"),
        Err(e) => debug!(?e, "No env file loaded"),
    }

    let cli = Cli::parse();
    match run(cli.command.unwrap_or(Command::Serve)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(?e, "Exiting with error");
            ExitCode::FAILURE
        }
    }
}
