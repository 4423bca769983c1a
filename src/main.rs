// src/main.rs
// MovieHub CLI

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use moviehub::application::commands::{
    browse_movies, current_route, list_history, open_movie, sign_in, toggle_saved,
};
use moviehub::application::dto::SignInDto;
use moviehub::application::AppState;
use moviehub::events::{MaintenanceEntered, MaintenanceExited};
use moviehub::{build_app_state, AppConfig};

#[derive(Parser)]
#[command(name = "moviehub")]
#[command(about = "MovieHub - browse movies and keep a saved list", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show movie details
    Show {
        /// TMDB movie id
        id: u64,
        /// Signed-in user, to show the saved flag
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Save or unsave a movie
    Toggle {
        /// TMDB movie id
        id: u64,
        /// Signed-in user
        #[arg(short, long)]
        user: String,
    },

    /// Search movies, or list popular ones
    Browse {
        #[arg(short, long)]
        query: Option<String>,
    },

    /// List a user's history
    History {
        #[arg(short, long)]
        user: String,
        /// Only movies currently saved
        #[arg(long)]
        saved: bool,
    },

    /// Follow the maintenance flag until interrupted
    WatchMaintenance,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let state = build_app_state(&config).await?;

    match cli.command {
        Commands::Show { id, user } => {
            if let Some(uid) = user {
                signed_in(&state, uid)?;
            }
            match open_movie(&state, id).await.map_err(|e| anyhow!(e))? {
                Some(view) => print_json(&view)?,
                None => println!("Movie {} is not available", id),
            }
        }

        Commands::Toggle { id, user } => {
            signed_in(&state, user)?;
            if open_movie(&state, id).await.map_err(|e| anyhow!(e))?.is_none() {
                println!("Movie {} is not available", id);
            }
            let result = toggle_saved(&state).await.map_err(|e| anyhow!(e))?;
            print_json(&result)?;
        }

        Commands::Browse { query } => {
            let movies = browse_movies(&state, query).await.map_err(|e| anyhow!(e))?;
            for movie in movies {
                println!(
                    "{:>8}  {}  {}  {}",
                    movie.id,
                    movie.release_year.as_deref().unwrap_or("----"),
                    movie.rating,
                    movie.title
                );
            }
        }

        Commands::History { user, saved } => {
            signed_in(&state, user)?;
            let entries = list_history(&state, saved).await.map_err(|e| anyhow!(e))?;
            if entries.is_empty() {
                println!("No history");
            }
            for entry in entries {
                println!(
                    "{:>8}  {}  {}  {}",
                    entry.movie_id,
                    if entry.is_saved { "saved  " } else { "unsaved" },
                    entry.updated_at,
                    entry.title
                );
            }
        }

        Commands::WatchMaintenance => watch_maintenance(&state).await?,
    }

    state.maintenance_observer.stop();
    Ok(())
}

/// Log filter from RUST_LOG, defaulting to info
///
/// `.env` is loaded first so a RUST_LOG set there applies too.
fn env_filter() -> EnvFilter {
    dotenv().ok();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn signed_in(state: &AppState, uid: String) -> Result<()> {
    sign_in(
        state,
        SignInDto {
            uid,
            email: None,
            display_name: None,
        },
    )
    .map_err(|e| anyhow!(e))?;
    Ok(())
}

async fn watch_maintenance(state: &AppState) -> Result<()> {
    println!("Current screen: {}", current_route(state).path);

    state
        .event_bus
        .subscribe::<MaintenanceEntered, _>(|event| {
            println!("{}  maintenance on", event.occurred_at.to_rfc3339());
        });
    state
        .event_bus
        .subscribe::<MaintenanceExited, _>(|event| {
            println!("{}  maintenance off", event.occurred_at.to_rfc3339());
        });

    info!("Watching maintenance flag, Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
