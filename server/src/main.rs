mod auth_handler;
mod demo_data;
mod games_handler;
mod leaderboard_handler;
mod logger;
mod messages;
mod player_session;
mod server_config;
mod spectator;
mod store;
mod web_server;
mod ws_handler;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use server_config::ServerConfig;
use spectator::SpectatorHub;
use store::{LeaderboardStore, MemoryLeaderboard, MemoryUserStore, TokenStore, UserStore};
use web_server::AppState;

#[derive(Parser)]
#[command(name = "snake_arcade_server")]
struct Args {
    /// Path to the YAML config; a missing file falls back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(server_config::DEFAULT_CONFIG_FILE));
    let config = ServerConfig::load(&config_path)?;

    let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let leaderboard: Arc<dyn LeaderboardStore> = Arc::new(MemoryLeaderboard::new());
    if config.seed_demo_data {
        demo_data::seed(users.as_ref(), leaderboard.as_ref());
        log!("Seeded demo users and leaderboard entries");
    }

    let spectators = SpectatorHub::start(&config.spectator_games, config.grid_size)?;

    let state = AppState {
        users,
        leaderboard,
        tokens: Arc::new(TokenStore::new()),
        spectators: Arc::new(spectators),
        grid_size: config.grid_size,
    };

    web_server::run_web_server(
        state,
        &config.bind_address,
        PathBuf::from(&config.static_files_path),
    )
    .await;

    log!("Server shut down gracefully");

    Ok(())
}
