//! Erlandi Security - Telegram group moderation bot
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `store` - Key-value settings store (MongoDB or in-memory)
//! - `cache` - Moka-backed caches
//! - `moderation` - Transport-free moderation core
//! - `permissions` - Member status lookup with caching
//! - `bot` - Dispatcher, Telegram actuator, polling/webhook runtime
//! - `plugins` - Command handlers
//! - `events` - Message and member event handlers
//! - `utils` - Utility functions

mod bot;
mod cache;
mod config;
mod events;
mod moderation;
mod permissions;
mod plugins;
mod store;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bot::{AppState, TelegramActuator};
use config::Config;
use moderation::FloodGuard;
use permissions::TelegramMemberLookup;
use store::{ConfigStore, MemoryStore, MongoStore};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("erlandi=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Erlandi Security...");

    let config = Config::from_env()?;
    info!("Bot mode: {:?}", config.bot_mode);

    let store: Arc<dyn ConfigStore> = match &config.mongodb_uri {
        Some(uri) => {
            info!("Connecting to MongoDB...");
            let store = MongoStore::connect(uri, &config.mongodb_database, config.store_timeout).await?;
            info!("MongoDB connected");
            Arc::new(store)
        }
        None => {
            warn!("MONGODB_URI not set, settings are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    // Throttle keeps us inside Telegram's global and per-chat send limits.
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    if config.owner_ids.is_empty() {
        warn!("No owner IDs configured (OWNER_ID / OWNER_IDS)");
    } else {
        info!("Bot owners: {:?}", config.owner_ids);
    }

    let flood = FloodGuard::new();
    flood.spawn_sweeper();

    let state = AppState::new(
        store,
        Arc::new(TelegramMemberLookup::new(bot.inner().clone())),
        Arc::new(TelegramActuator::new(bot.clone())),
        flood,
        config.owner_ids.clone(),
        config.bot_name.clone(),
    );

    let dispatcher = bot::build_dispatcher(bot.clone(), state);
    bot::run(&config, bot, dispatcher).await
}
