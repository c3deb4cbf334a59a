//! Loads the seed data into an in-memory store and logs the figures the
//! dashboard, orders and clients screens start from.

use std::env;

use config::Config;
use dotenvy::dotenv;

use shopper_desk::models::config::EngineConfig;
use shopper_desk::models::seed::SeedData;
use shopper_desk::repository::InMemoryRepository;
use shopper_desk::services::ServiceResult;
use shopper_desk::session::Session;

fn report(session: &Session<InMemoryRepository>) -> ServiceResult<()> {
    let summary = session.dashboard()?;
    log::info!(
        "{} clients, {} unassigned items, {} unpaid items, sales goal {}",
        summary.client_count,
        summary.unassigned_count,
        summary.unpaid_count,
        summary.sales_goal
    );

    let orders = session.orders_page()?;
    log::info!(
        "Orders screen shows {} items in {} orders",
        orders.total_items,
        orders.orders.len()
    );
    for order in &orders.orders {
        log::info!(
            "Order {} ({}): {} visible items, total {}",
            order.order_number,
            order.date,
            order.items.len(),
            order.total_amount
        );
    }

    let clients = session.clients_page()?;
    log::info!(
        "Clients screen: {} clients, {} with product requests, {} favourites, {} with unpaid items",
        clients.total_clients,
        clients.counts.with_product_requests,
        clients.counts.favourites,
        clients.counts.with_unpaid_items
    );
    for client in clients.listing.clients() {
        log::info!(
            "{} [{}]: {} items in {} orders, {} unpaid, {}",
            client.full_name(),
            client.initials(),
            client.stats.items_count,
            client.stats.orders_count,
            client.stats.unpaid_count,
            client.stats.order_amount
        );
    }

    Ok(())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let engine_config = match settings.try_deserialize::<EngineConfig>() {
        Ok(engine_config) => engine_config,
        Err(err) => {
            log::error!("Error loading engine config: {}", err);
            std::process::exit(1);
        }
    };

    let repo = match SeedData::load(&engine_config.seed_path)
        .and_then(SeedData::into_repository)
        .and_then(|repo| Ok(repo.with_sales_goal(engine_config.sales_goal)?))
    {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to load {}: {err}", engine_config.seed_path);
            std::process::exit(1);
        }
    };

    let session = Session::new(repo, &engine_config);

    if let Err(err) = report(&session) {
        log::error!("Failed to build report: {err}");
        std::process::exit(1);
    }
}
