use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use engine::{spawn_lottery_actor, spawn_lottery_actor_with_sink};
use log::{error, info};
use server::config::Config;
use server::services::bootstrap::ensure_admin;
use server::services::db_event_publisher::DbEventPublisher;
use server::services::db_loader::load_snapshot;
use server::services::db_writer::start_db_event_consumer;
use server::state::{AppState, JwtSettings};
use sqlx::postgres::PgPoolOptions;
use std::io;

fn other(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::Other, message)
}

async fn run() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| other(e.to_string()))?;
    let store = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .map_err(|e| other(format!("failed to connect to Postgres: {e}")))?;
            info!("Connected to Postgres");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| other(format!("failed to run migrations: {e}")))?;

            let snapshot = load_snapshot(&pool)
                .await
                .map_err(|e| other(format!("failed to load state: {e}")))?;

            let (publisher, rx) = DbEventPublisher::channel();
            tokio::spawn(start_db_event_consumer(pool, rx));

            let store = spawn_lottery_actor_with_sink(publisher);
            store
                .restore(snapshot)
                .await
                .map_err(|e| other(e.to_string()))?;
            store
        }
        None => {
            info!("DATABASE_URL not set, running in memory only");
            spawn_lottery_actor()
        }
    };

    if let Some(seed) = &config.admin {
        if let Err(e) = ensure_admin(&store, seed, config.bcrypt_cost).await {
            error!("Failed to bootstrap administrator: {}", e);
        }
    }

    let state = web::Data::new(
        AppState::new(
            store,
            JwtSettings {
                secret: config.jwt_secret.clone(),
                ttl_hours: config.jwt_ttl_hours,
            },
        )
        .with_bcrypt_cost(config.bcrypt_cost),
    );

    info!("Listening on {}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(server::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}

fn main() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run())
}
