use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

use tasktrace::{
    app_state::AppState,
    get_postgres_pool, get_redis_client,
    services::data_stores::{
        PostgresProjectStore, PostgresUserStore, RedisBannedTokenStore,
    },
    utils::{
        constants::{prod, DATABASE_URL, REDIS_HOST_NAME},
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let pg_pool = configure_postgresql().await;
    let user_store =
        Arc::new(RwLock::new(PostgresUserStore::new(pg_pool.clone())));
    let project_store =
        Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool)));

    let redis_connection = Arc::new(RwLock::new(configure_redis()));
    let banned_token_store = Arc::new(RwLock::new(
        RedisBannedTokenStore::new(redis_connection),
    ));

    let app_state =
        AppState::new(user_store, banned_token_store, project_store);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}

async fn configure_postgresql() -> PgPool {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool!");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

fn configure_redis() -> redis::Connection {
    get_redis_client(REDIS_HOST_NAME.to_owned())
        .expect("Failed to get Redis client")
        .get_connection()
        .expect("Failed to get Redis connection")
}
