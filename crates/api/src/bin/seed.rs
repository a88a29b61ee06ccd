//! Reset the database to the sample data set.
//!
//! Clears clients, programs and enrollments, then inserts two clients, two
//! programs and one enrollment per client. Intended for local development.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthtrack_db=info,healthtrack_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = healthtrack_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    healthtrack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    match healthtrack_db::seed::seed_sample_data(&pool).await {
        Ok(report) => tracing::info!(
            clients = report.clients,
            programs = report.programs,
            enrollments = report.enrollments,
            "Database seeded",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed, nothing was changed");
            std::process::exit(1);
        }
    }

    pool.close().await;
}
