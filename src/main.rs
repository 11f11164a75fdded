use rocket::{routes, Build, Rocket};
use rusqlite::Connection;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::error::Error;

mod config;
mod data;
mod events;
mod habits;
mod internal_error;

#[cfg(test)]
mod api_tests;

use config::TrackerConfig;
use data::{init_db, wrap_connection, DBConnection};

fn build_rocket(config: TrackerConfig, connection: DBConnection) -> Rocket<Build> {
    rocket::build()
        .manage(connection)
        .manage(config)
        .mount(
            "/api",
            routes![
                habits::endpoints::get_habits,
                habits::endpoints::get_habit,
                habits::endpoints::add_habit,
                habits::endpoints::rename_habit,
                habits::endpoints::delete_habit,
                habits::endpoints::set_display_order,
                habits::endpoints::reorder_habits,
                events::endpoints::toggle_day,
                events::endpoints::mark_day,
                events::endpoints::get_day_state,
                events::endpoints::get_window,
                events::endpoints::get_completion_count,
                events::endpoints::get_dot_sequence,
                events::endpoints::get_habit_stats,
                events::endpoints::get_events,
            ],
        )
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TrackerConfig::from_figment(&rocket::Config::figment())?;

    let connection = Connection::open(&config.database_path)?;
    init_db(&connection)?;
    info!(path = %config.database_path.display(), window_size = config.window_size, "database ready");

    build_rocket(config, wrap_connection(connection))
        .launch()
        .await?;

    Ok(())
}
