//! The task tracker HTTP server.
//!
//! Set `RUST_LOG` to see what it is doing, `FRIDGE_MAGNET_FILE` to move the
//! backing file and `FRIDGE_MAGNET_LISTEN` to change the listen address.

use std::error::Error;
use std::sync::Arc;

use fridge_magnet::api::{self, ApiState};
use fridge_magnet::config::Settings;
use fridge_magnet::repository::TaskRepository;
use fridge_magnet::store::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = Settings::from_env();
    if let Some(parent) = settings.store_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = Store::open(&settings.store_file)?;
    let repository = Arc::new(TaskRepository::new(store));
    let app = api::build_router(ApiState::new(repository));

    let listener = tokio::net::TcpListener::bind(&settings.listen).await?;
    log::info!(
        "Serving tasks from {:?} on http://{}",
        settings.store_file,
        settings.listen
    );
    axum::serve(listener, app).await?;

    Ok(())
}
