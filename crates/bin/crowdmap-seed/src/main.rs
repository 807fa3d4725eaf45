//! # crowdmap-seed — floor-plan seeder
//!
//! Composition root that wires the storage adapter to the application
//! services and seeds rooms and doorway sensors from an adjacency map.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize structured logging
//! - Read the JSON adjacency map
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Run the seeder and report what it wrote
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::path::Path;

use crowdmap_adapter_storage_memory::{Database, MemoryRoomRepository, MemorySensorRepository};
use crowdmap_app::services::room_service::RoomService;
use crowdmap_app::services::seed_service::SeedService;
use crowdmap_app::services::sensor_service::SensorService;
use crowdmap_domain::adjacency::AdjacencyMap;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("failed to read adjacency map `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed adjacency map `{path}`")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn load_adjacency(path: &Path) -> Result<AdjacencyMap, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.env_filter()?)
        .with_target(false)
        .init();

    let path = Path::new(&config.seed.adjacency_path);
    let map = load_adjacency(path)?;
    tracing::info!(path = %path.display(), rooms = map.len(), "adjacency map loaded");

    // Storage
    let db = Database::new();

    // Seeding
    let seeder = SeedService::new(
        MemoryRoomRepository::new(db.rooms().clone()),
        MemorySensorRepository::new(db.sensors().clone()),
    );
    let report = seeder.seed(&map, &config.seed.defaults).await?;

    // Summary
    let rooms = RoomService::new(MemoryRoomRepository::new(db.rooms().clone()));
    let sensors = SensorService::new(
        MemorySensorRepository::new(db.sensors().clone()),
        MemoryRoomRepository::new(db.rooms().clone()),
    );
    for room in rooms.list_rooms().await? {
        let doorways = sensors.sensors_for_room(room.id).await?.len();
        tracing::debug!(room = %room.name, floor = room.floor, doorways, "room seeded");
    }
    tracing::info!(
        rooms = report.rooms_created + report.rooms_reused,
        sensors = report.sensors_created + report.sensors_skipped,
        "seeding finished"
    );

    Ok(())
}
