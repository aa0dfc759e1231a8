//! Core domain logic for NoteKeep.
//! This crate is the single source of truth for note lifecycle invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::draft::DraftBuffer;
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::note_store::NoteStore;
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use repo::note_repo::{NotePersistence, PersistError, DRAFT_KEY, NOTES_KEY};
pub use service::note_manager::{NoteManager, NoteStats};
pub use service::notify::{ChangeNotifier, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the SQLite-backed manager described by `config`.
///
/// Creates the data directory when missing.
///
/// # Errors
/// - Returns an error when the directory or database cannot be opened.
pub fn open_manager(config: &CoreConfig) -> Result<NoteManager<SqliteKvRepository>, RepoError> {
    std::fs::create_dir_all(&config.data_dir).map_err(|err| {
        RepoError::Unavailable(format!(
            "failed to create data directory `{}`: {err}",
            config.data_dir.display()
        ))
    })?;
    let conn = db::open_db(config.db_path())?;
    let repo = SqliteKvRepository::try_new(conn)?;
    Ok(NoteManager::open(repo))
}
