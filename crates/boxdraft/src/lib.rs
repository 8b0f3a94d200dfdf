//! Facade crate for the box draft features and shared modules.
//! Re-exports domain/kernel primitives and wires configuration into a ready [`App`].
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`AppConfig`](domain::config::AppConfig) with [`kernel::config::load_config`].
//! - Call [`init`] to open the storage root and the registry.
//! - Start a [`features::registration::RegistrationFlow`] or log in through [`App::admin`].

pub use boxdraft_domain as domain;
pub use boxdraft_kernel as kernel;
pub use boxdraft_registry as registry;
pub use boxdraft_storage as storage;

use boxdraft_admin::AdminGate;
use boxdraft_domain::config::{AppConfig, SnapshotCompression};
use boxdraft_registration::RegistrationFlow;
use boxdraft_registry::Registry;
use boxdraft_storage::{Compression, Storage, StorageError};
use tracing::info;

/// Feature slices built on top of the registry.
pub mod features {
    pub use boxdraft_admin as admin;
    pub use boxdraft_registration as registration;
}

/// A wired application: the file-backed registry plus the admin gate.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub registry: Registry<Storage>,
    pub admin: AdminGate<Storage>,
}

impl App {
    /// A fresh self-service registration over this app's registry.
    #[must_use]
    pub fn registration(&self) -> RegistrationFlow<Storage> {
        RegistrationFlow::new(self.registry.clone())
    }
}

/// Opens storage as configured and loads the registry from it.
///
/// # Errors
/// Returns [`StorageError`] if the data directory cannot be created or resolved.
pub async fn init(config: &AppConfig) -> Result<App, StorageError> {
    let storage = Storage::builder()
        .root(&config.storage.data_dir)
        .compression(match config.storage.compression {
            SnapshotCompression::None => Compression::None,
            SnapshotCompression::Lz4 => Compression::Lz4,
        })
        .maybe_quota(config.storage.quota_bytes)
        .connect()
        .await?;

    let registry = Registry::open(storage, config.storage.key.as_str()).await;
    let admin = AdminGate::from_config(registry.clone(), config);

    info!(
        data_dir = %config.storage.data_dir.display(),
        key = %config.storage.key,
        "Box draft initialized"
    );

    Ok(App { config: config.clone(), registry, admin })
}
