use crate::banner::BannerEncoder;
use crate::error::AdminError;
use crate::session::AdminSession;
use boxdraft_domain::config::AppConfig;
use boxdraft_kernel::security::SharedSecret;
use boxdraft_registry::Registry;
use boxdraft_storage::KeyValueStore;
use std::fmt;
use tracing::{info, warn};

/// Entrance to the admin dashboard, guarded by the static shared password.
pub struct AdminGate<S: KeyValueStore> {
    registry: Registry<S>,
    secret: SharedSecret,
    banner: BannerEncoder,
}

impl<S: KeyValueStore> fmt::Debug for AdminGate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("secret", &self.secret)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> AdminGate<S> {
    #[must_use]
    pub fn new(registry: Registry<S>, password: impl AsRef<[u8]>, banner: BannerEncoder) -> Self {
        Self { registry, secret: SharedSecret::new(password), banner }
    }

    /// Builds the gate from the `[admin]` and `[banner]` config sections.
    #[must_use]
    pub fn from_config(registry: Registry<S>, config: &AppConfig) -> Self {
        Self::new(registry, &config.admin.password, BannerEncoder::new(config.banner.max_bytes))
    }

    /// # Errors
    /// [`AdminError::InvalidPassword`] when the password does not match.
    pub fn login(&self, password: &str) -> Result<AdminSession<S>, AdminError> {
        if !self.secret.matches(password) {
            warn!("Admin login rejected");
            return Err(AdminError::InvalidPassword { context: None });
        }
        info!("Admin logged in");
        Ok(AdminSession::new(self.registry.clone(), self.banner))
    }
}
