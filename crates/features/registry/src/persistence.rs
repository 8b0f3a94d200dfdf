use boxdraft_domain::AppState;
use boxdraft_storage::KeyValueStore;
use tracing::{error, info, warn};

/// Reads the snapshot stored under `key`, falling back to the seed state.
///
/// A missing value, a store failure and a value that does not parse all yield
/// [`AppState::default`]. None of them is an error for the caller.
pub(crate) async fn load<S: KeyValueStore>(store: &S, key: &str) -> AppState {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!(key, "No stored snapshot, starting from defaults");
            return AppState::default();
        },
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored snapshot, starting from defaults");
            return AppState::default();
        },
    };

    match serde_json::from_str::<AppState>(&raw) {
        Ok(state) => {
            info!(
                key,
                questions = state.questions.len(),
                players = state.players.len(),
                boxes = state.boxes.len(),
                "Snapshot loaded"
            );
            state
        },
        Err(e) => {
            warn!(key, error = %e, "Stored snapshot is malformed, starting from defaults");
            AppState::default()
        },
    }
}

/// Writes the whole snapshot under `key`. Failures are logged and swallowed.
pub(crate) async fn persist<S: KeyValueStore>(store: &S, key: &str, state: &AppState) -> bool {
    let raw = match serde_json::to_string(state) {
        Ok(raw) => raw,
        Err(e) => {
            error!(key, error = %e, "Failed to serialize snapshot");
            return false;
        },
    };

    match store.set(key, &raw).await {
        Ok(()) => true,
        Err(e) => {
            error!(key, bytes = raw.len(), error = %e, "Failed to persist snapshot");
            false
        },
    }
}
