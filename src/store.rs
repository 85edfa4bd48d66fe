use crate::challenges::default_pool;
use crate::errors::ProgressError;
use crate::models::UserProgress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{env, path::Path, path::PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

/// On-disk snapshot of the whole store: every user document plus the global
/// challenge pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreData {
    pub users: BTreeMap<String, UserProgress>,
    pub challenge_pool: Vec<String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            challenge_pool: default_pool(),
        }
    }
}

struct VersionedDoc {
    version: u64,
    doc: UserProgress,
}

struct StoreInner {
    users: BTreeMap<String, VersionedDoc>,
    pool: Vec<String>,
}

impl StoreInner {
    fn to_data(&self) -> StoreData {
        StoreData {
            users: self
                .users
                .iter()
                .map(|(name, entry)| (name.clone(), entry.doc.clone()))
                .collect(),
            challenge_pool: self.pool.clone(),
        }
    }
}

/// Document store holding one progression document per user. Derived updates
/// go through `run_transaction`, which commits against the version observed at
/// snapshot time and retries once on conflict. The full store is written back
/// to disk on every committed mutation.
pub struct ProgressStore {
    data_path: PathBuf,
    inner: Mutex<StoreInner>,
}

impl ProgressStore {
    pub fn new(data_path: PathBuf, data: StoreData) -> Self {
        let pool = if data.challenge_pool.is_empty() {
            default_pool()
        } else {
            data.challenge_pool
        };
        let users = data
            .users
            .into_iter()
            .map(|(name, doc)| (name, VersionedDoc { version: 0, doc }))
            .collect();
        Self {
            data_path,
            inner: Mutex::new(StoreInner { users, pool }),
        }
    }

    pub async fn create_user(&self, username: &str) -> Result<UserProgress, ProgressError> {
        let mut inner = self.inner.lock().await;
        if inner.users.contains_key(username) {
            return Err(ProgressError::UserExists(username.to_string()));
        }
        let doc = UserProgress::new();
        inner.users.insert(
            username.to_string(),
            VersionedDoc {
                version: 0,
                doc: doc.clone(),
            },
        );
        persist_data(&self.data_path, &inner.to_data()).await?;
        Ok(doc)
    }

    pub async fn get_user_progress(&self, username: &str) -> Result<UserProgress, ProgressError> {
        let (_, doc) = self.snapshot(username).await?;
        Ok(doc)
    }

    pub async fn list_all_users(&self) -> Vec<(String, UserProgress)> {
        let inner = self.inner.lock().await;
        inner
            .users
            .iter()
            .map(|(name, entry)| (name.clone(), entry.doc.clone()))
            .collect()
    }

    pub async fn challenge_pool(&self) -> Vec<String> {
        self.inner.lock().await.pool.clone()
    }

    /// Read-modify-write on one user document. `apply` receives a copy of the
    /// current document; the commit succeeds only if no other writer landed in
    /// between, and conflicts are retried once with a fresh snapshot before
    /// being surfaced. Errors from `apply` abort without writing.
    pub async fn run_transaction<F>(
        &self,
        username: &str,
        mut apply: F,
    ) -> Result<UserProgress, ProgressError>
    where
        F: FnMut(&mut UserProgress) -> Result<(), ProgressError>,
    {
        for attempt in 0..=1 {
            let (version, mut doc) = self.snapshot(username).await?;
            apply(&mut doc)?;
            match self.commit(username, version, doc).await {
                Ok(committed) => return Ok(committed),
                Err(ProgressError::WriteConflict(user)) if attempt == 0 => {
                    debug!(user = %user, "transaction conflicted, retrying");
                }
                Err(err) => return Err(err),
            }
        }
        Err(ProgressError::WriteConflict(username.to_string()))
    }

    async fn snapshot(&self, username: &str) -> Result<(u64, UserProgress), ProgressError> {
        let inner = self.inner.lock().await;
        let entry = inner
            .users
            .get(username)
            .ok_or_else(|| ProgressError::UserNotFound(username.to_string()))?;
        Ok((entry.version, entry.doc.clone()))
    }

    async fn commit(
        &self,
        username: &str,
        expected_version: u64,
        doc: UserProgress,
    ) -> Result<UserProgress, ProgressError> {
        let mut inner = self.inner.lock().await;
        {
            let entry = inner
                .users
                .get_mut(username)
                .ok_or_else(|| ProgressError::UserNotFound(username.to_string()))?;
            if entry.version != expected_version {
                return Err(ProgressError::WriteConflict(username.to_string()));
            }
            entry.version += 1;
            entry.doc = doc.clone();
        }
        persist_data(&self.data_path, &inner.to_data()).await?;
        Ok(doc)
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("ECOTRACK_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/progress.json"))
}

pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StoreData::default()
        }
    }
}

async fn persist_data(path: &Path, data: &StoreData) -> Result<(), ProgressError> {
    let payload =
        serde_json::to_vec_pretty(data).map_err(|err| ProgressError::Unavailable(err.to_string()))?;
    fs::write(path, payload)
        .await
        .map_err(|err| ProgressError::Unavailable(err.to_string()))?;
    Ok(())
}
