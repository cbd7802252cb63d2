pub mod kv;
pub mod local;

use std::sync::Arc;

use anyhow::Context;
use derive_more::Display;
use tracing::info;

use crate::config::{Config, StateBackend};
use kv::{FileKv, KeyValueStore, MemoryKv};
pub use local::LocalStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "storage io error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "malformed value under `{}`: {}", key, source)]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[display(fmt = "could not encode `{}`: {}", key, source)]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[display(fmt = "storage lock poisoned")]
    Poisoned,
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Malformed { source, .. } | StoreError::Encode { source, .. } => Some(source),
            StoreError::Poisoned => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Open the backend named in config.
pub fn init_store(config: &Config) -> anyhow::Result<Arc<LocalStore>> {
    let kv: Box<dyn KeyValueStore> = match config.state_backend {
        StateBackend::File => {
            let kv = FileKv::open(&config.state_dir).with_context(|| {
                format!("failed to open state directory {}", config.state_dir.display())
            })?;
            info!(dir = %kv.dir().display(), "Using file state store");
            Box::new(kv)
        }
        StateBackend::Memory => {
            info!("Using in-memory state store; nothing survives a restart");
            Box::new(MemoryKv::new())
        }
    };

    Ok(Arc::new(LocalStore::new(kv)))
}
