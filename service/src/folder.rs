use std::collections::BTreeMap;

use anyhow::Context;
use domain::service::{InputFolder, SandboxFolder};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Folder kept entirely in memory, usable both as input folder and as sandbox
#[derive(Debug)]
pub struct MemoryFolder {
    uuid: Uuid,
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFolder {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            files: Mutex::default(),
        }
    }

    pub fn from_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            uuid: Uuid::new_v4(),
            files: Mutex::new(files.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }
}

impl Default for MemoryFolder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InputFolder for MemoryFolder {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    async fn list_files(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.lock().await.keys().cloned().collect())
    }

    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        self.get(path).await.with_context(|| format!("No such file: {path}"))
    }
}

#[async_trait::async_trait]
impl SandboxFolder for MemoryFolder {
    async fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        self.files.lock().await.insert(name.to_owned(), content.to_vec());
        Ok(())
    }

    async fn content_list(&self) -> anyhow::Result<Vec<String>> {
        self.list_files().await
    }
}
