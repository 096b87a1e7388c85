use std::path::{Path, PathBuf};

use anyhow::Context;
use domain::service::{InputFolder, SandboxFolder};
use tokio::fs;
use uuid::Uuid;

/// Input folder backed by a local directory
#[derive(Debug)]
pub struct DirInputFolder {
    uuid: Uuid,
    root: PathBuf,
}

/// Sandbox backed by a local directory
#[derive(Debug)]
pub struct DirSandbox {
    root: PathBuf,
}

impl DirInputFolder {
    pub fn new(root: impl Into<PathBuf>, uuid: Uuid) -> Self {
        Self {
            uuid,
            root: root.into(),
        }
    }
}

impl DirSandbox {
    pub async fn create(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Unable to create sandbox {}", root.display()))?;
        Ok(Self { root })
    }
}

#[async_trait::async_trait]
impl InputFolder for DirInputFolder {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    async fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();
        let mut pending = vec![PathBuf::new()];
        while let Some(relative) = pending.pop() {
            let dir = self.root.join(&relative);
            let mut entries = fs::read_dir(&dir)
                .await
                .with_context(|| format!("Unable to read directory {}", dir.display()))?;
            while let Some(entry) = entries.next_entry().await? {
                let path = relative.join(entry.file_name());
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else {
                    files.push(slash_path(&path));
                }
            }
        }
        files.sort();
        tracing::trace!(root = %self.root.display(), count = files.len(), "Listed input folder");
        Ok(files)
    }

    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let p = self.root.join(path);
        fs::read(&p).await.with_context(|| format!("Unable to read {}", p.display()))
    }
}

#[async_trait::async_trait]
impl SandboxFolder for DirSandbox {
    async fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let p = self.root.join(name);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&p, content).await.with_context(|| format!("Unable to write {}", p.display()))
    }

    async fn content_list(&self) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
