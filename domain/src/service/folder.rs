use uuid::Uuid;

/// Read-only collection of files keyed by relative path
#[async_trait::async_trait]
pub trait InputFolder: Send + Sync {
    /// Identifies the folder in a local copy list
    fn uuid(&self) -> Uuid;
    /// Relative paths of every file, `/`-separated
    async fn list_files(&self) -> anyhow::Result<Vec<String>>;
    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>>;
}

/// Staging area whose content becomes the job's raw input
#[async_trait::async_trait]
pub trait SandboxFolder: Send + Sync {
    async fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()>;
    async fn content_list(&self) -> anyhow::Result<Vec<String>>;
}
