use serde::Deserialize;
use uuid::Uuid;

/// An installed executable on the target computer
#[derive(Debug, Clone, Deserialize)]
pub struct Code {
    pub uuid: Uuid,
    pub label: String,
    pub remote_exec_path: String,
}
