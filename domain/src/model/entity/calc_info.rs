use serde::Serialize;
use uuid::Uuid;

/// What the submission layer copies in, retrieves out, and runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalcInfo {
    pub codes_info: Vec<CodeInfo>,
    pub local_copy_list: Vec<LocalCopy>,
    pub remote_copy_list: Vec<RemoteCopy>,
    pub remote_symlink_list: Vec<RemoteCopy>,
    /// 作业结束后取回的文件名或通配符
    pub retrieve_list: Vec<String>,
    /// 取回后解析完即删除
    pub retrieve_temporary_list: Vec<String>,
}

/// 单个程序的调用方式
#[derive(Debug, Clone, Serialize)]
pub struct CodeInfo {
    pub code_uuid: Uuid,
    pub cmdline_params: Vec<String>,
    pub withmpi: bool,
}

/// Copy `source` out of the local folder `uuid` to `target` in the job directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LocalCopy {
    pub uuid: Uuid,
    pub source: String,
    pub target: String,
}

/// Copy or link `source` on `computer` to `target` in the job directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RemoteCopy {
    pub computer: Uuid,
    pub source: String,
    pub target: String,
}

impl LocalCopy {
    pub fn same_name(uuid: Uuid, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uuid,
            source: name.clone(),
            target: name,
        }
    }
}
