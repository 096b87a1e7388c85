use anyhow::Context;
use domain::{
    model::entity::CalcInfo,
    service::{InputFolder, SandboxFolder},
};

/// 将本地拷贝清单中的文件写入沙箱
pub async fn stage_local_copies(
    calc_info: &CalcInfo,
    folders: &[&dyn InputFolder],
    sandbox: &dyn SandboxFolder,
) -> anyhow::Result<usize> {
    for copy in calc_info.local_copy_list.iter() {
        let folder = folders
            .iter()
            .find(|f| f.uuid() == copy.uuid)
            .with_context(|| format!("No input folder with uuid {}", copy.uuid))?;
        let content = folder.read(&copy.source).await?;
        sandbox
            .write(&copy.target, &content)
            .await
            .with_context(|| format!("Unable to stage {}", copy.target))?;
        tracing::debug!(source = %copy.source, target = %copy.target, "Staged local copy");
    }
    Ok(calc_info.local_copy_list.len())
}
