use crate::{
    error::PrepareError,
    model::entity::{CalcInfo, CalcJobInputs},
};

use super::SandboxFolder;

#[async_trait::async_trait]
pub trait CalcJobPreparer {
    /// Writes raw input files into `sandbox` and describes the rest of the job.
    async fn prepare(
        &self,
        inputs: &CalcJobInputs,
        sandbox: &dyn SandboxFolder,
    ) -> Result<CalcInfo, PrepareError>;
}

pub trait SelectCalcJobPreparer {
    fn select(&self, plugin: CalcJobPlugin) -> &(dyn CalcJobPreparer + Send + Sync);
}

/// Entry points of the supported calculation plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum CalcJobPlugin {
    #[strum(serialize = "wannier90.wannier90")]
    Wannier90,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::CalcJobPlugin;

    #[test]
    fn entry_point() {
        assert_eq!(
            CalcJobPlugin::from_str("wannier90.wannier90").unwrap(),
            CalcJobPlugin::Wannier90
        );
        assert_eq!(CalcJobPlugin::Wannier90.to_string(), "wannier90.wannier90");
        assert!(CalcJobPlugin::from_str("quantumespresso.pw").is_err());
    }
}
