use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use domain::{
    model::{
        entity::{
            CalcJobInputs, Code, KpointPath, KpointsMesh, Metadata, RemoteFolder, Settings,
            Structure,
        },
        vo::{ParameterValue, Projection},
    },
    service::{CalcJobPlugin, InputFolder},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::infrastructure::folder::DirInputFolder;

/// 作业描述文件
#[derive(Debug, Deserialize)]
pub struct JobDescription {
    /// e.g. `wannier90.wannier90`
    pub entry_point: String,
    pub code: Code,
    #[serde(default)]
    pub metadata: Metadata,
    pub parameters: BTreeMap<String, ParameterValue>,
    pub structure: Structure,
    pub kpoints: KpointsMesh,
    #[serde(default)]
    pub kpoint_path: Option<KpointPath>,
    #[serde(default)]
    pub projections: Option<Vec<Projection>>,
    #[serde(default)]
    pub local_input_folder: Option<LocalFolder>,
    #[serde(default)]
    pub remote_input_folder: Option<RemoteFolder>,
    #[serde(default)]
    pub settings: Settings,
}

/// A directory on this machine
#[derive(Debug, Deserialize)]
pub struct LocalFolder {
    pub path: PathBuf,
    /// Generated when absent
    #[serde(default)]
    pub uuid: Option<Uuid>,
}

impl JobDescription {
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Unable to read {}", path.display()))?;
        serde_json::from_slice(&content).with_context(|| format!("Invalid job description {}", path.display()))
    }

    pub fn plugin(&self) -> anyhow::Result<CalcJobPlugin> {
        CalcJobPlugin::from_str(&self.entry_point)
            .with_context(|| format!("Unsupported entry point `{}`", self.entry_point))
    }

    pub fn into_inputs(self) -> CalcJobInputs {
        let local_input_folder = self.local_input_folder.map(|folder| {
            let uuid = folder.uuid.unwrap_or_else(Uuid::new_v4);
            Arc::new(DirInputFolder::new(folder.path, uuid)) as Arc<dyn InputFolder>
        });

        CalcJobInputs {
            code: self.code,
            metadata: self.metadata,
            parameters: self.parameters,
            structure: self.structure,
            kpoints: self.kpoints,
            kpoint_path: self.kpoint_path,
            projections: self.projections,
            local_input_folder,
            remote_input_folder: self.remote_input_folder,
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{
        model::vo::ParameterValue,
        service::{CalcJobPlugin, InputFolder},
    };
    use indoc::indoc;

    use super::JobDescription;

    const GAAS: &str = indoc! {
        r#"{
             "entry_point": "wannier90.wannier90",
             "code": {
               "uuid": "46099d7c-a982-41a0-9370-cac6df35114e",
               "label": "wannier90-3.1",
               "remote_exec_path": "/opt/wannier90/wannier90.x"
             },
             "metadata": {
               "options": {
                 "resources": { "num_machines": 1 },
                 "max_wallclock_seconds": 3600,
                 "withmpi": false,
                 "seedname": "wannier"
               }
             },
             "parameters": {
               "num_wann": 4,
               "num_iter": 12,
               "wvfn_formatted": true,
               "exclude_bands": [1, 2, 3, 4, 5]
             },
             "structure": {
               "cell": [[-2.825, 0, 2.825], [0, 2.825, 2.825], [-2.825, 2.825, 0]],
               "sites": [
                 { "kind_name": "Ga", "position": [0, 0, 0] },
                 { "kind_name": "As", "position": [1.4125, 1.4125, 1.4125] }
               ]
             },
             "kpoints": { "mesh": [2, 2, 2] },
             "kpoint_path": {
               "path": [["G", "X"]],
               "point_coords": { "G": [0, 0, 0], "X": [0.5, 0, 0.5] }
             },
             "projections": [
               { "site": { "kind": "As" }, "ang_mtm": ["sp3"] }
             ],
             "local_input_folder": {
               "path": "gaas",
               "uuid": "10b712f0-5577-4f79-a582-330b51abbc13"
             }
           }"#
    };

    #[test]
    fn gaas() {
        let job = serde_json::from_str::<JobDescription>(GAAS).unwrap();
        assert_eq!(job.plugin().unwrap(), CalcJobPlugin::Wannier90);
        assert_eq!(job.parameters["num_wann"], ParameterValue::Int(4));

        let inputs = job.into_inputs();
        assert_eq!(inputs.options().seedname.as_deref(), Some("wannier"));
        assert_eq!(
            inputs.local_input_folder.unwrap().uuid().to_string(),
            "10b712f0-5577-4f79-a582-330b51abbc13"
        );
        assert!(inputs.remote_input_folder.is_none());
        assert!(!inputs.settings.postproc_setup);
    }

    #[test]
    fn unsupported_entry_point() {
        let s = GAAS.replace("wannier90.wannier90", "quantumespresso.pw");
        let job = serde_json::from_str::<JobDescription>(&s).unwrap();
        assert!(job.plugin().is_err());
    }

    #[test]
    fn unknown_setting() {
        let s = GAAS.replacen('{', r#"{ "settings": { "parser": "none" },"#, 1);
        assert!(serde_json::from_str::<JobDescription>(&s).is_err());
    }
}
