use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::{Code, KpointPath, KpointsMesh, Structure};
use crate::model::vo::{ParameterValue, Projection};
use crate::service::InputFolder;

/// Everything declared for one submission attempt
#[derive(TypedBuilder)]
pub struct CalcJobInputs {
    pub code: Code,
    #[builder(default)]
    pub metadata: Metadata,
    pub parameters: BTreeMap<String, ParameterValue>,
    pub structure: Structure,
    pub kpoints: KpointsMesh,
    #[builder(default, setter(strip_option))]
    pub kpoint_path: Option<KpointPath>,
    #[builder(default, setter(strip_option))]
    pub projections: Option<Vec<Projection>>,
    /// Files produced by an earlier step (overlaps, projections, UNK grids)
    #[builder(default, setter(strip_option))]
    pub local_input_folder: Option<Arc<dyn InputFolder>>,
    #[builder(default, setter(strip_option))]
    pub remote_input_folder: Option<RemoteFolder>,
    #[builder(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub options: CalcOptions,
}

/// 作业选项
#[derive(Debug, Clone, Deserialize)]
pub struct CalcOptions {
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub max_wallclock_seconds: Option<u64>,
    #[serde(default)]
    pub withmpi: bool,
    /// Defaults to `aiida` when absent
    #[serde(default)]
    pub seedname: Option<String>,
}

/// 计算资源
#[derive(Debug, Clone, Deserialize)]
pub struct Resources {
    pub num_machines: u32,
    #[serde(default)]
    pub num_mpiprocs_per_machine: Option<u32>,
}

/// A folder that already lives on the target computer
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFolder {
    pub computer: Uuid,
    pub path: String,
}

/// Plugin-specific switches
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Run `wannier90.x -pp` to produce only `<seedname>.nnkp`
    pub postproc_setup: bool,
    /// Prepend `random` to the projections block
    pub random_projections: bool,
    /// Globs removed from the default retrieve list
    pub exclude_retrieve_list: Vec<String>,
    pub additional_retrieve_list: Vec<String>,
    /// Copy remote inputs instead of symlinking them
    pub copy_remote_input: bool,
}

impl CalcJobInputs {
    pub fn options(&self) -> &CalcOptions {
        &self.metadata.options
    }
}

impl fmt::Debug for CalcJobInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalcJobInputs")
            .field("code", &self.code)
            .field("metadata", &self.metadata)
            .field("parameters", &self.parameters)
            .field("local_input_folder", &self.local_input_folder.as_ref().map(|f| f.uuid()))
            .field("remote_input_folder", &self.remote_input_folder)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            resources: Resources::default(),
            max_wallclock_seconds: None,
            withmpi: false,
            seedname: None,
        }
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            num_machines: 1,
            num_mpiprocs_per_machine: None,
        }
    }
}
