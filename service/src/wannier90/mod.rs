mod manifest;
mod win;

use std::collections::BTreeMap;

use anyhow::Context;
use dep_inj::DepInj;
use domain::{
    error::PrepareError,
    model::{
        entity::{CalcInfo, CalcJobInputs, CalcOptions, CodeInfo},
        vo::ParameterValue,
    },
    service::{CalcJobPreparer, SandboxFolder},
};
use regex::Regex;

pub const DEFAULT_SEEDNAME: &str = "aiida";

/// Keywords derived from the structure, k-points and projections inputs
const BLOCKED_KEYWORDS: [&str; 8] = [
    "mp_grid",
    "unit_cell_cart",
    "atoms_cart",
    "atoms_frac",
    "kpoints",
    "kpoint_path",
    "projections",
    "postproc_setup",
];

#[derive(DepInj)]
#[target(Wannier90Calculation)]
pub struct Wannier90CalculationState {
    default_seedname: String,
    seedname_pattern: Regex,
    unk_file: Regex,
}

impl Wannier90CalculationState {
    pub fn new() -> Self {
        Self {
            default_seedname: DEFAULT_SEEDNAME.to_owned(),
            seedname_pattern: Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*$").unwrap(),
            unk_file: Regex::new(r"^UNK\d{5}\.(\d+|NC)$").unwrap(),
        }
    }
}

impl Default for Wannier90CalculationState {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<Deps> CalcJobPreparer for Wannier90Calculation<Deps>
where
    Deps: AsRef<Wannier90CalculationState> + Send + Sync,
{
    async fn prepare(
        &self,
        inputs: &CalcJobInputs,
        sandbox: &dyn SandboxFolder,
    ) -> Result<CalcInfo, PrepareError> {
        let seedname = self.seedname(inputs.options())?;
        let settings = &inputs.settings;
        tracing::debug!(%seedname, postproc_setup = settings.postproc_setup, "Preparing wannier90");

        let mut calc_info = CalcInfo::default();
        self.stage_input_folders(inputs, seedname, &mut calc_info).await?;

        let parameters = normalize_parameters(&inputs.parameters)?;
        if let Some(path) = &inputs.kpoint_path {
            let missing = path.missing_labels();
            if !missing.is_empty() {
                return Err(PrepareError::invalid(format!(
                    "kpoint_path has no coordinates for {}",
                    missing.join(", ")
                )));
            }
        }
        calc_info.retrieve_list = manifest::retrieve_list(seedname, settings)?;

        let win = win::render(inputs, parameters);
        let input_filename = format!("{seedname}.win");
        sandbox
            .write(&input_filename, win.as_bytes())
            .await
            .with_context(|| format!("Unable to write {input_filename}"))?;

        let cmdline_params = if settings.postproc_setup {
            vec!["-pp".to_owned(), seedname.to_owned()]
        } else {
            vec![seedname.to_owned()]
        };
        calc_info.codes_info.push(CodeInfo {
            code_uuid: inputs.code.uuid,
            cmdline_params,
            withmpi: inputs.options().withmpi,
        });

        tracing::info!(
            %seedname,
            local_copies = calc_info.local_copy_list.len(),
            remote_copies = calc_info.remote_copy_list.len() + calc_info.remote_symlink_list.len(),
            "Prepared wannier90 calculation"
        );
        Ok(calc_info)
    }
}

impl<Deps> Wannier90Calculation<Deps>
where
    Deps: AsRef<Wannier90CalculationState> + Send + Sync,
{
    fn seedname<'a>(&'a self, options: &'a CalcOptions) -> Result<&'a str, PrepareError> {
        let seedname = options.seedname.as_deref().unwrap_or(&self.default_seedname);
        if !self.seedname_pattern.is_match(seedname) {
            return Err(PrepareError::invalid(format!("invalid seedname `{seedname}`")));
        }
        Ok(seedname)
    }

    async fn stage_input_folders(
        &self,
        inputs: &CalcJobInputs,
        seedname: &str,
        calc_info: &mut CalcInfo,
    ) -> Result<(), PrepareError> {
        let settings = &inputs.settings;
        match (&inputs.local_input_folder, &inputs.remote_input_folder) {
            (Some(_), Some(_)) => Err(PrepareError::invalid(
                "local_input_folder and remote_input_folder are mutually exclusive",
            )),
            (local, remote) if settings.postproc_setup => {
                if local.is_some() || remote.is_some() {
                    tracing::warn!(%seedname, "Input folder is not used by postproc setup");
                }
                Ok(())
            }
            (Some(folder), None) => {
                let files = folder.list_files().await.context("Unable to list local_input_folder")?;
                calc_info.local_copy_list =
                    manifest::local_copy_list(seedname, folder.uuid(), &files, &self.unk_file)?;
                Ok(())
            }
            (None, Some(folder)) => {
                let list = manifest::remote_input_list(seedname, folder);
                if settings.copy_remote_input {
                    calc_info.remote_copy_list = list;
                } else {
                    calc_info.remote_symlink_list = list;
                }
                Ok(())
            }
            (None, None) => Err(PrepareError::invalid(
                "either local_input_folder or remote_input_folder is required",
            )),
        }
    }
}

/// Lowercases keys, rejecting duplicates and derived keywords.
fn normalize_parameters(
    parameters: &BTreeMap<String, ParameterValue>,
) -> Result<BTreeMap<String, ParameterValue>, PrepareError> {
    let mut normalized = BTreeMap::new();
    for (key, value) in parameters {
        let lower = key.to_lowercase();
        if BLOCKED_KEYWORDS.contains(&lower.as_str()) {
            return Err(PrepareError::invalid(format!(
                "`{key}` is derived from the other inputs and can't be set in parameters"
            )));
        }
        if normalized.insert(lower, value.clone()).is_some() {
            return Err(PrepareError::invalid(format!(
                "parameter `{key}` is given more than once (keys are case-insensitive)"
            )));
        }
    }
    Ok(normalized)
}
