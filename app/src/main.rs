mod config;
mod dto;
mod infrastructure;

use anyhow::Context;
use colored::Colorize;
use domain::{
    model::entity::CalcInfo,
    service::{InputFolder, SelectCalcJobPreparer},
};

use self::config::{build_config, AppConfig};
use self::dto::JobDescription;
use self::infrastructure::folder::DirSandbox;
use self::infrastructure::ioc::Container;
use self::infrastructure::service::stage_local_copies;
use self::infrastructure::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = build_config().with_context(|| "Failed to build config".red())?;
    let app_config: AppConfig = config.try_deserialize()?;

    init_telemetry(&app_config.telemetry).with_context(|| "Failed to initialize logger".red())?;

    let container = Container::new();
    let calc_info = run(&container, &app_config).await?;

    tracing::info!(
        calc_info = %app_config.calc_info_file,
        local_copies = calc_info.local_copy_list.len(),
        retrieve = calc_info.retrieve_list.len(),
        "Calculation prepared"
    );
    Ok(())
}

async fn run(container: &Container, app_config: &AppConfig) -> anyhow::Result<CalcInfo> {
    let job = JobDescription::load(&app_config.job_file)
        .await
        .with_context(|| "Cannot load job description".red())?;
    let plugin = job.plugin()?;
    let inputs = job.into_inputs();
    let sandbox = DirSandbox::create(&app_config.sandbox_path).await?;

    let calc_info = container
        .select(plugin)
        .prepare(&inputs, &sandbox)
        .await
        .with_context(|| format!("{plugin} preparation failed").red())?;

    let output = serde_json::to_vec_pretty(&calc_info)?;
    tokio::fs::write(&app_config.calc_info_file, output)
        .await
        .with_context(|| format!("Unable to write {}", app_config.calc_info_file))?;

    if app_config.stage_local_copies {
        let folders: Vec<&dyn InputFolder> =
            inputs.local_input_folder.iter().map(|f| &**f).collect();
        let staged = stage_local_copies(&calc_info, &folders, &sandbox).await?;
        tracing::info!(staged, sandbox = %app_config.sandbox_path, "Staged local copies");
    }
    Ok(calc_info)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use indoc::formatdoc;

    use super::{config::AppConfig, config::TelemetryConfig, infrastructure::ioc::Container, run};

    fn app_config(root: &Path, stage_local_copies: bool) -> AppConfig {
        let path = |name: &str| root.join(name).to_string_lossy().into_owned();
        AppConfig {
            job_file: path("job.json"),
            sandbox_path: path("sandbox"),
            calc_info_file: path("calc_info.json"),
            stage_local_copies,
            telemetry: TelemetryConfig::default(),
        }
    }

    fn write_job(root: &Path, extra: &str) {
        let gaas = root.join("gaas");
        std::fs::create_dir_all(&gaas).unwrap();
        for name in ["aiida.mmn", "aiida.amn", "UNK00001.1", "UNK00002.1", "aiida.pw.out"] {
            std::fs::write(gaas.join(name), name).unwrap();
        }
        let job = formatdoc! {
            r#"{{
                 "entry_point": "wannier90.wannier90",
                 "code": {{
                   "uuid": "46099d7c-a982-41a0-9370-cac6df35114e",
                   "label": "wannier90",
                   "remote_exec_path": "wannier90.x"
                 }},
                 "parameters": {{ "num_wann": 4 }},
                 "structure": {{
                   "cell": [[5.0, 0, 0], [0, 5.0, 0], [0, 0, 5.0]],
                   "sites": [{{ "kind_name": "Si", "position": [0, 0, 0] }}]
                 }},
                 "kpoints": {{ "mesh": [1, 1, 2] }},
                 "local_input_folder": {{ "path": "{gaas}" }}{extra}
               }}"#,
            gaas = gaas.display(),
            extra = extra,
        };
        std::fs::write(root.join("job.json"), job).unwrap();
    }

    #[tokio::test]
    async fn prepare_and_stage() {
        let dir = tempfile::tempdir().unwrap();
        write_job(dir.path(), "");
        let config = app_config(dir.path(), true);

        let calc_info = run(&Container::new(), &config).await.unwrap();

        assert_eq!(calc_info.local_copy_list.len(), 4);
        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&config.calc_info_file).unwrap()).unwrap();
        assert_eq!(written["codes_info"][0]["cmdline_params"][0], "aiida");

        let mut sandbox: Vec<String> = std::fs::read_dir(&config.sandbox_path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        sandbox.sort();
        assert_eq!(sandbox, vec!["UNK00001.1", "UNK00002.1", "aiida.amn", "aiida.mmn", "aiida.win"]);
    }

    #[tokio::test]
    async fn validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_job(dir.path(), r#", "metadata": { "options": { "seedname": "wannier" } }"#);
        let config = app_config(dir.path(), false);

        assert!(run(&Container::new(), &config).await.is_err());
        assert!(!Path::new(&config.calc_info_file).exists());
        assert_eq!(std::fs::read_dir(&config.sandbox_path).unwrap().count(), 0);
    }
}
