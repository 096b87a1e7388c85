use serde::*;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_job_file")]
    pub job_file: String,

    #[serde(default = "AppConfig::default_sandbox_path")]
    pub sandbox_path: String,

    #[serde(default = "AppConfig::default_calc_info_file")]
    pub calc_info_file: String,

    /// Copy the local copy list into the sandbox after preparing
    #[serde(default = "Default::default")]
    pub stage_local_copies: bool,

    #[serde(default = "Default::default")]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "TelemetryConfig::default_log_filter")]
    pub log_filter: String,

    #[serde(default = "Default::default")]
    pub with_target: bool,
}

/// `config.yaml` in the working directory, overridden by `W90PREP__*` variables.
pub fn build_config() -> Result<config::Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("W90PREP").separator("__"))
        .build()
}

impl AppConfig {
    pub fn default_job_file() -> String {
        "job.json".to_owned()
    }

    pub fn default_sandbox_path() -> String {
        "sandbox".to_owned()
    }

    pub fn default_calc_info_file() -> String {
        "calc_info.json".to_owned()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: Self::default_log_filter(),
            with_target: false,
        }
    }
}

impl TelemetryConfig {
    pub fn default_log_filter() -> String {
        "info".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::AppConfig;

    fn parse(yaml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse("stage_local_copies: true");
        assert_eq!(config.job_file, "job.json");
        assert_eq!(config.sandbox_path, "sandbox");
        assert_eq!(config.calc_info_file, "calc_info.json");
        assert!(config.stage_local_copies);
        assert_eq!(config.telemetry.log_filter, "info");
    }

    #[test]
    fn nested() {
        let config = parse(indoc! {"
            job_file: gaas/job.json
            telemetry:
              log_filter: service=debug,info
              with_target: true
        "});
        assert_eq!(config.job_file, "gaas/job.json");
        assert_eq!(config.telemetry.log_filter, "service=debug,info");
        assert!(config.telemetry.with_target);
        assert!(!config.stage_local_copies);
    }
}
