use std::{collections::HashMap, fs, path::Path};

use storage::CoursePolicy;

pub const DEFAULT_CONFIG_PATH: &str = "server.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub course_policy: CoursePolicy,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            course_policy: CoursePolicy::Lenient,
            log_filter: "info".into(),
        }
    }
}

/// Loads settings and the problems met along the way. Logging is not up
/// until the returned `log_filter` is known, so warnings are handed back to
/// be emitted once the subscriber exists.
pub fn load_settings() -> (Settings, Vec<String>) {
    load_settings_from(Path::new(DEFAULT_CONFIG_PATH), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `key = "value"` file at `path` if it parses,
/// then environment variables looked up through `env`.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("course_policy") {
                    apply_policy(&mut settings, &mut warnings, v);
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(error) => {
                warnings.push(format!(
                    "ignoring unreadable config file {}: {error}",
                    path.display()
                ));
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__COURSE_POLICY") {
        apply_policy(&mut settings, &mut warnings, &v);
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    (settings, warnings)
}

fn apply_policy(settings: &mut Settings, warnings: &mut Vec<String>, raw: &str) {
    match raw.parse::<CoursePolicy>() {
        Ok(policy) => settings.course_policy = policy,
        Err(error) => {
            warnings.push(format!("{error}; falling back to lenient course policy"));
            settings.course_policy = CoursePolicy::Lenient;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
