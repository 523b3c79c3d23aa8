//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use super::types::{ConfigFile, ShellConfig};

pub const CONFIG_FILE_NAME: &str = "cli.json";
pub const CONFIG_ENV: &str = "SPECTRA_CONFIG";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: ShellConfig,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    if let Ok(path) = env::var(CONFIG_ENV)
        && !Path::new(&path).exists()
    {
        // 명시 경로는 조용히 건너뛰지 않는다.
        bail!("{CONFIG_FILE_NAME} not found at {path} (from ${CONFIG_ENV})");
    }

    load_from_paths(&config_paths())
}

/// 주어진 경로들을 낮은 우선순위부터 병합한다. 없는 파일은 건너뛴다.
pub(crate) fn load_from_paths(paths: &[PathBuf]) -> Result<LoadedConfig> {
    let mut merged = ConfigFile::default();
    let mut loaded_paths = Vec::new();

    for path in paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: ConfigFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        debug!(
            path = %path.display(),
            commands = parsed.commands.as_ref().map_or(0, |c| c.len()),
            "config file loaded"
        );
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    if loaded_paths.is_empty() {
        let searched = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("{CONFIG_FILE_NAME} not found (searched: {searched})");
    }

    let config = ShellConfig::try_from(merged).with_context(|| {
        format!(
            "invalid config (loaded from {})",
            loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;
    info!(name = %config.name, commands = config.commands.len(), "config ready");

    Ok(LoadedConfig {
        config,
        loaded_paths,
    })
}

/// 실행 파일 위치 + 사용자 + 현재 디렉터리 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = Vec::new();

    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("spectra").join(CONFIG_FILE_NAME));
    }

    paths.push(PathBuf::from(CONFIG_FILE_NAME));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(path));
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
