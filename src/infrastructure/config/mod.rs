//! 사용자 설정(`cli.json`) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고 명령 스텝까지 검증한다.

mod loader;
mod types;

use anyhow::Result;
use tracing::debug;

pub use loader::{CONFIG_ENV, CONFIG_FILE_NAME, config_paths};
pub use types::{ConfigFile, DEFAULT_BANNER_COLOR, ShellConfig};

impl ShellConfig {
    /// 병합·검증된 최종 설정을 로딩한다.
    pub fn load() -> Result<Self> {
        let loaded = loader::load_merged_config()?;
        debug!(paths = ?loaded.loaded_paths, "config sources");
        Ok(loaded.config)
    }
}
