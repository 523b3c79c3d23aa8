//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::{ConfigRepository, Terminal};
use crate::infrastructure::adapters::{ConsoleTerminal, JsonConfigRepository};
use crate::infrastructure::config::ShellConfig;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: Box<dyn ConfigRepository>,
    terminal: Arc<dyn Terminal>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(
            Box::new(JsonConfigRepository),
            Arc::new(ConsoleTerminal::new()),
        )
    }
}

impl AppComposition {
    /// 설정 저장소와 터미널 어댑터를 외부에서 주입한다.
    pub fn new(config_repo: Box<dyn ConfigRepository>, terminal: Arc<dyn Terminal>) -> Self {
        Self {
            config_repo,
            terminal,
        }
    }

    /// 세션 시작 전에 설정을 읽는다. 실패는 치명적 설정 오류다.
    pub fn load_config(&self) -> Result<ShellConfig> {
        self.config_repo.load()
    }

    pub fn terminal(&self) -> Arc<dyn Terminal> {
        Arc::clone(&self.terminal)
    }
}
