//! spectra library root.
//! 설정(`cli.json`)이 명령 어휘를 공급하는 대화형 셸.
//! Clean Architecture 계층을 외부에 노출한다.

use std::sync::Arc;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

pub use application::capabilities::{Capabilities, SpinnerState};
pub use application::error::{DispatchError, ExecutionError};
pub use application::ports::{CommandBehavior, Terminal};
pub use application::registry::{BehaviorFuture, Registry};
pub use application::usecases::dispatch::SessionOutcome;
pub use domain::style::ColorTag;
pub use infrastructure::adapters::{ConsoleTerminal, ScriptedTerminal};
pub use infrastructure::config::ShellConfig;
pub use interface::cli::run_shell;

/// 라이브러리 직접 호출용 실행 함수.
/// 설정 명령으로 레지스트리를 만들고 주어진 터미널에서 세션을 돈다.
pub async fn run_session(config: &ShellConfig, terminal: Arc<dyn Terminal>) -> Result<SessionOutcome> {
    let registry = infrastructure::script::build_registry(config);
    interface::cli::run_shell(config, &registry, terminal).await
}
