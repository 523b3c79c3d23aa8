//! 입력 한 줄을 읽고 명령을 찾아 실행하는 디스패치 루프 유스케이스.

use tracing::{debug, info, warn};

use crate::application::capabilities::Capabilities;
use crate::application::error::{DispatchError, ExecutionError};
use crate::application::ports::CommandBehavior;
use crate::application::registry::Registry;
use crate::domain::style::ColorTag;

pub const HELP_COMMAND: &str = "help";
pub const EXIT_COMMAND: &str = "exit";
const PROMPT: &str = "> ";

/// 세션이 끝난 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 사용자가 `exit`를 입력했다.
    Exited,
    /// 입력 스트림이 닫혔다(EOF).
    InputClosed,
}

/// 예약어. 같은 이름의 설정 명령보다 항상 우선한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Help,
    Exit,
}

impl Builtin {
    fn parse(input: &str) -> Option<Self> {
        match input {
            HELP_COMMAND => Some(Self::Help),
            EXIT_COMMAND => Some(Self::Exit),
            _ => None,
        }
    }
}

/// 레지스트리와 기능 표면을 빌려 읽기-해석-실행 루프를 돈다.
pub struct DispatchLoopUseCase<'a> {
    pub registry: &'a Registry,
    pub caps: &'a Capabilities,
}

impl<'a> DispatchLoopUseCase<'a> {
    pub fn resolve(&self, name: &str) -> Option<&'a dyn CommandBehavior> {
        self.registry.resolve(name)
    }

    /// 레지스트리 명령 하나를 실행한다. 예약어는 여기서 다루지 않는다.
    /// 명령이 남긴 스피너는 결과와 무관하게 정리한다.
    pub async fn dispatch(&self, name: &str) -> Result<(), DispatchError> {
        let behavior = self
            .resolve(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        debug!(command = name, "dispatching");
        let result = behavior.run(self.caps).await;

        if self.caps.spinner().halt().await? {
            debug!(command = name, "halted spinner left running by command");
        }
        result.map_err(DispatchError::from)
    }

    /// `exit` 또는 입력 종료까지 루프를 돈다.
    /// 명령 실패는 보고 후 계속 진행하며, 터미널 자체가 실패할 때만 오류를 돌려준다.
    pub async fn execute(&self) -> Result<SessionOutcome, ExecutionError> {
        let terminal = self.caps.terminal();
        let candidates = self.completion_candidates();
        info!(commands = self.registry.len(), "session started");
        if self.registry.is_empty() {
            warn!("no commands registered; only help and exit are available");
        }

        loop {
            let Some(raw_input) = terminal.read_command(PROMPT, ColorTag::Magenta, &candidates)?
            else {
                info!("input closed; ending session");
                return Ok(SessionOutcome::InputClosed);
            };
            let input = raw_input.trim();

            match Builtin::parse(input) {
                Some(Builtin::Exit) => {
                    self.caps
                        .print_line(&self.caps.colorize("Exiting...", ColorTag::Red))?;
                    info!("session ended by exit");
                    return Ok(SessionOutcome::Exited);
                }
                Some(Builtin::Help) => self.print_help()?,
                None => self.dispatch_and_report(input).await?,
            }
        }
    }

    async fn dispatch_and_report(&self, input: &str) -> Result<(), ExecutionError> {
        match self.dispatch(input).await {
            Ok(()) => Ok(()),
            Err(DispatchError::UnknownCommand(name)) => {
                debug!(command = %name, "unknown command");
                self.caps.print_line(&self.caps.colorize(
                    "Unknown command! Type 'help' to list commands.",
                    ColorTag::Red,
                ))
            }
            Err(DispatchError::Execution(err)) => {
                warn!(command = input, error = %err, "command failed");
                self.caps.print_line(&self.caps.colorize(
                    &format!("Error executing command: {err}"),
                    ColorTag::Red,
                ))
            }
        }
    }

    fn print_help(&self) -> Result<(), ExecutionError> {
        self.caps
            .print_line(&self.caps.colorize("Available commands:", ColorTag::Cyan))?;
        for name in self.registry.names() {
            self.caps.print_line(&format!(" - {name}"))?;
        }
        self.caps.print_line(&format!(" - {EXIT_COMMAND}"))
    }

    fn completion_candidates(&self) -> Vec<&'a str> {
        let registry: &'a Registry = self.registry;
        registry
            .names()
            .chain([HELP_COMMAND, EXIT_COMMAND])
            .collect()
    }
}
