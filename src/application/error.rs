//! 명령 실행/디스패치 오류 분류.

use std::io;

use crate::domain::table::RaggedRow;

/// 명령 동작 실행 중 발생하는 오류.
/// 디스패치 루프 경계에서 잡혀 사용자에게 문자열로 보고된다.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error(transparent)]
    RaggedRow(#[from] RaggedRow),

    #[error("input closed while waiting for an answer")]
    InputClosed,

    #[error(transparent)]
    Terminal(#[from] io::Error),

    #[error("{0}")]
    Failed(String),
}

impl ExecutionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// 이름 하나를 디스패치한 결과 오류.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}
