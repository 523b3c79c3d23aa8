//! CLI 인터페이스 모듈 묶음.
//! 인자 파싱/조립/대화형 세션을 한 네임스페이스로 관리한다.

pub mod command;
pub mod composition;
pub mod repl;

pub use command::Cli;
pub use composition::AppComposition;
pub use repl::{run_repl, run_shell};
