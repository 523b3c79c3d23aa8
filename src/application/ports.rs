//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::io;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::capabilities::Capabilities;
use crate::application::error::ExecutionError;
use crate::domain::style::{ColorTag, paint};
use crate::infrastructure::config::ShellConfig;

/// 설정 로딩을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<ShellConfig>;
}

/// 모든 출력/입력이 지나가는 터미널 포트.
/// 스피너 애니메이션이 별도 태스크에서 쓰므로 `Send + Sync`여야 한다.
pub trait Terminal: Send + Sync {
    /// 줄바꿈 없이 그대로 쓰고 즉시 flush한다.
    fn write(&self, text: &str) -> io::Result<()>;

    /// 한 줄을 읽는다. 줄 끝 개행만 제거하며 입력 종료 시 `None`.
    fn read_line(&self) -> io::Result<Option<String>>;

    fn clear_screen(&self) -> io::Result<()>;

    /// ANSI 스타일을 출력해도 되는 터미널인지 여부.
    fn is_styled(&self) -> bool;

    fn write_line(&self, text: &str) -> io::Result<()> {
        self.write(&format!("{text}\n"))
    }

    /// 디스패치 루프의 명령 입력.
    /// 기본 구현은 프롬프트를 쓰고 한 줄을 읽는다. 후보 목록은 자동완성용이다.
    fn read_command(
        &self,
        prompt: &str,
        color: ColorTag,
        _candidates: &[&str],
    ) -> io::Result<Option<String>> {
        self.write(&paint(prompt, color, self.is_styled()))?;
        self.read_line()
    }
}

/// 명령 이름에 연결된 실행 단위.
/// 기능 표면을 유일한 입력으로 받고, 실패 시 `ExecutionError`를 돌려준다.
#[async_trait]
pub trait CommandBehavior: Send + Sync {
    async fn run(&self, caps: &Capabilities) -> Result<(), ExecutionError>;
}
