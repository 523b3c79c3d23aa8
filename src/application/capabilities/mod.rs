//! 명령 동작에 노출되는 호스트 기능 표면.
//! 세션마다 한 번 생성되어 디스패치 루프가 참조로 전달한다.

mod progress;
mod spinner;

use std::sync::Arc;
use std::time::Duration;

use crate::application::error::ExecutionError;
use crate::application::ports::Terminal;
use crate::domain::style::{ColorTag, paint};
use crate::domain::table::TableLayout;

pub use progress::ProgressReport;
pub use spinner::{Spinner, SpinnerState};

const YES_ANSWERS: [&str; 2] = ["y", "yes"];
const NO_ANSWERS: [&str; 2] = ["n", "no"];

/// 색상 출력, 프롬프트, 표, 화면 지우기, 스피너, 진행 막대를 묶은 기능 집합.
/// 가변 상태는 활성 스피너 하나뿐이다.
pub struct Capabilities {
    terminal: Arc<dyn Terminal>,
    styled: bool,
    spinner: Spinner,
}

impl Capabilities {
    pub fn new(terminal: Arc<dyn Terminal>) -> Self {
        let styled = terminal.is_styled();
        Self {
            spinner: Spinner::new(Arc::clone(&terminal), styled),
            terminal,
            styled,
        }
    }

    pub fn terminal(&self) -> &dyn Terminal {
        self.terminal.as_ref()
    }

    /// 텍스트에 색을 입힌다. 스타일 불가 터미널에서는 원문을 그대로 돌려준다.
    pub fn colorize(&self, text: &str, tag: ColorTag) -> String {
        paint(text, tag, self.styled)
    }

    pub fn print_line(&self, text: &str) -> Result<(), ExecutionError> {
        self.terminal.write_line(text)?;
        Ok(())
    }

    /// 스타일 프롬프트를 쓰고 한 줄을 그대로 돌려준다(트림하지 않음).
    pub fn prompt(&self, label: &str, tag: ColorTag) -> Result<String, ExecutionError> {
        let text = if label.is_empty() {
            "> ".to_string()
        } else {
            format!("{label} > ")
        };
        self.terminal.write(&self.colorize(&text, tag))?;
        self.terminal.read_line()?.ok_or(ExecutionError::InputClosed)
    }

    /// y/yes 또는 n/no가 들어올 때까지 다시 묻는다. 재시도 제한은 없다.
    pub fn confirm(&self, label: &str) -> Result<bool, ExecutionError> {
        let question = format!("{label} (y/n)");
        loop {
            let answer = self.prompt(&question, ColorTag::Magenta)?;
            let answer = answer.trim().to_lowercase();
            if YES_ANSWERS.contains(&answer.as_str()) {
                return Ok(true);
            }
            if NO_ANSWERS.contains(&answer.as_str()) {
                return Ok(false);
            }
            self.print_line(&self.colorize("Enter y or n!", ColorTag::Red))?;
        }
    }

    /// 헤더, 구분선, 데이터 행 순으로 표를 출력한다.
    /// 헤더보다 셀이 적은 행이 있으면 아무것도 쓰지 않고 실패한다.
    pub fn render_table<H, C>(&self, headers: &[H], rows: &[Vec<C>]) -> Result<(), ExecutionError>
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let layout = TableLayout::measure(headers, rows)?;
        let header = layout.format_row(headers);

        self.print_line(&self.colorize(&header, ColorTag::Cyan))?;
        self.print_line(&self.colorize(&TableLayout::rule_for(&header), ColorTag::Gray))?;
        for row in rows {
            self.print_line(&layout.format_row(row))?;
        }
        Ok(())
    }

    pub fn clear_screen(&self) -> Result<(), ExecutionError> {
        self.terminal.clear_screen()?;
        Ok(())
    }

    /// 이 표면에 묶인 단일 스피너.
    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// 진행 막대를 끝까지 그린 뒤 반환한다.
    pub async fn progress(
        &self,
        total_steps: usize,
        per_step_delay: Duration,
        tag: ColorTag,
    ) -> Result<ProgressReport, ExecutionError> {
        progress::run(
            self.terminal.as_ref(),
            self.styled,
            total_steps,
            per_step_delay,
            tag,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::adapters::ScriptedTerminal;

    fn caps_with(lines: &[&str]) -> (Arc<ScriptedTerminal>, Capabilities) {
        let terminal = Arc::new(ScriptedTerminal::new(lines.iter().copied()));
        let caps = Capabilities::new(terminal.clone());
        (terminal, caps)
    }

    #[test]
    fn prompt_returns_answer_verbatim() {
        let (terminal, caps) = caps_with(&["  Ada  "]);
        let answer = caps.prompt("Name", ColorTag::Magenta).unwrap();
        assert_eq!(answer, "  Ada  ");
        assert_eq!(terminal.output(), "Name > ");
    }

    #[test]
    fn prompt_fails_when_input_is_closed() {
        let (_terminal, caps) = caps_with(&[]);
        let err = caps.prompt("Name", ColorTag::Magenta).unwrap_err();
        assert!(matches!(err, ExecutionError::InputClosed));
    }

    #[test]
    fn confirm_reprompts_until_valid() {
        let (terminal, caps) = caps_with(&["maybe", "", "YES"]);
        assert!(caps.confirm("Deploy").unwrap());

        let output = terminal.output();
        assert_eq!(output.matches("Deploy (y/n) > ").count(), 3);
        assert_eq!(output.matches("Enter y or n!").count(), 2);
    }

    #[test]
    fn confirm_accepts_no() {
        let (_terminal, caps) = caps_with(&["N"]);
        assert!(!caps.confirm("Delete").unwrap());
    }

    #[test]
    fn table_renders_header_rule_and_rows() {
        let (terminal, caps) = caps_with(&[]);
        caps.render_table(&["a", "bb"], &[vec!["1", "22"]]).unwrap();
        assert_eq!(terminal.output(), "a | bb\n------\n1 | 22\n");
    }

    #[test]
    fn ragged_table_writes_nothing() {
        let (terminal, caps) = caps_with(&[]);
        let err = caps
            .render_table(&["a", "b"], &[vec!["only-one"]])
            .unwrap_err();
        assert!(matches!(err, ExecutionError::RaggedRow(_)));
        assert_eq!(terminal.output(), "");
    }

    #[test]
    fn clear_screen_reaches_terminal() {
        let (terminal, caps) = caps_with(&[]);
        caps.clear_screen().unwrap();
        assert_eq!(terminal.clear_count(), 1);
    }

    #[test]
    fn colorize_is_plain_on_unstyled_terminal() {
        let (_terminal, caps) = caps_with(&[]);
        assert_eq!(caps.colorize("x", ColorTag::Red), "x");
    }
}
