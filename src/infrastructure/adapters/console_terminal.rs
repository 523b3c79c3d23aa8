//! 표준 입출력 기반 터미널 포트 구현 어댑터.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{cursor, execute, terminal};
use tracing::debug;

use crate::application::ports::Terminal;
use crate::domain::style::{ColorTag, paint};
use crate::infrastructure::adapters::line_editor;

/// stdout/stdin에 연결된 콘솔 터미널.
pub struct ConsoleTerminal {
    interactive: bool,
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleTerminal {
    /// stdout이 TTY일 때만 ANSI 스타일을 켠다.
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn write(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        read_line_lossy(&mut io::stdin().lock())
    }

    fn clear_screen(&self) -> io::Result<()> {
        let mut out = io::stdout();
        execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
        out.flush()
    }

    fn is_styled(&self) -> bool {
        self.interactive
    }

    fn read_command(
        &self,
        prompt: &str,
        color: ColorTag,
        candidates: &[&str],
    ) -> io::Result<Option<String>> {
        if !line_editor::supports_interactive_input() {
            self.write(&paint(prompt, color, self.interactive))?;
            return self.read_line();
        }

        match line_editor::read_line_interactive(prompt, color, candidates) {
            Ok(line) => Ok(line),
            Err(err) => {
                // raw mode 진입 실패 등은 일반 라인 입력으로 대체한다.
                debug!(error = %err, "interactive input unavailable; falling back");
                self.write(&paint(prompt, color, self.interactive))?;
                self.read_line()
            }
        }
    }
}

/// 한 줄을 바이트로 읽어 UTF-8이 아닌 부분은 대체 문자로 바꾼다.
/// 잘못된 입력 한 줄이 세션 전체를 끝내지 않게 한다.
fn read_line_lossy<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(trim_newline(String::from_utf8_lossy(&buf).into_owned())))
}

pub(crate) fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{read_line_lossy, trim_newline};

    #[test]
    fn strips_only_line_terminators() {
        assert_eq!(trim_newline("  hi \r\n".to_string()), "  hi ");
        assert_eq!(trim_newline("plain".to_string()), "plain");
        assert_eq!(trim_newline("\n".to_string()), "");
    }

    #[test]
    fn invalid_utf8_lines_are_read_lossily() {
        let mut input = Cursor::new(b"gr\xffeet\r\ngreet\n".to_vec());
        assert_eq!(
            read_line_lossy(&mut input).unwrap().as_deref(),
            Some("gr\u{FFFD}eet")
        );
        assert_eq!(read_line_lossy(&mut input).unwrap().as_deref(), Some("greet"));
        assert_eq!(read_line_lossy(&mut input).unwrap(), None);
    }
}
