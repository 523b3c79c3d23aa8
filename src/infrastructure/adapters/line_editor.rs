//! 디스패치 프롬프트용 한 줄 입력기.
//! 입력 중인 접두어와 맞는 등록 명령을 회색 잔상(ghost)으로 보여 주고
//! Tab으로 완성한다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::usecases::dispatch::EXIT_COMMAND;
use crate::domain::style::ColorTag;

/// TTY이고 dumb 터미널이 아닐 때만 raw mode 입력기를 쓴다.
pub fn supports_interactive_input() -> bool {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 UI를 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

/// 한 줄을 읽는다. Ctrl-D(빈 입력)는 `None`, Ctrl-C는 `exit`로 처리한다.
pub fn read_line_interactive(
    prompt: &str,
    color: ColorTag,
    candidates: &[&str],
) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    let _guard = InputGuard::enter(&mut stdout)?;
    let prompt_color = to_crossterm(color);

    let mut input = String::new();
    let mut cursor_chars = 0usize;
    let mut selected_idx = 0usize;

    loop {
        let matches = match_candidates(&input, candidates);
        if selected_idx >= matches.len() {
            selected_idx = 0;
        }
        let ghost = matches
            .get(selected_idx)
            .map(|candidate| &candidate[input.len()..]);

        render_line(&mut stdout, prompt, prompt_color, &input, cursor_chars, ghost)?;

        match event::read()? {
            Event::Paste(text) => {
                for ch in text.chars().filter(|ch| !ch.is_control()) {
                    insert_char_at(&mut input, cursor_chars, ch);
                    cursor_chars += 1;
                }
            }
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Enter => {
                        finish_line(&mut stdout, prompt, prompt_color, &input)?;
                        return Ok(Some(input));
                    }
                    KeyCode::Backspace => {
                        if cursor_chars > 0 {
                            remove_char_at(&mut input, cursor_chars - 1);
                            cursor_chars -= 1;
                        }
                    }
                    KeyCode::Delete => {
                        if cursor_chars < input.chars().count() {
                            remove_char_at(&mut input, cursor_chars);
                        }
                    }
                    KeyCode::Left => {
                        cursor_chars = cursor_chars.saturating_sub(1);
                    }
                    KeyCode::Right => {
                        cursor_chars = (cursor_chars + 1).min(input.chars().count());
                    }
                    KeyCode::Home => {
                        cursor_chars = 0;
                    }
                    KeyCode::End => {
                        cursor_chars = input.chars().count();
                    }
                    KeyCode::Up => {
                        if !matches.is_empty() {
                            selected_idx = (selected_idx + matches.len() - 1) % matches.len();
                        }
                    }
                    KeyCode::Down => {
                        if !matches.is_empty() {
                            selected_idx = (selected_idx + 1) % matches.len();
                        }
                    }
                    KeyCode::Tab => {
                        if let Some(candidate) = matches.get(selected_idx) {
                            input = (*candidate).to_string();
                            cursor_chars = input.chars().count();
                        }
                    }
                    KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        if input.is_empty() {
                            finish_line(&mut stdout, prompt, prompt_color, &input)?;
                            return Ok(None);
                        }
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        finish_line(&mut stdout, prompt, prompt_color, &input)?;
                        return Ok(Some(EXIT_COMMAND.to_string()));
                    }
                    KeyCode::Char(ch) => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL)
                            && !key.modifiers.contains(KeyModifiers::ALT)
                        {
                            insert_char_at(&mut input, cursor_chars, ch);
                            cursor_chars += 1;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

/// 입력을 접두어로 갖고 더 긴 후보만 고른다. 빈 입력이면 제안하지 않는다.
fn match_candidates<'c>(input: &str, candidates: &[&'c str]) -> Vec<&'c str> {
    if input.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .copied()
        .filter(|candidate| candidate.len() > input.len() && candidate.starts_with(input))
        .collect()
}

fn to_crossterm(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Red => Color::Red,
        ColorTag::Green => Color::Green,
        ColorTag::Blue => Color::Blue,
        ColorTag::Yellow => Color::Yellow,
        ColorTag::Cyan => Color::Cyan,
        ColorTag::Magenta => Color::Magenta,
        ColorTag::White => Color::White,
        ColorTag::Gray => Color::DarkGrey,
    }
}

fn render_line(
    stdout: &mut io::Stdout,
    prompt: &str,
    prompt_color: Color,
    input: &str,
    cursor_chars: usize,
    ghost: Option<&str>,
) -> Result<()> {
    let (w, _) = terminal::size().unwrap_or((80, 24));
    let width = (w as usize).max(20);
    let prompt_width = display_width(prompt);
    let available = width.saturating_sub(prompt_width + 1);

    let shown = tail_with_ellipsis_display(input, available);
    let overflowed = shown != input;

    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        SetForegroundColor(prompt_color),
        Print(prompt),
        ResetColor,
        Print(&shown)
    )?;

    // 잔상은 입력이 한 줄에 다 들어갈 때만 그린다.
    if let Some(ghost) = ghost
        && !overflowed
        && display_width(input) + display_width(ghost) <= available
    {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print(ghost),
            ResetColor
        )?;
    }

    let before_cursor: String = input.chars().take(cursor_chars).collect();
    let cursor_col = if overflowed {
        prompt_width + display_width(&shown)
    } else {
        prompt_width + display_width(&before_cursor)
    };
    execute!(stdout, cursor::MoveToColumn(cursor_col.min(width - 1) as u16))?;
    stdout.flush()?;
    Ok(())
}

fn finish_line(
    stdout: &mut io::Stdout,
    prompt: &str,
    prompt_color: Color,
    input: &str,
) -> Result<()> {
    // 잔상을 지운 최종 입력을 남기고 다음 줄로 이동한다(raw mode라 \r\n).
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        SetForegroundColor(prompt_color),
        Print(prompt),
        ResetColor,
        Print(input),
        Print("\r\n")
    )?;
    stdout.flush()?;
    Ok(())
}

fn tail_with_ellipsis_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target = max_width - 3;
    let mut tail_rev = String::new();
    let mut used = 0usize;

    for ch in text.chars().rev() {
        let cw = char_display_width(ch);
        if used + cw > target {
            break;
        }
        tail_rev.push(ch);
        used += cw;
    }

    let tail: String = tail_rev.chars().rev().collect();
    format!("...{tail}")
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

struct InputGuard;

impl InputGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}
