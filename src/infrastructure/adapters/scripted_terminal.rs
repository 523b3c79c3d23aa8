//! 미리 정한 입력 줄을 공급하고 출력을 메모리에 모으는 터미널 어댑터.
//! 테스트나 비대화형 임베딩에서 세션 전체를 구동할 때 쓴다.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::application::ports::Terminal;

/// 스타일 없이 출력을 기록하는 메모리 터미널.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: Mutex<VecDeque<String>>,
    output: Mutex<String>,
    clears: AtomicUsize,
}

impl ScriptedTerminal {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            output: Mutex::default(),
            clears: AtomicUsize::new(0),
        }
    }

    /// 지금까지 기록된 출력 전체.
    pub fn output(&self) -> String {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl Terminal for ScriptedTerminal {
    fn write(&self, text: &str) -> io::Result<()> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
        Ok(())
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front())
    }

    fn clear_screen(&self) -> io::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_styled(&self) -> bool {
        false
    }
}
