//! 백그라운드 스피너 애니메이션.
//!
//! `start`는 tokio 태스크를 띄우고 즉시 반환한다. 태스크와 호출 측은
//! `AtomicBool` 실행 플래그 하나만 공유한다. `stop`은 플래그를 내린 뒤
//! 유예 시간만큼 기다리고 태스크를 join한 다음 완료 줄을 쓴다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::error::ExecutionError;
use crate::application::ports::Terminal;
use crate::domain::style::{ColorTag, paint};

const GLYPHS: [&str; 4] = ["|", "/", "-", "\\"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);
// 마지막 프레임 쓰기가 끝나기를 기다리는 시간. 완료 줄이 덮이지 않게 한다.
const STOP_GRACE: Duration = Duration::from_millis(200);
const DONE_GLYPH: &str = "✔";
// 더 긴 스피너 메시지의 잔상을 덮기 위한 여백.
const LINE_PADDING: &str = "          ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerState {
    Idle,
    Running,
}

struct SpinnerTask {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// 기능 표면당 하나만 존재하는 스피너.
pub struct Spinner {
    terminal: Arc<dyn Terminal>,
    styled: bool,
    active: Mutex<Option<SpinnerTask>>,
}

impl Spinner {
    pub(super) fn new(terminal: Arc<dyn Terminal>, styled: bool) -> Self {
        Self {
            terminal,
            styled,
            active: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SpinnerState {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match active.as_ref() {
            Some(task) if task.running.load(Ordering::Acquire) => SpinnerState::Running,
            _ => SpinnerState::Idle,
        }
    }

    /// 애니메이션을 시작하고 바로 반환한다. tokio 런타임 안에서 호출해야 한다.
    /// 이미 실행 중이면 이전 애니메이션을 중단하고 새 것으로 교체한다.
    pub fn start(&self, message: &str, color: ColorTag) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = active.take() {
            warn!("spinner started while running; replacing previous animation");
            previous.running.store(false, Ordering::Release);
            previous.handle.abort();
        }

        let running = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(animate(
            Arc::clone(&self.terminal),
            Arc::clone(&running),
            message.to_string(),
            color,
            self.styled,
        ));
        debug!(label = message, "spinner started");
        *active = Some(SpinnerTask { running, handle });
    }

    /// 애니메이션을 멈추고 완료 줄을 쓴다. Idle 상태에서도 완료 줄은 출력한다.
    pub async fn stop(&self, final_message: &str) -> Result<(), ExecutionError> {
        if let Some(task) = self.take_task() {
            task.running.store(false, Ordering::Release);
            tokio::time::sleep(STOP_GRACE).await;
            join(task.handle).await;
            debug!("spinner stopped");
        }

        let done = paint(DONE_GLYPH, ColorTag::Green, self.styled);
        self.terminal
            .write(&format!("\r{done} {final_message}{LINE_PADDING}\n"))?;
        Ok(())
    }

    /// 명령이 끝났는데 남아 있는 애니메이션을 완료 줄 없이 정리한다.
    /// 실제로 정리한 경우 `true`.
    pub async fn halt(&self) -> Result<bool, ExecutionError> {
        let Some(task) = self.take_task() else {
            return Ok(false);
        };

        task.running.store(false, Ordering::Release);
        task.handle.abort();
        join(task.handle).await;
        self.terminal.write("\n")?;
        Ok(true)
    }

    fn take_task(&self) -> Option<SpinnerTask> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

async fn join(handle: JoinHandle<()>) {
    if let Err(err) = handle.await
        && !err.is_cancelled()
    {
        warn!(error = %err, "spinner task failed");
    }
}

async fn animate(
    terminal: Arc<dyn Terminal>,
    running: Arc<AtomicBool>,
    message: String,
    color: ColorTag,
    styled: bool,
) {
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);

    for glyph in GLYPHS.iter().cycle() {
        ticker.tick().await;
        if !running.load(Ordering::Acquire) {
            break;
        }
        let frame = format!("\r{} {message}", paint(glyph, color, styled));
        if terminal.write(&frame).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::SpinnerState;
    use crate::application::capabilities::Capabilities;
    use crate::domain::style::ColorTag;
    use crate::infrastructure::adapters::ScriptedTerminal;

    fn surface() -> (Arc<ScriptedTerminal>, Capabilities) {
        let terminal = Arc::new(ScriptedTerminal::new(Vec::<String>::new()));
        let caps = Capabilities::new(terminal.clone());
        (terminal, caps)
    }

    #[tokio::test(start_paused = true)]
    async fn start_then_stop_ends_idle_with_completion_line() {
        let (terminal, caps) = surface();
        let spinner = caps.spinner();

        spinner.start("Loading...", ColorTag::Yellow);
        assert_eq!(spinner.state(), SpinnerState::Running);
        spinner.stop("Done!").await.unwrap();
        assert_eq!(spinner.state(), SpinnerState::Idle);

        let output = terminal.output();
        let last_line = output.trim_end().rsplit('\r').next().unwrap();
        assert!(last_line.starts_with("✔ Done!"));
    }

    #[tokio::test(start_paused = true)]
    async fn frames_cycle_through_glyphs_on_one_line() {
        let (terminal, caps) = surface();

        caps.spinner().start("Working", ColorTag::Cyan);
        tokio::time::sleep(Duration::from_millis(350)).await;
        caps.spinner().stop("ok").await.unwrap();

        let output = terminal.output();
        assert!(output.starts_with("\r| Working\r/ Working\r- Working"));
        assert_eq!(output.matches('\n').count(), 1);
    }

    #[tokio::test]
    async fn stop_while_idle_still_prints_completion() {
        let (terminal, caps) = surface();
        caps.spinner().stop("nothing to do").await.unwrap();
        assert_eq!(caps.spinner().state(), SpinnerState::Idle);
        assert!(terminal.output().contains("✔ nothing to do"));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_animation() {
        let (terminal, caps) = surface();
        let spinner = caps.spinner();

        spinner.start("first", ColorTag::Yellow);
        tokio::time::sleep(Duration::from_millis(50)).await;
        spinner.start("second", ColorTag::Yellow);
        tokio::time::sleep(Duration::from_millis(250)).await;
        spinner.stop("done").await.unwrap();

        let output = terminal.output();
        let after_restart = output.split("second").nth(1).unwrap_or_default();
        assert!(!after_restart.contains("first"));
    }

    #[tokio::test]
    async fn halt_clears_without_completion_line() {
        let (terminal, caps) = surface();
        assert!(!caps.spinner().halt().await.unwrap());

        caps.spinner().start("busy", ColorTag::Yellow);
        assert!(caps.spinner().halt().await.unwrap());
        assert_eq!(caps.spinner().state(), SpinnerState::Idle);
        assert!(!terminal.output().contains('✔'));
    }
}
