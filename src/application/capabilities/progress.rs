//! 동기식(완료까지 대기) 진행 막대.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::application::error::ExecutionError;
use crate::application::ports::Terminal;
use crate::domain::progress::{self, ProgressFrame};
use crate::domain::style::{ColorTag, paint};

/// 진행 막대 한 번의 실행 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    pub frames: usize,
    pub elapsed: Duration,
}

pub(super) async fn run(
    terminal: &dyn Terminal,
    styled: bool,
    total_steps: usize,
    per_step_delay: Duration,
    tag: ColorTag,
) -> Result<ProgressReport, ExecutionError> {
    let started = Instant::now();
    let mut rendered = 0usize;

    for frame in progress::frames(total_steps) {
        if rendered > 0 {
            tokio::time::sleep(per_step_delay).await;
        }
        terminal.write(&render_frame(&frame, styled, tag))?;
        rendered += 1;
    }
    terminal.write("\n")?;

    let report = ProgressReport {
        frames: rendered,
        elapsed: started.elapsed(),
    };
    debug!(frames = report.frames, elapsed_ms = report.elapsed.as_millis() as u64, "progress finished");
    Ok(report)
}

fn render_frame(frame: &ProgressFrame, styled: bool, tag: ColorTag) -> String {
    let bar = paint(&format!("[{}]", frame.bar()), tag, styled);
    format!("\r{bar} {}%", frame.percent())
}
