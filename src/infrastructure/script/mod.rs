//! 설정에 선언된 스텝 목록을 명령 동작으로 실행하는 해석기.
//! 임의 코드 평가 없이 정해진 스텝 종류만 기능 표면으로 연결한다.

mod step;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::capabilities::Capabilities;
use crate::application::error::ExecutionError;
use crate::application::ports::CommandBehavior;
use crate::application::registry::Registry;
use crate::domain::style::ColorTag;
use crate::infrastructure::config::ShellConfig;

pub use step::{
    DEFAULT_ASK_COLOR, DEFAULT_PROGRESS_COLOR, DEFAULT_SPINNER_COLOR, DEFAULT_SPINNER_DONE, Step,
    parse_command_source,
};

/// 스텝 목록 하나로 이루어진 명령 동작.
#[derive(Debug, Clone)]
pub struct ScriptBehavior {
    steps: Vec<Step>,
}

impl ScriptBehavior {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

#[async_trait]
impl CommandBehavior for ScriptBehavior {
    async fn run(&self, caps: &Capabilities) -> Result<(), ExecutionError> {
        let mut vars = Variables::default();
        // confirm 분기는 재귀 대신 작업 스택으로 펼친다.
        let mut pending: Vec<&Step> = self.steps.iter().rev().collect();

        while let Some(step) = pending.pop() {
            match step {
                Step::Confirm { label, yes, no } => {
                    let branch = if caps.confirm(&vars.render(label))? {
                        yes
                    } else {
                        no
                    };
                    pending.extend(branch.iter().rev());
                }
                other => run_step(other, caps, &mut vars).await?,
            }
        }
        Ok(())
    }
}

async fn run_step(
    step: &Step,
    caps: &Capabilities,
    vars: &mut Variables,
) -> Result<(), ExecutionError> {
    match step {
        Step::Print { text, color } => {
            let text = vars.render(text);
            let line = match color {
                Some(color) => caps.colorize(&text, ColorTag::from_name(color)),
                None => text,
            };
            caps.print_line(&line)
        }
        Step::SpinnerStart { message, color } => {
            let color = color.as_deref().unwrap_or(DEFAULT_SPINNER_COLOR);
            caps.spinner()
                .start(&vars.render(message), ColorTag::from_name(color));
            Ok(())
        }
        Step::SpinnerStop { message } => {
            let message = message.as_deref().unwrap_or(DEFAULT_SPINNER_DONE);
            caps.spinner().stop(&vars.render(message)).await
        }
        Step::Progress {
            total,
            delay_ms,
            color,
        } => {
            let color = color.as_deref().unwrap_or(DEFAULT_PROGRESS_COLOR);
            caps.progress(
                *total,
                Duration::from_millis(*delay_ms),
                ColorTag::from_name(color),
            )
            .await
            .map(|_| ())
        }
        Step::Ask { label, color, into } => {
            let color = color.as_deref().unwrap_or(DEFAULT_ASK_COLOR);
            let answer = caps.prompt(&vars.render(label), ColorTag::from_name(color))?;
            debug!(variable = %into, "stored answer");
            vars.set(into, answer);
            Ok(())
        }
        Step::Table { headers, rows } => {
            let rows: Vec<Vec<String>> = rows
                .iter()
                .map(|row| row.iter().map(|cell| vars.render(cell)).collect())
                .collect();
            caps.render_table(headers.as_slice(), rows.as_slice())
        }
        Step::Clear => caps.clear_screen(),
        Step::Sleep { ms } => {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
            Ok(())
        }
        Step::Confirm { .. } => Err(ExecutionError::failed(
            "confirm step must be expanded by the script runner",
        )),
    }
}

/// `ask`로 받은 값을 명령 실행 한 번 동안 보관한다.
#[derive(Debug, Default)]
struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    fn set(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    /// `{name}` 자리표시자를 값으로 바꾼다. 모르는 이름은 그대로 둔다.
    fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            match after_open.find('}') {
                Some(close) => {
                    let key = &after_open[..close];
                    match self.values.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// 설정 명령을 등록 순서대로 레지스트리에 싣는다.
pub fn build_registry(config: &ShellConfig) -> Registry {
    let mut builder = Registry::builder();
    for (name, steps) in &config.commands {
        builder.insert(name.clone(), Box::new(ScriptBehavior::new(steps.clone())));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::application::capabilities::SpinnerState;
    use crate::infrastructure::adapters::ScriptedTerminal;

    async fn run_script(
        value: serde_json::Value,
        input: &[&str],
    ) -> (Result<(), ExecutionError>, Arc<ScriptedTerminal>) {
        let behavior = ScriptBehavior::new(parse_command_source(value).unwrap());
        let terminal = Arc::new(ScriptedTerminal::new(input.iter().copied()));
        let caps = Capabilities::new(terminal.clone());
        let result = behavior.run(&caps).await;
        assert_eq!(caps.spinner().state(), SpinnerState::Idle);
        (result, terminal)
    }

    #[test]
    fn render_substitutes_known_placeholders() {
        let mut vars = Variables::default();
        vars.set("name", "Ada".into());
        assert_eq!(vars.render("Hello {name}!"), "Hello Ada!");
        assert_eq!(vars.render("{missing} {name}"), "{missing} Ada");
        assert_eq!(vars.render("open { brace"), "open { brace");
        assert_eq!(vars.render("{}"), "{}");
    }

    #[tokio::test]
    async fn ask_then_print_uses_the_answer() {
        let (result, terminal) = run_script(
            json!([
                {"ask": {"label": "Name", "into": "name"}},
                {"print": {"text": "Hello {name}", "color": "green"}}
            ]),
            &["Ada"],
        )
        .await;

        result.unwrap();
        assert_eq!(terminal.output(), "Name > Hello Ada\n");
    }

    #[tokio::test]
    async fn confirm_runs_the_matching_branch() {
        let script = json!([
            {"confirm": {
                "label": "Continue",
                "yes": [{"print": {"text": "going"}}],
                "no": [{"print": {"text": "stopped"}}]
            }},
            {"print": {"text": "after"}}
        ]);

        let (result, terminal) = run_script(script.clone(), &["what", "n"]).await;
        result.unwrap();
        let output = terminal.output();
        assert!(output.contains("Enter y or n!"));
        assert!(output.contains("stopped\nafter\n"));
        assert!(!output.contains("going"));

        let (result, terminal) = run_script(script, &["y"]).await;
        result.unwrap();
        assert!(terminal.output().contains("going\nafter\n"));
    }

    #[tokio::test]
    async fn spinner_and_progress_steps_render() {
        let (result, terminal) = run_script(
            json!([
                {"spinner_start": {"message": "Fetching"}},
                {"sleep": {"ms": 120}},
                {"spinner_stop": {"message": "Fetched"}},
                {"progress": {"total": 2, "delay_ms": 1}}
            ]),
            &[],
        )
        .await;

        result.unwrap();
        let output = terminal.output();
        assert!(output.contains("| Fetching"));
        assert!(output.contains("✔ Fetched"));
        assert!(output.ends_with("100%\n"));
    }

    #[tokio::test]
    async fn ragged_table_fails_the_command() {
        let (result, _) = run_script(
            json!({"table": {"headers": ["a", "b"], "rows": [["1"]]}}),
            &[],
        )
        .await;
        assert!(matches!(result, Err(ExecutionError::RaggedRow(_))));
    }

    #[tokio::test]
    async fn ask_without_input_fails() {
        let (result, _) = run_script(json!({"ask": {"label": "Name", "into": "n"}}), &[]).await;
        assert!(matches!(result, Err(ExecutionError::InputClosed)));
    }

    #[tokio::test]
    async fn clear_step_clears_screen() {
        let (result, terminal) = run_script(json!(["clear"]), &[]).await;
        result.unwrap();
        assert_eq!(terminal.clear_count(), 1);
    }
}
