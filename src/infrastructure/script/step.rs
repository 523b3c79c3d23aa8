//! 설정 명령 값(JSON)을 타입이 있는 스텝 목록으로 해석한다.

use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_SPINNER_COLOR: &str = "yellow";
pub const DEFAULT_SPINNER_DONE: &str = "Done!";
pub const DEFAULT_PROGRESS_TOTAL: usize = 20;
pub const DEFAULT_PROGRESS_DELAY_MS: u64 = 50;
pub const DEFAULT_PROGRESS_COLOR: &str = "cyan";
pub const DEFAULT_ASK_COLOR: &str = "magenta";

/// 명령 동작을 이루는 단일 스텝.
/// JSON에서는 `{"print": {"text": "hi"}}`처럼 키 하나로 종류를 지정한다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    Print {
        text: String,
        color: Option<String>,
    },
    SpinnerStart {
        message: String,
        color: Option<String>,
    },
    SpinnerStop {
        message: Option<String>,
    },
    Progress {
        #[serde(default = "default_progress_total")]
        total: usize,
        #[serde(default = "default_progress_delay_ms")]
        delay_ms: u64,
        color: Option<String>,
    },
    Ask {
        label: String,
        color: Option<String>,
        into: String,
    },
    Confirm {
        label: String,
        #[serde(default)]
        yes: Vec<Step>,
        #[serde(default)]
        no: Vec<Step>,
    },
    Table {
        headers: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },
    Clear,
    Sleep {
        ms: u64,
    },
}

fn default_progress_total() -> usize {
    DEFAULT_PROGRESS_TOTAL
}

fn default_progress_delay_ms() -> u64 {
    DEFAULT_PROGRESS_DELAY_MS
}

/// 명령 값 하나를 스텝 목록으로 바꾼다.
/// - 문자열: `print` 스텝 하나
/// - 객체: 스텝 하나
/// - 배열: 스텝 목록
pub fn parse_command_source(value: Value) -> serde_json::Result<Vec<Step>> {
    match value {
        Value::String(text) => Ok(vec![Step::Print { text, color: None }]),
        Value::Array(_) => serde_json::from_value(value),
        other => serde_json::from_value(other).map(|step| vec![step]),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_is_print_shorthand() {
        let steps = parse_command_source(json!("hi")).unwrap();
        assert_eq!(
            steps,
            vec![Step::Print {
                text: "hi".into(),
                color: None
            }]
        );
    }

    #[test]
    fn parses_step_lists_with_defaults() {
        let steps = parse_command_source(json!([
            {"spinner_start": {"message": "Loading..."}},
            {"progress": {}},
            "clear",
            {"spinner_stop": {}},
            {"sleep": {"ms": 5}}
        ]))
        .unwrap();

        assert_eq!(steps.len(), 5);
        assert_eq!(
            steps[1],
            Step::Progress {
                total: DEFAULT_PROGRESS_TOTAL,
                delay_ms: DEFAULT_PROGRESS_DELAY_MS,
                color: None
            }
        );
        assert_eq!(steps[2], Step::Clear);
        assert_eq!(steps[3], Step::SpinnerStop { message: None });
    }

    #[test]
    fn single_object_is_one_step() {
        let steps =
            parse_command_source(json!({"table": {"headers": ["a"], "rows": [["1"]]}})).unwrap();
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn confirm_branches_nest() {
        let steps = parse_command_source(json!([{
            "confirm": {
                "label": "Sure?",
                "yes": [{"print": {"text": "ok"}}],
                "no": ["clear"]
            }
        }]))
        .unwrap();

        let Step::Confirm { yes, no, .. } = &steps[0] else {
            panic!("expected confirm step");
        };
        assert_eq!(yes.len(), 1);
        assert_eq!(no, &vec![Step::Clear]);
    }

    #[test]
    fn rejects_unknown_steps_and_fields() {
        assert!(parse_command_source(json!([{"exec": {"code": "rm -rf /"}}])).is_err());
        assert!(parse_command_source(json!({"print": {"text": "x", "colour": "red"}})).is_err());
        assert!(parse_command_source(json!(42)).is_err());
    }
}
