//! 설정 스키마와 병합/검증 규칙.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::style::ColorTag;
use crate::infrastructure::script::{Step, parse_command_source};

pub const DEFAULT_BANNER_COLOR: ColorTag = ColorTag::Cyan;

/// `cli.json` 파일 하나의 원본 형태.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// 셸 표시 이름
    pub name: Option<String>,
    /// 시작 시 배너 출력 여부
    pub banner: Option<bool>,
    /// 배너 색상 이름
    pub banner_color: Option<String>,
    /// 명령 이름 → 동작 원본. 파일에 적힌 순서를 유지한다.
    pub commands: Option<Map<String, Value>>,
}

impl ConfigFile {
    /// 높은 우선순위 파일의 값을 덮어쓴다.
    /// 명령은 이름 단위로 교체되며 처음 등장한 위치를 유지한다.
    pub fn merge_from(&mut self, other: ConfigFile) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.banner.is_some() {
            self.banner = other.banner;
        }
        if other.banner_color.is_some() {
            self.banner_color = other.banner_color;
        }
        if let Some(commands) = other.commands {
            let merged = self.commands.get_or_insert_with(Map::new);
            for (name, source) in commands {
                merged.insert(name, source);
            }
        }
    }
}

/// 검증을 마친 실행용 설정.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub name: String,
    pub banner: bool,
    pub banner_color: ColorTag,
    /// 등록 순서대로의 (명령 이름, 스텝 목록)
    pub commands: Vec<(String, Vec<Step>)>,
}

impl ShellConfig {
    /// JSON 문자열 하나를 파싱하고 검증한다.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw).context("failed to parse config JSON")?;
        Self::try_from(file)
    }
}

impl TryFrom<ConfigFile> for ShellConfig {
    type Error = anyhow::Error;

    fn try_from(file: ConfigFile) -> Result<Self> {
        let Some(name) = file.name else {
            bail!("config is missing required field `name`");
        };

        let Some(sources) = file.commands else {
            bail!("config is missing required field `commands`");
        };

        let mut commands = Vec::with_capacity(sources.len());
        for (command, source) in sources {
            let steps = parse_command_source(source)
                .with_context(|| format!("invalid behavior for command `{command}`"))?;
            commands.push((command, steps));
        }

        Ok(Self {
            name,
            banner: file.banner.unwrap_or(false),
            banner_color: ColorTag::from_name_or(file.banner_color.as_deref(), DEFAULT_BANNER_COLOR),
            commands,
        })
    }
}
