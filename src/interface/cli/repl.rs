//! `spectra` 대화형 쉘(REPL) 인터페이스.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::capabilities::Capabilities;
use crate::application::ports::Terminal;
use crate::application::registry::Registry;
use crate::application::usecases::dispatch::{DispatchLoopUseCase, SessionOutcome};
use crate::domain::style::ColorTag;
use crate::infrastructure::config::ShellConfig;
use crate::infrastructure::render::{render_banner, render_loaded_line};
use crate::infrastructure::script::build_registry;
use crate::interface::cli::composition::AppComposition;

/// 설정을 읽어 명령 레지스트리를 만들고 세션을 실행한다.
pub async fn run_repl(composition: &AppComposition) -> Result<SessionOutcome> {
    let config = composition.load_config()?;
    let registry = build_registry(&config);
    run_shell(&config, &registry, composition.terminal()).await
}

/// 배너와 로딩 문구를 출력한 뒤 디스패치 루프를 돈다.
pub async fn run_shell(
    config: &ShellConfig,
    registry: &Registry,
    terminal: Arc<dyn Terminal>,
) -> Result<SessionOutcome> {
    let caps = Capabilities::new(terminal);
    print_welcome(config, &caps).context("failed to write welcome banner")?;

    let usecase = DispatchLoopUseCase {
        registry,
        caps: &caps,
    };
    let outcome = usecase.execute().await.context("terminal failed during session")?;
    Ok(outcome)
}

fn print_welcome(config: &ShellConfig, caps: &Capabilities) -> Result<()> {
    if config.banner {
        for line in render_banner(&config.name) {
            caps.print_line(&caps.colorize(&line, config.banner_color))?;
        }
    }

    caps.print_line(&caps.colorize(&render_loaded_line(&config.name), ColorTag::Yellow))?;
    caps.print_line("")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::adapters::ScriptedTerminal;

    #[tokio::test]
    async fn welcome_shows_banner_only_when_enabled() {
        let config =
            ShellConfig::from_json(r#"{"name":"Ops","banner":true,"commands":{}}"#).unwrap();
        let terminal = Arc::new(ScriptedTerminal::new(["exit"]));
        run_shell(&config, &Registry::builder().build(), terminal.clone())
            .await
            .unwrap();
        assert!(
            terminal
                .output()
                .starts_with("+-----+\n| Ops |\n+-----+\nSpectraCLI Loaded: Ops\n\n")
        );

        let config = ShellConfig::from_json(r#"{"name":"Ops","commands":{}}"#).unwrap();
        let terminal = Arc::new(ScriptedTerminal::new(["exit"]));
        run_shell(&config, &Registry::builder().build(), terminal.clone())
            .await
            .unwrap();
        assert!(terminal.output().starts_with("SpectraCLI Loaded: Ops\n\n> "));
    }
}
