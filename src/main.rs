//! `spectra` 바이너리 진입점.

use std::io::{self, IsTerminal};

use spectra::domain::style::{ColorTag, paint};
use spectra::interface::cli::{AppComposition, Cli, run_repl};

#[tokio::main]
async fn main() {
    // 진단 로그는 stderr로 보내 stdout의 \r 덮어쓰기 출력과 섞이지 않게 한다.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    Cli::parse_args();

    let composition = AppComposition::default();
    if let Err(err) = run_repl(&composition).await {
        let styled = io::stderr().is_terminal();
        eprintln!("{}", paint(&format!("Error: {err:#}"), ColorTag::Red, styled));
        std::process::exit(1);
    }
}
