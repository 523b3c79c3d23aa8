//! CLI 명령 파싱 모듈.
//! 사용자 플래그는 없고 `--help`/`--version`만 제공한다.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "spectra", version)]
#[command(about = "Interactive shell whose commands come from cli.json")]
#[command(
    long_about = "Interactive shell whose commands come from cli.json.\n\n\
                  Config search order (later wins): next to the executable, \
                  the user config dir (spectra/cli.json), ./cli.json, $SPECTRA_CONFIG."
)]
pub struct Cli {}

impl Cli {
    /// 인자를 검증한다. 알 수 없는 인자는 clap이 오류로 종료시킨다.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
