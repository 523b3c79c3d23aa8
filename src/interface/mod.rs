//! Interface layer
//! 프로세스 진입(CLI 파싱, 조립, 대화형 세션)을 담당한다.

pub mod cli;
