//! Domain layer
//! 색상/진행 막대/표 레이아웃 규칙을 터미널 I/O 없이 표현한다.

pub mod progress;
pub mod style;
pub mod table;
