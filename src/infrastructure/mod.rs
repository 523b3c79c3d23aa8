//! Infrastructure layer
//! 터미널/파일시스템과 직접 통신하는 구현체와 설정 스텝 해석기 집합.

pub mod adapters;
pub mod config;
pub mod render;
pub mod script;
