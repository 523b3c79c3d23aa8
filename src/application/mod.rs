//! Application layer
//! 기능 표면, 레지스트리, 디스패치 루프를 정의하고 포트(추상 인터페이스)를 통해 터미널을 사용한다.

pub mod capabilities;
pub mod error;
pub mod ports;
pub mod registry;
pub mod usecases;
