//! # 그래머 셀 쌍 연산
//!
//! 팩터화 쌍선형 프리미티브와 레벨 라우팅을 묶는다.

pub mod bilinear;
pub mod level;
pub mod pairwise;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

pub use bilinear::{fac_infer, fac_predict, Readout};
pub use level::{Direction, Level, LevelBinding, LEVEL_TABLE};
pub use pairwise::LevelOperator;
