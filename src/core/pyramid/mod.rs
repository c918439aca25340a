//! # 미분 피라미드
//!
//! 관측 -> 속도 -> 가속도 -> 저크 피라미드를 부트스트랩하고 자기회귀로 확장한다.

pub mod builder;
pub mod plan;
pub mod track;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

pub use builder::PyramidBuilder;
pub use plan::{PlanStep, RolloutPlan, Slot, Stream};
pub use track::{DerivativeTrack, PyramidState};
