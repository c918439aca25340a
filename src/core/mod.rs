//! # 그래머 셀 핵심 모듈
//!
//! 파라미터 저장소, 팩터화 쌍선형 셀, 미분 피라미드, 비용/그래디언트 조립

pub mod error;
pub mod config;
pub mod params;
pub mod cells;
pub mod pyramid;
pub mod corruption;
pub mod objective;
pub mod model;

// 주요 타입들 재수출
pub use error::{GrammarError, GrammarResult};
pub use config::*;
pub use params::*;
pub use cells::*;
pub use pyramid::*;
pub use corruption::*;
pub use objective::*;
pub use model::*;
