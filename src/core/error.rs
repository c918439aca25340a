//! # 그래머 셀 에러 타입
//!
//! 레벨 오류, 설정 오류, 형상 불일치, 백엔드 오류를 하나의 열거형으로 모은다.
//! 어떤 에러도 내부에서 재시도되지 않고 호출자에게 그대로 전달된다.

use thiserror::Error;

/// 그래머 셀 연산 결과 타입
pub type GrammarResult<T> = Result<T, GrammarError>;

/// 그래머 셀 모델에서 발생 가능한 에러
#[derive(Debug, Error)]
pub enum GrammarError {
    /// {1, 2, 3} 밖의 레벨 지정
    #[error("'{0}' is not a valid level")]
    InvalidLevel(u8),

    /// 생성 시점 설정 값 오류
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// 잘못된 값에 대한 설명
        message: String,
    },

    /// 입력 배치 폭이 seq_len * dimx 와 다름
    #[error("Shape mismatch: expected {expected}, actual {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
    },

    /// 행이 하나도 없는 입력 배치
    #[error("Empty batch: input has no rows")]
    EmptyBatch,

    /// 정의되지 않은 피라미드 슬롯 읽기
    #[error("Undefined slot: {stream}[{step}]")]
    UndefinedSlot {
        stream: &'static str,
        step: usize,
    },

    /// 이미 채워진 피라미드 슬롯에 다시 쓰기
    #[error("Slot already defined: {stream}[{step}]")]
    SlotOverwrite {
        stream: &'static str,
        step: usize,
    },

    /// 알 수 없는 파라미터 이름
    #[error("Unknown parameter role: {0}")]
    UnknownRole(String),

    /// 수치 백엔드(candle) 에러
    #[error("Backend error: {0}")]
    Backend(#[from] candle_core::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrammarError {
    /// InvalidConfig 에러 생성
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// ShapeMismatch 에러 생성
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}
