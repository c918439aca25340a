//! 그래머 셀 (Grammar Cells) 라이브러리
//!
//! 3단 게이티드 오토인코더로 시퀀스를 위치 / 속도 / 가속도 / 저크로 분해하고,
//! 상위 레벨의 매핑 유닛을 조합해 다음 프레임을 예측한다.

pub mod core;

// 핵심 모듈들 재수출
pub use self::core::{
    // 모델 및 설정
    GrammarCellsL3, GrammarCellsConfig, OutputType, CorruptionType, RolloutTrace,
    // 셀 연산
    Level, Direction, LevelOperator,
    // 파라미터 / 그래디언트
    ParamRole, ParameterStore, ParameterGradients,
    // 손상
    CorruptionLevel,
    // 에러
    GrammarError, GrammarResult,
};
