//! # 레벨 / 방향 / 레벨별 파라미터 라우팅 테이블
//!
//! 레벨 L 은 (L-1)차 미분과 L차 미분 사이의 관계를 다룬다.
//! 레벨 유효성 검사는 `Level::try_from` 한 곳에서만 일어난다.

use crate::core::error::GrammarError;
use crate::core::params::ParamRole;

/// 미분 차수 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// 레벨 1: 위치 <-> 속도
    Velocity = 1,
    /// 레벨 2: 속도 <-> 가속도
    Acceleration = 2,
    /// 레벨 3: 가속도 <-> 저크
    Jerk = 3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Velocity, Level::Acceleration, Level::Jerk];

    /// 라우팅 테이블 인덱스 (0부터)
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// 이 레벨이 사용하는 파라미터 묶음
    pub fn binding(self) -> &'static LevelBinding {
        &LEVEL_TABLE[self.index()]
    }
}

impl TryFrom<u8> for Level {
    type Error = GrammarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::Velocity),
            2 => Ok(Level::Acceleration),
            3 => Ok(Level::Jerk),
            other => Err(GrammarError::InvalidLevel(other)),
        }
    }
}

/// 예측 방향: 복원할 쪽
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// 오른쪽 입력(알려진 쪽) 으로부터 왼쪽 복원
    Left,
    /// 왼쪽 입력으로부터 오른쪽 복원 (순방향 롤아웃)
    #[default]
    Right,
}

/// 한 레벨의 파라미터 역할 묶음
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBinding {
    /// 왼쪽 데이터 -> 팩터 투영
    pub left: ParamRole,
    /// 오른쪽 데이터 -> 팩터 투영
    pub right: ParamRole,
    /// 팩터 곱 -> 매핑 유닛
    pub mapping: ParamRole,
    /// 매핑 유닛 편향
    pub mapping_bias: ParamRole,
    /// 데이터 공간 편향 (predict 출력)
    pub data_bias: ParamRole,
}

impl LevelBinding {
    /// (알려진 쪽 투영, 복원할 쪽 투영)
    pub fn projections(&self, direction: Direction) -> (ParamRole, ParamRole) {
        match direction {
            Direction::Right => (self.left, self.right),
            Direction::Left => (self.right, self.left),
        }
    }
}

/// 레벨 1..3 라우팅 테이블.
///
/// 레벨 3 의 데이터 편향은 `ba` 로, 레벨 2 의 매핑 편향과 공유된다.
/// 가속도 공간의 편향이 `ba` 하나뿐이므로 그대로 유지한다.
pub const LEVEL_TABLE: [LevelBinding; 3] = [
    LevelBinding {
        left: ParamRole::WxfLeft,
        right: ParamRole::WxfRight,
        mapping: ParamRole::Wv,
        mapping_bias: ParamRole::Bv,
        data_bias: ParamRole::Bx,
    },
    LevelBinding {
        left: ParamRole::WvfLeft,
        right: ParamRole::WvfRight,
        mapping: ParamRole::Wa,
        mapping_bias: ParamRole::Ba,
        data_bias: ParamRole::Bv,
    },
    LevelBinding {
        left: ParamRole::WafLeft,
        right: ParamRole::WafRight,
        mapping: ParamRole::Wj,
        mapping_bias: ParamRole::Bj,
        data_bias: ParamRole::Ba,
    },
];
