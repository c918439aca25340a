//! 학습 파라미터 역할(role) 정의

use crate::core::config::GrammarCellsConfig;
use crate::core::error::GrammarError;
use std::fmt;
use std::str::FromStr;

/// 파라미터 초기화 방식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitScheme {
    /// 정규분포 N(0, std)
    Normal(f64),
    /// 균등분포 U(-scale, scale)
    Uniform(f32),
    /// 상수값
    Constant(f32),
}

/// 이름이 붙은 학습 파라미터 역할 (그래디언트 순서와 동일)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamRole {
    WxfLeft,
    WxfRight,
    Wv,
    WvfLeft,
    WvfRight,
    Wa,
    WafLeft,
    WafRight,
    Wj,
    Bx,
    Bv,
    Ba,
    Bj,
}

impl ParamRole {
    /// 전체 역할 (고정 순서)
    pub const ALL: [ParamRole; 13] = [
        ParamRole::WxfLeft,
        ParamRole::WxfRight,
        ParamRole::Wv,
        ParamRole::WvfLeft,
        ParamRole::WvfRight,
        ParamRole::Wa,
        ParamRole::WafLeft,
        ParamRole::WafRight,
        ParamRole::Wj,
        ParamRole::Bx,
        ParamRole::Bv,
        ParamRole::Ba,
        ParamRole::Bj,
    ];

    /// 저장소 내 인덱스
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamRole::WxfLeft => "wxf_left",
            ParamRole::WxfRight => "wxf_right",
            ParamRole::Wv => "wv",
            ParamRole::WvfLeft => "wvf_left",
            ParamRole::WvfRight => "wvf_right",
            ParamRole::Wa => "wa",
            ParamRole::WafLeft => "waf_left",
            ParamRole::WafRight => "waf_right",
            ParamRole::Wj => "wj",
            ParamRole::Bx => "bx",
            ParamRole::Bv => "bv",
            ParamRole::Ba => "ba",
            ParamRole::Bj => "bj",
        }
    }

    pub fn is_bias(self) -> bool {
        matches!(self, ParamRole::Bx | ParamRole::Bv | ParamRole::Ba | ParamRole::Bj)
    }

    /// 구성에서 결정되는 텐서 형상
    pub fn shape(self, config: &GrammarCellsConfig) -> Vec<usize> {
        let c = config;
        match self {
            ParamRole::WxfLeft | ParamRole::WxfRight => vec![c.dimx, c.dimfacx],
            ParamRole::Wv => vec![c.dimfacx, c.dimv],
            ParamRole::WvfLeft | ParamRole::WvfRight => vec![c.dimv, c.dimfacv],
            ParamRole::Wa => vec![c.dimfacv, c.dima],
            ParamRole::WafLeft | ParamRole::WafRight => vec![c.dima, c.dimfaca],
            ParamRole::Wj => vec![c.dimfaca, c.dimj],
            ParamRole::Bx => vec![c.dimx],
            ParamRole::Bv => vec![c.dimv],
            ParamRole::Ba => vec![c.dima],
            ParamRole::Bj => vec![c.dimj],
        }
    }

    /// 초기화 방식: 관측 팩터는 정규분포, 나머지 행렬은 균등분포, 편향은 0
    pub fn init_scheme(self) -> InitScheme {
        match self {
            ParamRole::WxfLeft | ParamRole::WxfRight => InitScheme::Normal(0.01),
            role if role.is_bias() => InitScheme::Constant(0.0),
            _ => InitScheme::Uniform(0.01),
        }
    }
}

impl fmt::Display for ParamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamRole {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamRole::ALL
            .iter()
            .copied()
            .find(|role| role.name() == s)
            .ok_or_else(|| GrammarError::UnknownRole(s.to_string()))
    }
}
