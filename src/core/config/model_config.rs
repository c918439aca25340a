//! # 그래머 셀 모델 설정
//!
//! 레이어 폭, 시퀀스 길이, 출력 타입, 손실 시작 위치, 입력 손상 방식과
//! 두 난수 스트림의 시드를 모두 생성 시점에 고정한다.

use crate::core::error::{GrammarError, GrammarResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 부트스트랩에 필요한 최소 프레임 수
pub const BOOTSTRAP_FRAMES: usize = 4;

/// 관측 공간 예측의 출력 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// 선형 출력
    #[default]
    Real,
    /// 시그모이드 출력 (0~1 관측값)
    Binary,
}

/// 입력 손상 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionType {
    /// 항등 변환
    None,
    /// 각 원소를 확률적으로 0으로 마스킹
    #[default]
    ZeroMask,
}

/// 3레벨 그래머 셀 구성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarCellsConfig {
    /// 관측 프레임 폭
    pub dimx: usize,
    /// 레벨 1 팩터 폭
    pub dimfacx: usize,
    /// 속도 매핑 유닛 폭
    pub dimv: usize,
    /// 레벨 2 팩터 폭
    pub dimfacv: usize,
    /// 가속도 매핑 유닛 폭
    pub dima: usize,
    /// 레벨 3 팩터 폭
    pub dimfaca: usize,
    /// 저크 매핑 유닛 폭
    pub dimj: usize,
    /// 시퀀스 길이 T
    pub seq_len: usize,
    pub output_type: OutputType,
    /// 손실에 포함되는 첫 시간 인덱스
    pub coststart: usize,
    pub vis_corrupt_type: CorruptionType,
    /// 초기 손상 확률 (런타임에 공유 핸들로 변경 가능)
    pub vis_corrupt_level: f32,
    /// 파라미터 초기화 스트림 시드
    pub init_seed: u64,
    /// 손상 노이즈 스트림 시드
    pub corrupt_seed: u64,
}

impl Default for GrammarCellsConfig {
    fn default() -> Self {
        Self {
            dimx: 2,
            dimfacx: 2,
            dimv: 2,
            dimfacv: 2,
            dima: 2,
            dimfaca: 2,
            dimj: 2,
            seq_len: 6,
            output_type: OutputType::Real,
            coststart: 4,
            vis_corrupt_type: CorruptionType::ZeroMask,
            vis_corrupt_level: 0.0,
            init_seed: 1,
            corrupt_seed: 1,
        }
    }
}

impl GrammarCellsConfig {
    /// 기본 구성 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 레이어 폭 일괄 설정 (dimx, dimfacx, dimv, dimfacv, dima, dimfaca, dimj)
    pub fn with_dims(
        mut self,
        dimx: usize,
        dimfacx: usize,
        dimv: usize,
        dimfacv: usize,
        dima: usize,
        dimfaca: usize,
        dimj: usize,
    ) -> Self {
        self.dimx = dimx;
        self.dimfacx = dimfacx;
        self.dimv = dimv;
        self.dimfacv = dimfacv;
        self.dima = dima;
        self.dimfaca = dimfaca;
        self.dimj = dimj;
        self
    }

    pub fn with_seq_len(mut self, seq_len: usize) -> Self {
        self.seq_len = seq_len;
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn with_coststart(mut self, coststart: usize) -> Self {
        self.coststart = coststart;
        self
    }

    /// 입력 손상 방식과 초기 확률 설정
    pub fn with_corruption(mut self, kind: CorruptionType, level: f32) -> Self {
        self.vis_corrupt_type = kind;
        self.vis_corrupt_level = level;
        self
    }

    /// 두 난수 스트림 시드 설정
    pub fn with_seeds(mut self, init_seed: u64, corrupt_seed: u64) -> Self {
        self.init_seed = init_seed;
        self.corrupt_seed = corrupt_seed;
        self
    }

    /// 입력 배치 한 행의 폭 (T * dimx)
    pub fn input_width(&self) -> usize {
        self.seq_len * self.dimx
    }

    /// 설정 검증
    pub fn validate(&self) -> GrammarResult<()> {
        let widths = [
            ("dimx", self.dimx),
            ("dimfacx", self.dimfacx),
            ("dimv", self.dimv),
            ("dimfacv", self.dimfacv),
            ("dima", self.dima),
            ("dimfaca", self.dimfaca),
            ("dimj", self.dimj),
        ];
        if let Some((name, _)) = widths.iter().find(|(_, w)| *w == 0) {
            return Err(GrammarError::invalid_config(format!("{} must be positive", name)));
        }
        if self.seq_len < BOOTSTRAP_FRAMES {
            return Err(GrammarError::invalid_config(format!(
                "seq_len must be at least {}, got {}",
                BOOTSTRAP_FRAMES, self.seq_len
            )));
        }
        if self.coststart >= self.seq_len {
            return Err(GrammarError::invalid_config(format!(
                "coststart {} leaves no frames in a sequence of {}",
                self.coststart, self.seq_len
            )));
        }
        validate_corrupt_level(self.vis_corrupt_level)?;
        Ok(())
    }

    /// JSON 문자열에서 구성 로딩 (검증 포함)
    pub fn from_json_str(json: &str) -> GrammarResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// JSON 파일에서 구성 로딩
    pub fn from_json_file(path: impl AsRef<Path>) -> GrammarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// 손상 확률 범위 검사 ([0, 1])
pub fn validate_corrupt_level(level: f32) -> GrammarResult<()> {
    if !(0.0..=1.0).contains(&level) {
        return Err(GrammarError::invalid_config(format!(
            "vis_corrupt_level must be in [0, 1], got {}",
            level
        )));
    }
    Ok(())
}
