//! # 입력 손상
//!
//! 피라미드 구성 전에 각 프레임에 독립적으로 적용된다.
//! 손상 확률은 공유 핸들로 런타임에 바꿀 수 있고, 노이즈는 전용 난수 스트림에서 뽑는다.

use crate::core::config::{validate_corrupt_level, CorruptionType};
use crate::core::error::{GrammarError, GrammarResult};
use candle_core::Tensor;
use parking_lot::{Mutex, RwLock};
use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use std::sync::Arc;

/// 런타임에 변경 가능한 손상 확률 (복제본끼리 값을 공유)
#[derive(Debug, Clone)]
pub struct CorruptionLevel(Arc<RwLock<f32>>);

impl CorruptionLevel {
    pub fn new(level: f32) -> GrammarResult<Self> {
        validate_corrupt_level(level)?;
        Ok(Self(Arc::new(RwLock::new(level))))
    }

    pub fn get(&self) -> f32 {
        *self.0.read()
    }

    pub fn set(&self, level: f32) -> GrammarResult<()> {
        validate_corrupt_level(level)?;
        *self.0.write() = level;
        Ok(())
    }
}

/// 입력 손상기
#[derive(Debug)]
pub struct Corruptor {
    kind: CorruptionType,
    level: CorruptionLevel,
    rng: Mutex<StdRng>,
}

impl Corruptor {
    pub fn new(kind: CorruptionType, level: CorruptionLevel, rng: StdRng) -> Self {
        Self {
            kind,
            level,
            rng: Mutex::new(rng),
        }
    }

    pub fn kind(&self) -> CorruptionType {
        self.kind
    }

    /// 공유 손상 확률 핸들
    pub fn level(&self) -> &CorruptionLevel {
        &self.level
    }

    /// 프레임 하나 손상. 확률 0 이면 입력을 그대로 돌려준다.
    pub fn corrupt(&self, frame: &Tensor) -> GrammarResult<Tensor> {
        match self.kind {
            CorruptionType::None => Ok(frame.clone()),
            CorruptionType::ZeroMask => {
                let p = self.level.get();
                if p <= 0.0 {
                    return Ok(frame.clone());
                }
                let mask = self.zero_mask(frame, p)?;
                Ok(frame.mul(&mask)?)
            }
        }
    }

    /// 원소별로 확률 `p` 로 0, 아니면 1 인 마스크
    fn zero_mask(&self, frame: &Tensor, p: f32) -> GrammarResult<Tensor> {
        let keep = Bernoulli::new(1.0 - p as f64)
            .map_err(|e| GrammarError::invalid_config(format!("corruption level {}: {}", p, e)))?;

        let mut rng = self.rng.lock();
        let values: Vec<f32> = (0..frame.elem_count())
            .map(|_| if keep.sample(&mut *rng) { 1.0 } else { 0.0 })
            .collect();

        let mask = Tensor::from_vec(values, frame.dims(), frame.device())?;
        Ok(mask.to_dtype(frame.dtype())?)
    }
}
