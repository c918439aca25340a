//! # 레벨별 쌍(pairwise) 연산자
//!
//! `infer`: 두 데이터 -> 매핑 유닛, `predict`: 데이터 하나 + 매핑 유닛 -> 다른 데이터.
//! 같은 레벨에서 `infer` 가 만든 매핑 유닛은 `predict` 가 그대로 소비한다.

use super::bilinear::{self, Readout};
use super::level::{Direction, Level};
use crate::core::config::OutputType;
use crate::core::error::GrammarResult;
use crate::core::params::ParameterStore;
use candle_core::Tensor;

/// 파라미터 저장소를 빌려 쓰는 레벨 연산자
#[derive(Debug, Clone, Copy)]
pub struct LevelOperator<'a> {
    params: &'a ParameterStore,
    output_type: OutputType,
}

impl<'a> LevelOperator<'a> {
    pub fn new(params: &'a ParameterStore, output_type: OutputType) -> Self {
        Self { params, output_type }
    }

    /// 레벨 번호로 매핑 유닛 추론 (1..=3 외에는 InvalidLevel)
    pub fn infer(&self, data_left: &Tensor, data_right: &Tensor, level: u8) -> GrammarResult<Tensor> {
        self.infer_at(data_left, data_right, Level::try_from(level)?)
    }

    /// 레벨 번호로 데이터 복원
    pub fn predict(
        &self,
        data_known: &Tensor,
        relation: &Tensor,
        level: u8,
        direction: Direction,
    ) -> GrammarResult<Tensor> {
        self.predict_at(data_known, relation, Level::try_from(level)?, direction)
    }

    /// 이미 투영된 팩터로부터 매핑 유닛 추론
    pub fn fac_infer(&self, fac_left: &Tensor, fac_right: &Tensor, level: u8) -> GrammarResult<Tensor> {
        let binding = Level::try_from(level)?.binding();
        Ok(bilinear::fac_infer(
            fac_left,
            fac_right,
            self.params.tensor(binding.mapping),
            self.params.tensor(binding.mapping_bias),
        )?)
    }

    /// 알려진 쪽 팩터와 매핑 유닛으로 데이터 복원
    pub fn fac_predict(
        &self,
        fac_in: &Tensor,
        relation: &Tensor,
        level: u8,
        direction: Direction,
    ) -> GrammarResult<Tensor> {
        self.fac_predict_at(fac_in, relation, Level::try_from(level)?, direction)
    }

    pub fn infer_at(&self, data_left: &Tensor, data_right: &Tensor, level: Level) -> GrammarResult<Tensor> {
        let binding = level.binding();
        let fac_left = data_left.matmul(self.params.tensor(binding.left))?;
        let fac_right = data_right.matmul(self.params.tensor(binding.right))?;

        Ok(bilinear::fac_infer(
            &fac_left,
            &fac_right,
            self.params.tensor(binding.mapping),
            self.params.tensor(binding.mapping_bias),
        )?)
    }

    pub fn predict_at(
        &self,
        data_known: &Tensor,
        relation: &Tensor,
        level: Level,
        direction: Direction,
    ) -> GrammarResult<Tensor> {
        let (known_role, _) = level.binding().projections(direction);
        let fac_in = data_known.matmul(self.params.tensor(known_role))?;
        self.fac_predict_at(&fac_in, relation, level, direction)
    }

    fn fac_predict_at(
        &self,
        fac_in: &Tensor,
        relation: &Tensor,
        level: Level,
        direction: Direction,
    ) -> GrammarResult<Tensor> {
        let binding = level.binding();
        let (_, out_role) = binding.projections(direction);

        Ok(bilinear::fac_predict(
            fac_in,
            relation,
            self.params.tensor(binding.mapping),
            self.params.tensor(out_role),
            self.params.tensor(binding.data_bias),
            self.readout(level),
        )?)
    }

    /// 시그모이드 출력은 관측 공간(레벨 1 복원)에만 적용
    fn readout(&self, level: Level) -> Readout {
        match (self.output_type, level) {
            (OutputType::Binary, Level::Velocity) => Readout::Sigmoid,
            _ => Readout::Linear,
        }
    }
}
