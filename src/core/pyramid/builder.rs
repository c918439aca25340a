//! 롤아웃 계획 해석기: 프레임 -> 미분 피라미드

use super::plan::{PlanStep, RolloutPlan, Slot, Stream};
use super::track::PyramidState;
use crate::core::cells::{Direction, LevelOperator};
use crate::core::error::{GrammarError, GrammarResult};
use candle_core::Tensor;
use log::trace;

/// 계획과 레벨 연산자로 피라미드를 만든다
#[derive(Debug, Clone, Copy)]
pub struct PyramidBuilder<'a> {
    plan: &'a RolloutPlan,
    op: LevelOperator<'a>,
}

impl<'a> PyramidBuilder<'a> {
    pub fn new(plan: &'a RolloutPlan, op: LevelOperator<'a>) -> Self {
        Self { plan, op }
    }

    /// (손상된) 프레임 T 개로 전체 피라미드 구성.
    /// 어느 단계든 실패하면 부분 결과 없이 에러를 돌려준다.
    pub fn build(&self, frames: Vec<Tensor>) -> GrammarResult<PyramidState> {
        let seq_len = self.plan.seq_len();
        if frames.len() != seq_len {
            return Err(GrammarError::shape_mismatch(seq_len, frames.len()));
        }

        let mut state = PyramidState::new(seq_len);
        for (t, frame) in frames.into_iter().enumerate() {
            state.write(Slot::new(Stream::Frame, t), frame)?;
        }

        for step in self.plan.steps() {
            let value = match *step {
                PlanStep::Copy { from, .. } => state.read(from)?.clone(),
                PlanStep::Infer { level, left, right, .. } => {
                    self.op.infer_at(state.read(left)?, state.read(right)?, level)?
                }
                PlanStep::Predict { level, known, relation, .. } => self.op.predict_at(
                    state.read(known)?,
                    state.read(relation)?,
                    level,
                    Direction::Right,
                )?,
            };
            let out = step.output();
            trace!("pyramid {}[{}] <- {:?}", out.stream, out.step, step);
            state.write(out, value)?;
        }

        Ok(state)
    }
}
