//! # 파라미터 그래디언트
//!
//! 비용 스칼라에서 candle 역전파로 역할별 그래디언트를 뽑는다.

use crate::core::error::GrammarResult;
use crate::core::params::{ParamRole, ParameterStore};
use candle_core::Tensor;

/// 역할 순서로 정렬된 그래디언트 묶음 (각 형상은 파라미터와 동일)
#[derive(Debug, Clone)]
pub struct ParameterGradients {
    grads: Vec<Tensor>,
}

impl ParameterGradients {
    /// 비용에 대한 역전파. 그래프에 닿지 않은 파라미터는 0 그래디언트.
    pub fn from_cost(cost: &Tensor, params: &ParameterStore) -> GrammarResult<Self> {
        let store = cost.backward()?;
        let mut grads = Vec::with_capacity(ParamRole::ALL.len());

        for (_, var) in params.iter() {
            let grad = match store.get(var.as_tensor()) {
                Some(g) => g.detach(),
                None => var.as_tensor().zeros_like()?,
            };
            grads.push(grad);
        }

        Ok(Self { grads })
    }

    pub fn get(&self, role: ParamRole) -> &Tensor {
        &self.grads[role.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamRole, &Tensor)> {
        ParamRole::ALL.iter().copied().zip(self.grads.iter())
    }

    pub fn into_vec(self) -> Vec<Tensor> {
        self.grads
    }

    /// 역할 순서로 평탄화
    pub fn flatten(&self) -> GrammarResult<Vec<f32>> {
        let mut flat = Vec::new();
        for grad in &self.grads {
            flat.extend(grad.flatten_all()?.to_vec1::<f32>()?);
        }
        Ok(flat)
    }

    /// 역할별 L2 노름
    pub fn norms(&self) -> GrammarResult<Vec<(ParamRole, f32)>> {
        self.iter()
            .map(|(role, g)| -> GrammarResult<(ParamRole, f32)> {
                Ok((role, g.sqr()?.sum_all()?.sqrt()?.to_scalar::<f32>()?))
            })
            .collect()
    }

    pub fn all_finite(&self) -> GrammarResult<bool> {
        Ok(self.flatten()?.iter().all(|v| v.is_finite()))
    }
}
