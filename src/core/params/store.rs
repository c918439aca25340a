//! # 파라미터 저장소
//!
//! 역할별 학습 텐서를 `candle_core::Var` 로 소유한다. 생성 시 한 번만 초기화되고,
//! 이후 변경은 외부 옵티마이저가 `set` / `set_flat` 으로만 수행한다.

use super::roles::{InitScheme, ParamRole};
use crate::core::config::GrammarCellsConfig;
use crate::core::error::{GrammarError, GrammarResult};
use candle_core::{Device, Tensor, Var};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand_distr::Normal;

/// 역할 -> 학습 텐서 저장소
#[derive(Debug)]
pub struct ParameterStore {
    vars: Vec<Var>,
    device: Device,
}

impl ParameterStore {
    /// 초기화 스트림에서 모든 역할을 한 번 샘플링
    pub fn initialize(
        config: &GrammarCellsConfig,
        rng: &mut StdRng,
        device: &Device,
    ) -> GrammarResult<Self> {
        let mut vars = Vec::with_capacity(ParamRole::ALL.len());

        for role in ParamRole::ALL {
            let dims = role.shape(config);
            let numel: usize = dims.iter().product();
            let data = sample_init(role.init_scheme(), numel, rng)?;
            let tensor = Tensor::from_vec(data, dims.as_slice(), device)?;
            vars.push(Var::from_tensor(&tensor)?);
        }

        Ok(Self {
            vars,
            device: device.clone(),
        })
    }

    pub fn var(&self, role: ParamRole) -> &Var {
        &self.vars[role.index()]
    }

    /// 역할의 현재 텐서 (연산 그래프에 추적됨)
    pub fn tensor(&self, role: ParamRole) -> &Tensor {
        self.vars[role.index()].as_tensor()
    }

    /// 역할 순서대로 (역할, 변수) 쌍
    pub fn iter(&self) -> impl Iterator<Item = (ParamRole, &Var)> {
        ParamRole::ALL.iter().copied().zip(self.vars.iter())
    }

    /// 전체 스칼라 파라미터 개수
    pub fn num_params(&self) -> usize {
        self.vars.iter().map(|v| v.elem_count()).sum()
    }

    /// 값 교체 (형상 고정)
    pub fn set(&self, role: ParamRole, value: &Tensor) -> GrammarResult<()> {
        let var = self.var(role);
        if value.dims() != var.dims() {
            return Err(GrammarError::shape_mismatch(
                var.elem_count(),
                value.elem_count(),
            ));
        }
        var.set(&value.to_device(&self.device)?)?;
        Ok(())
    }

    /// 역할 순서로 이어붙인 평탄 벡터
    pub fn flatten(&self) -> GrammarResult<Vec<f32>> {
        let mut flat = Vec::with_capacity(self.num_params());
        for var in &self.vars {
            flat.extend(var.as_tensor().flatten_all()?.to_vec1::<f32>()?);
        }
        Ok(flat)
    }

    /// 평탄 벡터를 역할 순서대로 나누어 적용
    pub fn set_flat(&self, values: &[f32]) -> GrammarResult<()> {
        let total = self.num_params();
        if values.len() != total {
            return Err(GrammarError::shape_mismatch(total, values.len()));
        }

        let mut offset = 0;
        for var in &self.vars {
            let n = var.elem_count();
            let chunk = Tensor::from_slice(&values[offset..offset + n], var.dims(), &self.device)?;
            var.set(&chunk)?;
            offset += n;
        }
        Ok(())
    }
}

fn sample_init(scheme: InitScheme, numel: usize, rng: &mut StdRng) -> GrammarResult<Vec<f32>> {
    let data = match scheme {
        InitScheme::Normal(std) => {
            let normal = Normal::new(0.0, std)
                .map_err(|e| GrammarError::invalid_config(format!("init normal: {}", e)))?;
            (0..numel).map(|_| normal.sample(rng) as f32).collect()
        }
        InitScheme::Uniform(scale) => {
            let uniform = Uniform::new_inclusive(-scale, scale);
            (0..numel).map(|_| uniform.sample(rng)).collect()
        }
        InitScheme::Constant(value) => vec![value; numel],
    };
    Ok(data)
}
