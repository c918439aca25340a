//! # 3레벨 그래머 셀 모델
//!
//! 입력 배치 [batch, T * dimx] 를 T 개 프레임으로 나누고, 손상시킨 뒤,
//! 미분 피라미드를 구성해 예측/비용/그래디언트를 돌려준다.
//! 모델은 자신의 파라미터를 갱신하지 않는다. 갱신은 외부 학습 루프의 몫이다.

use crate::core::cells::LevelOperator;
use crate::core::config::{GrammarCellsConfig, BOOTSTRAP_FRAMES};
use crate::core::corruption::{CorruptionLevel, Corruptor};
use crate::core::error::{GrammarError, GrammarResult};
use crate::core::objective::{assemble_predictions, masked_mse, ParameterGradients};
use crate::core::params::ParameterStore;
use crate::core::pyramid::{PyramidBuilder, PyramidState, RolloutPlan, Stream};
use candle_core::{DType, Device, Tensor};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 한 번의 평가 결과 (손상 샘플 하나에 대한 전체 피라미드)
#[derive(Debug, Clone)]
pub struct RolloutTrace {
    state: PyramidState,
    predictions: Tensor,
    cost: Tensor,
}

impl RolloutTrace {
    pub fn state(&self) -> &PyramidState {
        &self.state
    }

    /// [batch, T * dimx] 예측
    pub fn predictions(&self) -> &Tensor {
        &self.predictions
    }

    /// 스칼라 비용 텐서 (역전파 가능)
    pub fn cost_tensor(&self) -> &Tensor {
        &self.cost
    }

    pub fn cost(&self) -> GrammarResult<f32> {
        Ok(self.cost.to_scalar::<f32>()?)
    }

    /// 스트림의 t 번째 슬롯
    pub fn at(&self, stream: Stream, step: usize) -> GrammarResult<&Tensor> {
        self.state.track(stream).get(step)
    }

    /// 자기회귀 구간(t >= 4) 슬롯들
    pub fn rollout(&self, stream: Stream) -> GrammarResult<Vec<Tensor>> {
        self.state.track(stream).range_from(BOOTSTRAP_FRAMES)
    }
}

/// 3레벨 그래머 셀 (위치 / 속도 / 가속도 / 저크)
#[derive(Debug)]
pub struct GrammarCellsL3 {
    config: GrammarCellsConfig,
    device: Device,
    params: ParameterStore,
    corruptor: Corruptor,
    plan: RolloutPlan,
}

impl GrammarCellsL3 {
    /// 구성의 시드로 두 난수 스트림을 만들어 CPU 에 생성
    pub fn new(config: GrammarCellsConfig) -> GrammarResult<Self> {
        let init_rng = StdRng::seed_from_u64(config.init_seed);
        let corrupt_rng = StdRng::seed_from_u64(config.corrupt_seed);
        Self::with_rngs(config, init_rng, corrupt_rng, &Device::Cpu)
    }

    /// 명시적인 초기화 / 손상 난수 스트림으로 생성
    pub fn with_rngs(
        config: GrammarCellsConfig,
        mut init_rng: StdRng,
        corrupt_rng: StdRng,
        device: &Device,
    ) -> GrammarResult<Self> {
        config.validate()?;

        let params = ParameterStore::initialize(&config, &mut init_rng, device)?;
        let level = CorruptionLevel::new(config.vis_corrupt_level)?;
        let corruptor = Corruptor::new(config.vis_corrupt_type, level, corrupt_rng);
        let plan = RolloutPlan::new(config.seq_len)?;

        debug!(
            "GrammarCellsL3: {} params, seq_len {}, coststart {}, {} plan steps, corruption {:?}@{}",
            params.num_params(),
            config.seq_len,
            config.coststart,
            plan.steps().len(),
            config.vis_corrupt_type,
            config.vis_corrupt_level,
        );

        Ok(Self {
            config,
            device: device.clone(),
            params,
            corruptor,
            plan,
        })
    }

    pub fn config(&self) -> &GrammarCellsConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn plan(&self) -> &RolloutPlan {
        &self.plan
    }

    /// 공유 손상 확률 핸들 (학습 루프에서 조정용)
    pub fn corruption_level(&self) -> CorruptionLevel {
        self.corruptor.level().clone()
    }

    pub fn set_corrupt_level(&self, level: f32) -> GrammarResult<()> {
        self.corruptor.level().set(level)
    }

    /// 파라미터를 빌린 레벨 연산자
    pub fn operator(&self) -> LevelOperator<'_> {
        LevelOperator::new(&self.params, self.config.output_type)
    }

    /// 전체 순전파: 분할 -> 손상 -> 피라미드 -> 예측 -> 비용
    pub fn forward(&self, input: &Tensor) -> GrammarResult<RolloutTrace> {
        let input = self.check_input(input)?;
        let dimx = self.config.dimx;

        let frames = (0..self.config.seq_len)
            .map(|t| -> GrammarResult<Tensor> {
                let frame = input.narrow(1, t * dimx, dimx)?.contiguous()?;
                self.corruptor.corrupt(&frame)
            })
            .collect::<GrammarResult<Vec<_>>>()?;

        let state = PyramidBuilder::new(&self.plan, self.operator()).build(frames)?;
        let predictions = assemble_predictions(state.recons())?;
        let cost = masked_mse(&predictions, &input, self.config.coststart, dimx)?;

        let value = cost.to_scalar::<f32>()?;
        if !value.is_finite() {
            warn!("non-finite cost {}", value);
        }

        Ok(RolloutTrace {
            state,
            predictions,
            cost,
        })
    }

    /// 복원된 시퀀스 [batch, T * dimx]
    pub fn predictions(&self, input: &Tensor) -> GrammarResult<Tensor> {
        Ok(self.forward(input)?.predictions.detach())
    }

    pub fn cost(&self, input: &Tensor) -> GrammarResult<f32> {
        self.forward(input)?.cost()
    }

    /// 역할별 그래디언트 (파라미터 형상과 동일)
    pub fn gradients(&self, input: &Tensor) -> GrammarResult<ParameterGradients> {
        Ok(self.cost_and_gradients(input)?.1)
    }

    /// 같은 손상 샘플에 대한 비용과 그래디언트
    pub fn cost_and_gradients(&self, input: &Tensor) -> GrammarResult<(f32, ParameterGradients)> {
        let trace = self.forward(input)?;
        let grads = ParameterGradients::from_cost(trace.cost_tensor(), &self.params)?;
        Ok((trace.cost()?, grads))
    }

    /// 역할 순서로 평탄화된 그래디언트
    pub fn flat_gradients(&self, input: &Tensor) -> GrammarResult<Vec<f32>> {
        self.gradients(input)?.flatten()
    }

    /// t = 4..T-1 속도 매핑 유닛
    pub fn velocities(&self, input: &Tensor) -> GrammarResult<Vec<Tensor>> {
        self.rollout_of(input, Stream::Velocity)
    }

    pub fn accelerations(&self, input: &Tensor) -> GrammarResult<Vec<Tensor>> {
        self.rollout_of(input, Stream::Acceleration)
    }

    pub fn jerks(&self, input: &Tensor) -> GrammarResult<Vec<Tensor>> {
        self.rollout_of(input, Stream::Jerk)
    }

    pub fn velocity_at(&self, input: &Tensor, step: usize) -> GrammarResult<Tensor> {
        self.rollout_at(input, Stream::Velocity, step)
    }

    pub fn acceleration_at(&self, input: &Tensor, step: usize) -> GrammarResult<Tensor> {
        self.rollout_at(input, Stream::Acceleration, step)
    }

    pub fn jerk_at(&self, input: &Tensor, step: usize) -> GrammarResult<Tensor> {
        self.rollout_at(input, Stream::Jerk, step)
    }

    // 디버그 접근자

    pub fn debug_xs1(&self, input: &Tensor) -> GrammarResult<Tensor> {
        self.probe(input, Stream::Frame, 1)
    }

    pub fn debug_vels1(&self, input: &Tensor) -> GrammarResult<Tensor> {
        self.probe(input, Stream::Velocity, 1)
    }

    pub fn debug_accs4(&self, input: &Tensor) -> GrammarResult<Tensor> {
        self.probe(input, Stream::Acceleration, 4)
    }

    pub fn debug_vels4(&self, input: &Tensor) -> GrammarResult<Tensor> {
        self.probe(input, Stream::Velocity, 4)
    }

    fn rollout_of(&self, input: &Tensor, stream: Stream) -> GrammarResult<Vec<Tensor>> {
        let trace = self.forward(input)?;
        Ok(trace.rollout(stream)?.iter().map(Tensor::detach).collect())
    }

    /// 자기회귀 구간 밖(t < 4) 요청은 거부
    fn rollout_at(&self, input: &Tensor, stream: Stream, step: usize) -> GrammarResult<Tensor> {
        if step < BOOTSTRAP_FRAMES {
            return Err(GrammarError::UndefinedSlot {
                stream: stream.name(),
                step,
            });
        }
        self.probe(input, stream, step)
    }

    fn probe(&self, input: &Tensor, stream: Stream, step: usize) -> GrammarResult<Tensor> {
        Ok(self.forward(input)?.at(stream, step)?.detach())
    }

    fn check_input(&self, input: &Tensor) -> GrammarResult<Tensor> {
        let (batch, width) = input.dims2()?;
        let expected = self.config.input_width();
        if width != expected {
            return Err(GrammarError::shape_mismatch(expected, width));
        }
        if batch == 0 {
            return Err(GrammarError::EmptyBatch);
        }
        Ok(input.to_device(&self.device)?.to_dtype(DType::F32)?)
    }
}
