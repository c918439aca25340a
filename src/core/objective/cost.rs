//! # 예측 조립과 복원 비용
//!
//! 손실은 `coststart` 이후 시간 구간(자기회귀 예측 구간)만 계산한다.

use crate::core::error::{GrammarError, GrammarResult};
use crate::core::pyramid::DerivativeTrack;
use candle_core::Tensor;

/// recons[0..T] 를 특성 축으로 이어붙여 [batch, T * dimx] 예측 텐서 생성
pub fn assemble_predictions(recons: &DerivativeTrack) -> GrammarResult<Tensor> {
    let frames = recons.range_from(0)?;
    Ok(Tensor::cat(&frames, 1)?)
}

/// 시간 인덱스 >= coststart 구간의 평균 제곱 오차 (스칼라 텐서)
pub fn masked_mse(
    predictions: &Tensor,
    targets: &Tensor,
    coststart: usize,
    dimx: usize,
) -> GrammarResult<Tensor> {
    let (_, width) = predictions.dims2()?;
    let (_, target_width) = targets.dims2()?;
    if width != target_width {
        return Err(GrammarError::shape_mismatch(target_width, width));
    }

    let start = coststart * dimx;
    if start >= width {
        return Err(GrammarError::invalid_config(format!(
            "coststart {} is outside a sequence of width {}",
            coststart, width
        )));
    }

    let len = width - start;
    let diff = predictions.narrow(1, start, len)?.sub(&targets.narrow(1, start, len)?)?;
    Ok(diff.sqr()?.mean_all()?)
}
