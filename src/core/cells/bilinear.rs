//! # 팩터화 쌍선형 프리미티브
//!
//! 두 팩터의 원소곱(Hadamard)으로 매핑 유닛을 추론하고, 한 팩터와 매핑 유닛으로
//! 다른 쪽 데이터를 복원한다. 형상은 생성 시점 폭으로 결정되며 여기서 검사하지 않는다.

use candle_core::{Result, Tensor};

/// 복원 출력에 적용되는 읽기 함수
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readout {
    Linear,
    Sigmoid,
}

impl Readout {
    pub fn apply(self, pre: Tensor) -> Result<Tensor> {
        match self {
            Readout::Linear => Ok(pre),
            Readout::Sigmoid => candle_nn::ops::sigmoid(&pre),
        }
    }
}

/// 매핑 유닛 추론: `(f_l ⊙ f_r) · W_m + b_m`
///
/// * `fac_left`, `fac_right` - [batch, dimfac]
/// * `wfm` - [dimfac, dimmap]
/// * `bm` - [dimmap]
pub fn fac_infer(fac_left: &Tensor, fac_right: &Tensor, wfm: &Tensor, bm: &Tensor) -> Result<Tensor> {
    fac_left.mul(fac_right)?.matmul(wfm)?.broadcast_add(bm)
}

/// 데이터 복원: `readout(((f_in ⊙ (m · W_mᵀ)) · W_outᵀ) + b_d)`
///
/// * `fac_in` - 알려진 쪽 팩터 [batch, dimfac]
/// * `mapping` - 매핑 유닛 [batch, dimmap]
/// * `wdf_out` - 복원할 쪽 투영 [dimdata, dimfac]
pub fn fac_predict(
    fac_in: &Tensor,
    mapping: &Tensor,
    wfm: &Tensor,
    wdf_out: &Tensor,
    bd: &Tensor,
    readout: Readout,
) -> Result<Tensor> {
    let fac_map = mapping.matmul(&wfm.t()?)?;
    let pre = fac_in.mul(&fac_map)?.matmul(&wdf_out.t()?)?.broadcast_add(bd)?;
    readout.apply(pre)
}
