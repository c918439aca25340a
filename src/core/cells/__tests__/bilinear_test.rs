use crate::core::cells::bilinear::{fac_infer, fac_predict, Readout};
use anyhow::Result;
use approx::assert_abs_diff_eq;
use candle_core::{Device, Tensor};

#[test]
fn 매핑_유닛_추론_수식_테스트() -> Result<()> {
    let dev = Device::Cpu;
    let fl = Tensor::new(&[[1.0f32, 2.0], [3.0, -1.0]], &dev)?;
    let fr = Tensor::new(&[[0.5f32, 1.0], [2.0, 4.0]], &dev)?;
    let wfm = Tensor::new(&[[1.0f32, 0.0, 2.0], [0.0, 1.0, -1.0]], &dev)?;
    let bm = Tensor::new(&[0.1f32, 0.2, 0.3], &dev)?;

    let m = fac_infer(&fl, &fr, &wfm, &bm)?.to_vec2::<f32>()?;

    // (fl * fr) = [[0.5, 2], [6, -4]]
    let expected = [[0.6f32, 2.2, -0.7], [6.1, -3.8, 16.3]];
    for (row, exp) in m.iter().zip(expected.iter()) {
        for (&a, &b) in row.iter().zip(exp.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
    }
    Ok(())
}

#[test]
fn 데이터_복원_수식_테스트() -> Result<()> {
    let dev = Device::Cpu;
    let fac_in = Tensor::new(&[[2.0f32, 1.0]], &dev)?;
    let mapping = Tensor::new(&[[1.0f32, 1.0, 1.0]], &dev)?;
    let wfm = Tensor::new(&[[1.0f32, 0.0, 1.0], [0.0, 1.0, 1.0]], &dev)?;
    // [dimdata=3, dimfac=2]
    let wdf_out = Tensor::new(&[[1.0f32, 0.0], [0.0, 1.0], [1.0, 1.0]], &dev)?;
    let bd = Tensor::new(&[0.0f32, 0.5, -1.0], &dev)?;

    let out = fac_predict(&fac_in, &mapping, &wfm, &wdf_out, &bd, Readout::Linear)?
        .to_vec2::<f32>()?;

    // m · wfmᵀ = [2, 2], fac_in ⊙ = [4, 2], · wdf_outᵀ = [4, 2, 6]
    assert_abs_diff_eq!(out[0][0], 4.0, epsilon = 1e-6);
    assert_abs_diff_eq!(out[0][1], 2.5, epsilon = 1e-6);
    assert_abs_diff_eq!(out[0][2], 5.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn 시그모이드_읽기_테스트() -> Result<()> {
    let dev = Device::Cpu;
    let pre = Tensor::new(&[[0.0f32, 100.0, -100.0]], &dev)?;

    let linear = Readout::Linear.apply(pre.clone())?.to_vec2::<f32>()?;
    assert_eq!(linear[0], vec![0.0, 100.0, -100.0]);

    let squashed = Readout::Sigmoid.apply(pre)?.to_vec2::<f32>()?;
    assert_abs_diff_eq!(squashed[0][0], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(squashed[0][1], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(squashed[0][2], 0.0, epsilon = 1e-6);
    Ok(())
}
