use anyhow::Result;
use approx::assert_relative_eq;
use candle_core::{DType, Device, Tensor};
use grammar_cells::{
    CorruptionType, Direction, GrammarCellsConfig, GrammarCellsL3, GrammarError, ParamRole,
};

fn small_config() -> GrammarCellsConfig {
    GrammarCellsConfig::new()
        .with_dims(2, 2, 2, 2, 2, 2, 2)
        .with_seq_len(6)
        .with_coststart(4)
}

#[test]
fn test_zero_batch_end_to_end() -> Result<()> {
    println!("\n🚀 영 입력 종단 간 시나리오");

    let model = GrammarCellsL3::new(small_config())?;
    let input = Tensor::zeros((4, 6 * 2), DType::F32, &Device::Cpu)?;

    let preds = model.predictions(&input)?;
    assert_eq!(preds.dims(), &[4, 12]);
    assert!(preds.flatten_all()?.to_vec1::<f32>()?.iter().all(|&v| v == 0.0));

    let cost = model.cost(&input)?;
    assert_eq!(cost, 0.0);

    let grads = model.gradients(&input)?;
    for (role, grad) in grads.iter() {
        assert_eq!(grad.dims(), model.params().tensor(role).dims());
    }
    assert!(grads.all_finite()?);
    Ok(())
}

#[test]
fn test_external_update_lowers_cost() -> Result<()> {
    println!("\n📉 외부 경사 하강 한 스텝으로 비용 감소 확인");

    let config = small_config().with_corruption(CorruptionType::None, 0.0);
    let model = GrammarCellsL3::new(config.clone())?;

    // 점점 커지는 궤적: 예측 구간 타깃이 0 이 아니므로 bx 로 비용을 줄일 수 있음
    let data: Vec<f32> = (0..3 * config.input_width())
        .map(|i| ((i % config.input_width()) as f32) * 0.1 + 0.05)
        .collect();
    let input = Tensor::from_vec(data, (3, config.input_width()), &Device::Cpu)?;

    let (before, grads) = model.cost_and_gradients(&input)?;

    let params = model.params();
    let lr = 0.1f32;
    let updated: Vec<f32> = params
        .flatten()?
        .iter()
        .zip(grads.flatten()?.iter())
        .map(|(p, g)| p - lr * g)
        .collect();
    params.set_flat(&updated)?;

    let after = model.cost(&input)?;
    println!("  - 비용: {:.6} -> {:.6}", before, after);
    assert!(after < before);
    Ok(())
}

#[test]
fn test_invalid_level_through_public_operator() -> Result<()> {
    let model = GrammarCellsL3::new(small_config())?;
    let op = model.operator();
    let x = Tensor::ones((1, 2), DType::F32, &Device::Cpu)?;

    assert!(matches!(op.infer(&x, &x, 4), Err(GrammarError::InvalidLevel(4))));
    assert!(matches!(
        op.predict(&x, &x, 0, Direction::Right),
        Err(GrammarError::InvalidLevel(0))
    ));
    assert!(op.infer(&x, &x, 3).is_ok());
    Ok(())
}

#[test]
fn test_trace_consistency() -> Result<()> {
    let config = small_config().with_seq_len(9);
    let model = GrammarCellsL3::new(config.clone())?;

    let data: Vec<f32> = (0..2 * config.input_width()).map(|i| (i as f32 * 0.37).sin()).collect();
    let input = Tensor::from_vec(data, (2, config.input_width()), &Device::Cpu)?;

    let trace = model.forward(&input)?;
    assert_eq!(trace.predictions().dims(), &[2, config.input_width()]);
    assert_relative_eq!(trace.cost()?, model.cost(&input)?, max_relative = 1e-6);

    // 같은 평가 내에서 저크는 t >= 3 동안 동일
    let j3 = trace.state().jerks().get(3)?.to_vec2::<f32>()?;
    for t in 4..config.seq_len {
        assert_eq!(trace.state().jerks().get(t)?.to_vec2::<f32>()?, j3);
    }

    let norms = model.gradients(&input)?.norms()?;
    assert_eq!(norms.len(), ParamRole::ALL.len());
    assert_eq!(norms[0].0, ParamRole::WxfLeft);
    Ok(())
}
