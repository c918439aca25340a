use crate::core::config::CorruptionType;
use crate::core::corruption::{CorruptionLevel, Corruptor};
use crate::core::error::GrammarError;
use anyhow::Result;
use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_batch(rows: usize, cols: usize, seed: u64) -> Result<Tensor> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f32> = (0..rows * cols).map(|_| rng.gen_range(0.5..2.0)).collect();
    Ok(Tensor::from_vec(data, (rows, cols), &Device::Cpu)?)
}

fn zeromask(level: f32, seed: u64) -> Result<Corruptor> {
    Ok(Corruptor::new(
        CorruptionType::ZeroMask,
        CorruptionLevel::new(level)?,
        StdRng::seed_from_u64(seed),
    ))
}

#[test]
fn 손상확률_0은_항등변환_테스트() -> Result<()> {
    let x = random_batch(16, 8, 1)?;
    let corruptor = zeromask(0.0, 1)?;

    let y = corruptor.corrupt(&x)?;
    let a = x.flatten_all()?.to_vec1::<f32>()?;
    let b = y.flatten_all()?.to_vec1::<f32>()?;
    assert!(a.iter().zip(&b).all(|(p, q)| p.to_bits() == q.to_bits()));
    Ok(())
}

#[test]
fn 손상없음_타입은_확률과_무관하게_항등_테스트() -> Result<()> {
    let x = random_batch(4, 4, 2)?;
    let corruptor = Corruptor::new(
        CorruptionType::None,
        CorruptionLevel::new(0.9)?,
        StdRng::seed_from_u64(0),
    );
    assert_eq!(corruptor.kind(), CorruptionType::None);
    let y = corruptor.corrupt(&x)?;
    assert_eq!(x.to_vec2::<f32>()?, y.to_vec2::<f32>()?);
    Ok(())
}

#[test]
fn 손상확률_1은_전부_0_테스트() -> Result<()> {
    let x = random_batch(8, 8, 3)?;
    let y = zeromask(1.0, 3)?.corrupt(&x)?;
    assert!(y.flatten_all()?.to_vec1::<f32>()?.iter().all(|&v| v == 0.0));
    Ok(())
}

#[test]
fn 마스킹_비율_통계_테스트() -> Result<()> {
    let x = random_batch(100, 100, 4)?;
    let y = zeromask(0.3, 4)?.corrupt(&x)?;

    let original = x.flatten_all()?.to_vec1::<f32>()?;
    let masked = y.flatten_all()?.to_vec1::<f32>()?;
    let zeros = masked.iter().filter(|&&v| v == 0.0).count();
    let ratio = zeros as f32 / masked.len() as f32;
    assert!((0.27..0.33).contains(&ratio), "zero ratio {}", ratio);

    // 살아남은 원소는 스케일링 없이 그대로
    for (o, m) in original.iter().zip(&masked) {
        assert!(*m == 0.0 || m == o);
    }
    Ok(())
}

#[test]
fn 공유_손상확률_핸들_테스트() -> Result<()> {
    let corruptor = zeromask(0.0, 5)?;
    let handle = corruptor.level().clone();
    let x = random_batch(10, 10, 5)?;

    handle.set(1.0)?;
    assert_eq!(corruptor.level().get(), 1.0);
    let y = corruptor.corrupt(&x)?;
    assert!(y.flatten_all()?.to_vec1::<f32>()?.iter().all(|&v| v == 0.0));

    assert!(matches!(handle.set(-0.1), Err(GrammarError::InvalidConfig { .. })));
    assert!(matches!(CorruptionLevel::new(2.0), Err(GrammarError::InvalidConfig { .. })));
    assert_eq!(handle.get(), 1.0);
    Ok(())
}

#[test]
fn 동일_시드_동일_마스크_테스트() -> Result<()> {
    let x = random_batch(6, 6, 6)?;
    let a = zeromask(0.5, 77)?.corrupt(&x)?.to_vec2::<f32>()?;
    let b = zeromask(0.5, 77)?.corrupt(&x)?.to_vec2::<f32>()?;
    assert_eq!(a, b);
    Ok(())
}
