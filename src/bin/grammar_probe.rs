use anyhow::{Context, Result};
use candle_core::{Device, Tensor};
use clap::{value_parser, Arg, ArgMatches, Command};
use grammar_cells::{GrammarCellsConfig, GrammarCellsL3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process;

fn main() {
    env_logger::init();

    let matches = Command::new("Grammar Cells Probe")
        .version("0.1.0")
        .about("3레벨 그래머 셀 모델 점검 도구")
        .subcommand(
            Command::new("evaluate")
                .about("합성 등저크 궤적으로 비용과 그래디언트 노름 출력")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("FILE")
                        .help("JSON 구성 파일 (생략 시 기본값)")
                )
                .arg(
                    Arg::new("batch")
                        .long("batch")
                        .short('b')
                        .value_name("SIZE")
                        .help("합성 배치 크기")
                        .value_parser(value_parser!(usize))
                        .default_value("8")
                )
                .arg(
                    Arg::new("data-seed")
                        .long("data-seed")
                        .value_name("SEED")
                        .help("합성 데이터 시드")
                        .value_parser(value_parser!(u64))
                        .default_value("0")
                )
                .arg(
                    Arg::new("corrupt-level")
                        .long("corrupt-level")
                        .value_name("P")
                        .help("입력 손상 확률 (0.0-1.0)")
                        .value_parser(value_parser!(f32))
                )
        )
        .subcommand(
            Command::new("config")
                .about("기본 구성을 JSON 으로 출력")
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("evaluate", sub_matches)) => handle_evaluate(sub_matches),
        Some(("config", _)) => handle_config(),
        _ => {
            println!("❌ 명령을 지정해주세요. --help를 참조하세요.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("❌ 오류: {:#}", e);
        process::exit(1);
    }
}

fn handle_config() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&GrammarCellsConfig::default())?);
    Ok(())
}

fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => GrammarCellsConfig::from_json_file(path)
            .with_context(|| format!("구성 로딩 실패: {}", path))?,
        None => GrammarCellsConfig::default(),
    };
    let batch = *matches.get_one::<usize>("batch").unwrap_or(&8);
    let data_seed = *matches.get_one::<u64>("data-seed").unwrap_or(&0);

    let model = GrammarCellsL3::new(config.clone())?;
    if let Some(&level) = matches.get_one::<f32>("corrupt-level") {
        model.set_corrupt_level(level)?;
    }

    println!("📊 모델 정보:");
    println!("  - 파라미터 수: {}", model.params().num_params());
    println!("  - 시퀀스 길이: {} (손실 시작 {})", config.seq_len, config.coststart);
    println!("  - 계획 단계 수: {}", model.plan().steps().len());
    println!("  - 손상: {:?} @ {}", config.vis_corrupt_type, model.corruption_level().get());

    let input = constant_jerk_batch(&config, batch, data_seed)?;
    let (cost, grads) = model.cost_and_gradients(&input)?;

    println!("\n🎯 비용: {:.6e}", cost);
    println!("📐 그래디언트 노름:");
    for (role, norm) in grads.norms()? {
        println!("  - {:<10} {:.6e}", role.name(), norm);
    }
    if !grads.all_finite()? {
        println!("⚠️  유한하지 않은 그래디언트가 있습니다");
    }

    let jerks = model.jerks(&input)?;
    if let Some(first) = jerks.first() {
        println!("\n🔁 유지된 저크 (t = 4, 첫 샘플): {:?}", first.get(0)?.to_vec1::<f32>()?);
    }
    Ok(())
}

/// 각 좌표가 x0 + v0·t + a0·t²/2 + j·t³/6 를 따르는 합성 배치
fn constant_jerk_batch(config: &GrammarCellsConfig, batch: usize, seed: u64) -> Result<Tensor> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dt = 0.1f32;
    let mut data = Vec::with_capacity(batch * config.input_width());

    for _ in 0..batch {
        let coeffs: Vec<[f32; 4]> = (0..config.dimx)
            .map(|_| {
                [
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-0.2..0.2),
                ]
            })
            .collect();

        for t in 0..config.seq_len {
            let s = t as f32 * dt;
            for [x0, v0, a0, j] in &coeffs {
                data.push(x0 + v0 * s + a0 * s * s / 2.0 + j * s * s * s / 6.0);
            }
        }
    }

    Ok(Tensor::from_vec(data, (batch, config.input_width()), &Device::Cpu)?)
}
