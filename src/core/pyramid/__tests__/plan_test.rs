use crate::core::cells::Level;
use crate::core::error::GrammarError;
use crate::core::pyramid::{PlanStep, RolloutPlan, Slot, Stream};
use std::collections::HashSet;

#[test]
fn 짧은_시퀀스_계획_거부_테스트() {
    assert!(matches!(RolloutPlan::new(3), Err(GrammarError::InvalidConfig { .. })));
    assert!(RolloutPlan::new(4).is_ok());
}

#[test]
fn 부트스트랩_단계_구성_테스트() {
    let plan = RolloutPlan::new(4).unwrap();
    let steps = plan.steps();

    // 관측 복사 4 + 추론 6, 자기회귀 없음
    assert_eq!(steps.len(), 10);
    assert_eq!(plan.rollout_len(), 0);

    let infers: Vec<_> = steps
        .iter()
        .filter_map(|s| match *s {
            PlanStep::Infer { level, out, .. } => Some((level, out)),
            _ => None,
        })
        .collect();
    assert_eq!(
        infers,
        vec![
            (Level::Velocity, Slot::new(Stream::Velocity, 1)),
            (Level::Velocity, Slot::new(Stream::Velocity, 2)),
            (Level::Velocity, Slot::new(Stream::Velocity, 3)),
            (Level::Acceleration, Slot::new(Stream::Acceleration, 2)),
            (Level::Acceleration, Slot::new(Stream::Acceleration, 3)),
            (Level::Jerk, Slot::new(Stream::Jerk, 3)),
        ]
    );

    assert_eq!(
        steps[4],
        PlanStep::Infer {
            level: Level::Velocity,
            left: Slot::new(Stream::Frame, 0),
            right: Slot::new(Stream::Frame, 1),
            out: Slot::new(Stream::Velocity, 1),
        }
    );
}

#[test]
fn 자기회귀_단계_순서_테스트() {
    let plan = RolloutPlan::new(6).unwrap();
    let steps = plan.steps();
    assert_eq!(steps.len(), 10 + 4 * 2);

    // t = 4: 저크 유지 -> 가속도 -> 속도 -> 관측
    assert_eq!(
        &steps[10..14],
        &[
            PlanStep::Copy {
                from: Slot::new(Stream::Jerk, 3),
                to: Slot::new(Stream::Jerk, 4),
            },
            PlanStep::Predict {
                level: Level::Jerk,
                known: Slot::new(Stream::Acceleration, 3),
                relation: Slot::new(Stream::Jerk, 4),
                out: Slot::new(Stream::Acceleration, 4),
            },
            PlanStep::Predict {
                level: Level::Acceleration,
                known: Slot::new(Stream::Velocity, 3),
                relation: Slot::new(Stream::Acceleration, 4),
                out: Slot::new(Stream::Velocity, 4),
            },
            PlanStep::Predict {
                level: Level::Velocity,
                known: Slot::new(Stream::Recon, 3),
                relation: Slot::new(Stream::Velocity, 4),
                out: Slot::new(Stream::Recon, 4),
            },
        ]
    );
}

#[test]
fn 정의된_슬롯만_읽고_한번만_쓰기_테스트() {
    let plan = RolloutPlan::new(12).unwrap();
    let mut defined: HashSet<Slot> = (0..12).map(|t| Slot::new(Stream::Frame, t)).collect();

    for step in plan.steps() {
        for input in step.inputs() {
            assert!(defined.contains(&input), "{:?} reads undefined {:?}", step, input);
        }
        assert!(defined.insert(step.output()), "{:?} writes twice", step);
    }

    // 각 스트림은 워밍업 지점부터 끝까지 정의됨
    for stream in Stream::ALL {
        for t in 0..12 {
            let expected = t >= stream.warm_up();
            assert_eq!(defined.contains(&Slot::new(stream, t)), expected, "{}[{}]", stream, t);
        }
    }
}
