//! # 롤아웃 계획
//!
//! 시퀀스 길이만으로 결정되는 미분 피라미드 구성 단계 목록.
//! 생성 시 한 번 만들어지고 매 평가마다 같은 순서로 해석된다.
//!
//! 부트스트랩 (t = 0..3):
//! - `recons[t] = xs[t]`
//! - `vels[1..=3] = infer(xs[t-1], xs[t], 1)`
//! - `accs[2..=3] = infer(vels[t-1], vels[t], 2)`
//! - `jerks[3] = infer(accs[2], accs[3], 3)`
//!
//! 자기회귀 구간 (t = 4..T-1):
//! - `jerks[t] = jerks[t-1]`
//! - `accs[t] = predict(accs[t-1], jerks[t], 3)`
//! - `vels[t] = predict(vels[t-1], accs[t], 2)`
//! - `recons[t] = predict(recons[t-1], vels[t], 1)`

use crate::core::cells::Level;
use crate::core::config::BOOTSTRAP_FRAMES;
use crate::core::error::{GrammarError, GrammarResult};
use std::fmt;

/// 피라미드의 시계열 스트림
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// 손상된 관측 프레임
    Frame,
    /// 복원/예측된 관측 프레임
    Recon,
    Velocity,
    Acceleration,
    Jerk,
}

impl Stream {
    pub const ALL: [Stream; 5] = [
        Stream::Frame,
        Stream::Recon,
        Stream::Velocity,
        Stream::Acceleration,
        Stream::Jerk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stream::Frame => "xs",
            Stream::Recon => "recons",
            Stream::Velocity => "vels",
            Stream::Acceleration => "accs",
            Stream::Jerk => "jerks",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 처음으로 정의되는 시간 인덱스
    pub fn warm_up(self) -> usize {
        match self {
            Stream::Frame | Stream::Recon => 0,
            Stream::Velocity => 1,
            Stream::Acceleration => 2,
            Stream::Jerk => 3,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 스트림의 한 시간 슬롯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub stream: Stream,
    pub step: usize,
}

impl Slot {
    pub const fn new(stream: Stream, step: usize) -> Self {
        Self { stream, step }
    }
}

/// 계획의 한 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStep {
    /// 값 복사 (부트스트랩 관측, 저크 유지)
    Copy { from: Slot, to: Slot },
    /// 두 슬롯에서 매핑 유닛 추론
    Infer { level: Level, left: Slot, right: Slot, out: Slot },
    /// 이전 값과 상위 매핑 유닛으로 다음 값 예측 (오른쪽 방향)
    Predict { level: Level, known: Slot, relation: Slot, out: Slot },
}

impl PlanStep {
    /// 이 단계가 채우는 슬롯
    pub fn output(&self) -> Slot {
        match *self {
            PlanStep::Copy { to, .. } => to,
            PlanStep::Infer { out, .. } | PlanStep::Predict { out, .. } => out,
        }
    }

    /// 이 단계가 읽는 슬롯들
    pub fn inputs(&self) -> [Slot; 2] {
        match *self {
            PlanStep::Copy { from, .. } => [from, from],
            PlanStep::Infer { left, right, .. } => [left, right],
            PlanStep::Predict { known, relation, .. } => [known, relation],
        }
    }
}

/// 시퀀스 길이별 고정 롤아웃 계획
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutPlan {
    seq_len: usize,
    steps: Vec<PlanStep>,
}

impl RolloutPlan {
    pub fn new(seq_len: usize) -> GrammarResult<Self> {
        if seq_len < BOOTSTRAP_FRAMES {
            return Err(GrammarError::invalid_config(format!(
                "rollout needs at least {} frames, got {}",
                BOOTSTRAP_FRAMES, seq_len
            )));
        }

        let mut steps = Vec::with_capacity(BOOTSTRAP_FRAMES + 6 + 4 * (seq_len - BOOTSTRAP_FRAMES));

        for t in 0..BOOTSTRAP_FRAMES {
            steps.push(PlanStep::Copy {
                from: Slot::new(Stream::Frame, t),
                to: Slot::new(Stream::Recon, t),
            });
        }

        // 인접 쌍마다 한 번씩, 레벨을 올라가며 추론
        let ladder = [
            (Level::Velocity, Stream::Frame, Stream::Velocity),
            (Level::Acceleration, Stream::Velocity, Stream::Acceleration),
            (Level::Jerk, Stream::Acceleration, Stream::Jerk),
        ];
        for (level, source, target) in ladder {
            for t in target.warm_up()..BOOTSTRAP_FRAMES {
                steps.push(PlanStep::Infer {
                    level,
                    left: Slot::new(source, t - 1),
                    right: Slot::new(source, t),
                    out: Slot::new(target, t),
                });
            }
        }

        for t in BOOTSTRAP_FRAMES..seq_len {
            steps.push(PlanStep::Copy {
                from: Slot::new(Stream::Jerk, t - 1),
                to: Slot::new(Stream::Jerk, t),
            });
            let cascade = [
                (Level::Jerk, Stream::Acceleration, Stream::Jerk),
                (Level::Acceleration, Stream::Velocity, Stream::Acceleration),
                (Level::Velocity, Stream::Recon, Stream::Velocity),
            ];
            for (level, stream, relation) in cascade {
                steps.push(PlanStep::Predict {
                    level,
                    known: Slot::new(stream, t - 1),
                    relation: Slot::new(relation, t),
                    out: Slot::new(stream, t),
                });
            }
        }

        Ok(Self { seq_len, steps })
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// 자기회귀 예측 단계 수
    pub fn rollout_len(&self) -> usize {
        self.seq_len - BOOTSTRAP_FRAMES
    }
}
