//! # 미분 트랙
//!
//! 시간 인덱스별 선택적 슬롯. 워밍업 이전 슬롯은 `None` 이며 읽으면 에러가 난다.

use super::plan::{Slot, Stream};
use crate::core::error::{GrammarError, GrammarResult};
use candle_core::Tensor;

/// 한 스트림의 시간축 슬롯 배열
#[derive(Debug, Clone)]
pub struct DerivativeTrack {
    stream: Stream,
    slots: Vec<Option<Tensor>>,
}

impl DerivativeTrack {
    pub fn new(stream: Stream, len: usize) -> Self {
        Self {
            stream,
            slots: vec![None; len],
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_defined(&self, step: usize) -> bool {
        matches!(self.slots.get(step), Some(Some(_)))
    }

    /// 정의된 슬롯 읽기
    pub fn get(&self, step: usize) -> GrammarResult<&Tensor> {
        self.slots
            .get(step)
            .and_then(Option::as_ref)
            .ok_or(GrammarError::UndefinedSlot {
                stream: self.stream.name(),
                step,
            })
    }

    /// 슬롯 한 번 쓰기
    pub fn set(&mut self, step: usize, value: Tensor) -> GrammarResult<()> {
        let stream = self.stream.name();
        let slot = self
            .slots
            .get_mut(step)
            .ok_or(GrammarError::UndefinedSlot { stream, step })?;
        if slot.is_some() {
            return Err(GrammarError::SlotOverwrite { stream, step });
        }
        *slot = Some(value);
        Ok(())
    }

    /// `from` 이후 구간의 텐서들 (모두 정의되어 있어야 함)
    pub fn range_from(&self, from: usize) -> GrammarResult<Vec<Tensor>> {
        (from..self.len()).map(|t| self.get(t).cloned()).collect()
    }
}

/// 한 번의 평가에서 만들어지는 전체 피라미드
#[derive(Debug, Clone)]
pub struct PyramidState {
    tracks: Vec<DerivativeTrack>,
}

impl PyramidState {
    pub fn new(seq_len: usize) -> Self {
        Self {
            tracks: Stream::ALL
                .iter()
                .map(|&s| DerivativeTrack::new(s, seq_len))
                .collect(),
        }
    }

    pub fn seq_len(&self) -> usize {
        self.tracks[0].len()
    }

    pub fn track(&self, stream: Stream) -> &DerivativeTrack {
        &self.tracks[stream.index()]
    }

    pub fn read(&self, slot: Slot) -> GrammarResult<&Tensor> {
        self.track(slot.stream).get(slot.step)
    }

    pub fn write(&mut self, slot: Slot, value: Tensor) -> GrammarResult<()> {
        self.tracks[slot.stream.index()].set(slot.step, value)
    }

    pub fn frames(&self) -> &DerivativeTrack {
        self.track(Stream::Frame)
    }

    pub fn recons(&self) -> &DerivativeTrack {
        self.track(Stream::Recon)
    }

    pub fn vels(&self) -> &DerivativeTrack {
        self.track(Stream::Velocity)
    }

    pub fn accs(&self) -> &DerivativeTrack {
        self.track(Stream::Acceleration)
    }

    pub fn jerks(&self) -> &DerivativeTrack {
        self.track(Stream::Jerk)
    }
}
