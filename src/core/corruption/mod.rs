pub mod corruptor;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

pub use corruptor::{CorruptionLevel, Corruptor};
