//! # 비용 / 그래디언트 조립

pub mod cost;
pub mod gradients;


pub use cost::{assemble_predictions, masked_mse};
pub use gradients::ParameterGradients;
