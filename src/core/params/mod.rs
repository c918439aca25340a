pub mod roles;
pub mod store;


pub use roles::{InitScheme, ParamRole};
pub use store::ParameterStore;
