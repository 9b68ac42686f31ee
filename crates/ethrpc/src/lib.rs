pub mod alloy;

pub use self::alloy::{errors, provider};

pub type AlloyProvider = ::alloy::providers::DynProvider;
