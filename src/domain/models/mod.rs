pub mod address;
pub mod document;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use document::{
    CompilerProfile, ConfigDocument, NetworkId, NetworkProfile, OptimizerSettings, RpcEndpoint,
    MAX_GAS_LIMIT,
};
