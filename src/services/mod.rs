pub mod accessor;
pub mod global;

pub use accessor::ConfigAccessor;
