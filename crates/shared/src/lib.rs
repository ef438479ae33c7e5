pub mod dispatch;
pub mod domain;
pub mod error;
pub mod payload;

pub use dispatch::{Discriminator, StrategyTable};
pub use error::{ApiError, ErrorCode, KitError, ValidationError};
