#![no_std]

pub mod error;
pub mod types;
pub mod direction;
pub mod validate;
pub mod engine;

pub use error::SwapError;
pub use types::{SwapKind, SwapMode, SwapOutcome, SwapRequest, SwapState};
pub use direction::SwapDirection;
pub use validate::{resolve_direction, resolve_price_limit};
pub use engine::compute_swap;

// Re-export so callers need not depend on the tick package for this
pub use tidal_tick::Direction;
