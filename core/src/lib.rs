pub use chip8::Chip8;
pub use constants::CLOCK_SPEED;
pub use error::Error;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod operations;
pub mod state;
