pub mod assembler;
pub mod stack;
pub mod utils;

pub use assembler::{assemble, TreeAssembler};
pub use stack::LevelStack;
