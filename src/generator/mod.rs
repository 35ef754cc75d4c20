// src/generator/mod.rs

pub mod assembler;
pub mod normalize;
pub mod segment;
pub mod synth;
pub mod validate;

pub use assembler::{QuizAssembler, QuizConfig};
pub use normalize::normalize;
pub use segment::segment;
pub use validate::is_valid;
