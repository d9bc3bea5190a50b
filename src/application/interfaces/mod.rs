mod progression_generator;

pub use progression_generator::*;
