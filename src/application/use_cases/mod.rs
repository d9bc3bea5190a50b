mod generate_progression;

pub use generate_progression::*;
