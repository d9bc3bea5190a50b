mod chord;
mod generation_request;
mod generation_result;

pub use chord::*;
pub use generation_request::*;
pub use generation_result::*;
