pub mod bbox;
pub mod error;
pub mod halfspace;
pub mod interval;
pub mod numeric;
pub mod scene;
pub mod scenario;
pub mod writer;
pub mod json_structs;
pub mod json_parser;

pub mod prelude;
