pub mod api;
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod utils;
mod serialization;

pub use api::{
    dump, from_reader, load, parse_text, parse_text_named, serialize_config, to_json, to_writer,
    to_yaml,
};
pub use ast::{Config, ElementType, Value};
pub use error::{ParseError, SclError, SerializeError, SyntaxError};
pub use parser::MAX_DEPTH;
pub use serializer::DEFAULT_INDENT;

/// Version of this crate, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
