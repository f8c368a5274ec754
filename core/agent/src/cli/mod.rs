mod args;

pub use args::{help_text, parse_args};
