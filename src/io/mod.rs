//! Terminal input and data encoding helpers.

pub mod encoding;

mod scanner;
pub use scanner::Scanner;
