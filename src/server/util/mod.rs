pub mod color;
pub mod crypto;
pub mod jwt;
pub mod locale;
pub mod parse;
pub mod placeholder;
pub mod transcript;
