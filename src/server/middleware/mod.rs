//! Request authentication for the dashboard API.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
