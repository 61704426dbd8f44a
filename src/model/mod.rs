//! Request and response DTOs for the dashboard API.
//!
//! Discord snowflakes are carried as strings since dashboard clients cannot
//! represent 64-bit integers losslessly.

pub mod api;
pub mod bot;
pub mod community;
pub mod embed;
pub mod guild;
pub mod panel;
pub mod ticket;
pub mod user;
