//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) and bot event layers and the data (repository) layer. Services are
//! responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating repository calls and Discord REST calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod admin;
pub mod audit;
pub mod auth;
pub mod bot;
pub mod custom_command;
pub mod embed;
pub mod guild;
pub mod invite;
pub mod panel;
pub mod stats;
pub mod steam;
pub mod sticky;
pub mod ticket;
pub mod vouch;
pub mod welcome;
