//! Ticketdesk Test Utils
//!
//! Shared testing utilities for the ticketdesk server. Provides a builder for test
//! contexts backed by in-memory SQLite databases, plus entity factories with sensible
//! defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn opens_ticket() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_ticket_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (user, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
