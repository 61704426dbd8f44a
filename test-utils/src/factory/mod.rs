//! Factory methods for creating test data.
//!
//! Each entity has a factory module with a `create_*` convenience function for
//! default creation, and a `Factory` builder where tests need custom values.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let (user, bot, guild) = factory::helpers::create_guild_with_dependencies(&db).await?;
//! let ticket = factory::ticket::TicketFactory::new(&db, bot.id, &guild.id)
//!     .closed()
//!     .build()
//!     .await?;
//! ```

pub mod bot;
pub mod community;
pub mod guild;
pub mod helpers;
pub mod panel;
pub mod ticket;
pub mod user;

pub use bot::create_bot;
pub use guild::create_guild;
pub use panel::{create_option, create_panel, create_question};
pub use ticket::create_ticket;
pub use user::{create_admin, create_user};
