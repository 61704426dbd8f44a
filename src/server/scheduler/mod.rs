//! Cron jobs.

pub mod auto_close;
