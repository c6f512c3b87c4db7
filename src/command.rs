//! Command execution for issue-creator.
//!
//! - **create**: render a template and create the resulting issue or
//!   discussion, optionally closing the previous one
//! - **render**: render a template and print the result without writing
//!
//! Both commands build the same [`crate::service::IssueService`] through
//! [`common::build_service`] and differ only in the operation they call.

/// Service construction shared by all commands.
pub mod common;

/// The `create` command.
pub mod create;

/// The `render` command.
pub mod render;
