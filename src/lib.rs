//! Creates recurring GitHub issues and discussions from template tickets.
pub mod classifier;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod guard;
pub mod repository;
pub mod result;
pub mod service;
pub mod template;
pub mod ticket;
