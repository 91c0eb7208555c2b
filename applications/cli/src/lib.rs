/// Roster - terminal front end for a remote users collection
pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
