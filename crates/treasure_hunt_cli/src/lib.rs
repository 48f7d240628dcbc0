//! Treasure hunt terminal driver
//!
//! Parses commands, installs logging, and runs the line-oriented play loop
//! over a [`treasure_hunt::QuizSession`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod play;

pub use cli::{Cli, Command};
pub use play::{Command as PlayCommand, Finish, InputError, parse_command, run};
