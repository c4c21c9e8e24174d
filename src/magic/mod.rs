//! Magic commands
//!
//! The AI-assisted editing path: a free-text instruction goes to the
//! external command interpreter, which returns a structured payload;
//! this module merges that payload into the scene document in one
//! atomic, history-recorded step.

mod command;
mod ingest;

pub use command::{
    CommandInterpreter, ComponentSpec, InterpreterError, LegacyScript, LegacySpawn, MagicCommand,
    MagicError, MagicOutcome, SpawnSpec,
};
pub use ingest::ingest_command;
