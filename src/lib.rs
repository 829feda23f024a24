// Crate root: declare modules and control visibility
pub mod config;
pub mod error;
pub mod host;
pub mod immediate;
pub mod logging;
pub mod plugin;
pub mod report;
pub mod search;
pub mod token;
pub mod view;

// Re-export commonly used API from the library for binaries/tests
pub use error::{Error, Result};
pub use immediate::parse_immediate;
pub use plugin::{register_commands, Command, CommandRegistry, SearchImmediate};
pub use report::{render_html, SearchReport};
pub use search::{lookup_for_immediate, MatchPolicy, SearchResult};
pub use token::{tokens_to_string, InstructionTextToken, TokenKind};
pub use view::{BinaryView, Function, Instruction, Interaction};
