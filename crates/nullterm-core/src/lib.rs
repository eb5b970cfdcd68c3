pub mod actions;
pub mod config;
pub mod content;
pub mod error;
pub mod interpreter;
pub mod markup;
pub mod reducer;
pub mod render;
pub mod state;
pub mod transcript;

pub use actions::*;
pub use reducer::*;
pub use state::*;

pub use content::ContentStore;
pub use content::FileNode;
pub use error::ConfigError;
pub use error::ContentError;
pub use transcript::Transcript;
