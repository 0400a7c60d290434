//! Command module structure for the vstrap CLI

pub mod info;
pub mod init;
pub mod requirements;
pub mod util;

pub use info::InfoCommand;
pub use init::InitCommand;
pub use requirements::RequirementsCommand;
pub use util::{CompletionCommand, ManCommand, VersionCommand};
