pub mod error;
pub mod handle;
pub mod local;
pub mod types;

pub use error::SandboxError;
pub use handle::{Sandbox, SpawnedProcess};
pub use local::LocalSandbox;
pub use types::{FileTree, ProcessEvent, SandboxConfig, TreeNode};
