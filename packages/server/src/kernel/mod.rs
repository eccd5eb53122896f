//! Kernel module - server infrastructure and dependencies.

pub mod bootstrap;
pub mod deps;
pub mod renderer;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use renderer::HtmlDocumentRenderer;
pub use storage::LocalFileStore;
pub use test_dependencies::{FailingRenderer, MemoryFileStore, NoopRenderer};
pub use traits::{BaseDocumentRenderer, BaseFileStore};
