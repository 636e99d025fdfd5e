mod snapshot;
mod manifest;
mod export;
mod project;

pub use snapshot::*;
pub use manifest::*;
pub use export::*;
pub use project::*;
