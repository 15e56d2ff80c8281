pub mod engine;
pub mod host;
pub mod midi;
pub mod settings;

pub use engine::*;
pub use host::*;
pub use midi::*;
pub use settings::*;
