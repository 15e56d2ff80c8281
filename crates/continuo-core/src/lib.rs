pub mod catalog;
pub mod channel_state;
pub mod demux;
pub mod midnam;
pub mod plugin;
pub mod reload;

pub use catalog::*;
pub use channel_state::*;
pub use demux::*;
pub use midnam::*;
pub use plugin::*;
pub use reload::*;
