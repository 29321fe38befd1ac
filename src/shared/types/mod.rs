pub mod errors;
pub mod money;
pub mod time;

pub use errors::*;
pub use money::*;
pub use time::*;
