pub mod design_system;
pub mod health;
pub mod search;

pub use design_system::*;
pub use health::*;
pub use search::*;
