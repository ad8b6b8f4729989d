pub mod clinical;
pub mod compliance;

pub use clinical::*;
pub use compliance::*;
