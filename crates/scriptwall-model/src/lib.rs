pub mod paginate;
pub mod progress;
pub mod screenplay;
pub mod store;

pub use paginate::*;
pub use progress::*;
pub use screenplay::*;
pub use store::*;
