pub mod error;
pub mod ids;
pub mod page;

pub use error::{ModelError, Result};
pub use ids::PageId;
pub use page::{DisplayType, PageEntry};
