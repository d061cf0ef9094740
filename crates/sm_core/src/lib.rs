pub mod board;
pub mod cache;
pub mod error;
pub mod import_export;
pub mod instrument;
pub mod learned;
pub mod list;
pub mod materialize;
pub mod model;
pub mod scroll;
pub mod search;
pub mod virtual_list;

pub use error::{MappingError, Result};
pub use list::{ListFrame, ListWidth, VirtualList, VirtualListOptions};
pub use virtual_list::{compute_visible_range, VisibleRange};
