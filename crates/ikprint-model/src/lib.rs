pub mod code;
pub mod error;
pub mod layout;

pub use code::{Code, CodeList};
pub use error::{CapacityError, ModelError};
pub use layout::{
    Capacity, DEFAULT_COLUMN_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_ROW_LENGTH,
    DEFAULT_VERTICAL_OFFSET, Layout,
};
