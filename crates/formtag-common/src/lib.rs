pub mod error;
pub mod suggestion;
pub mod tag;
pub mod value;

pub use error::*;
pub use suggestion::*;
pub use tag::*;
pub use value::*;
