//! Assorted imports for modules declaring message schemas
//!
//! ```
//! use binform::prelude::*;
//!
//! bin_enum! {
//!     pub enum Mode { Read, Write }
//! }
//!
//! #[derive(Record, Debug, PartialEq)]
//! pub struct Request {
//!     mode: Mode,
//!     path: String,
//! }
//!
//! let req = Struct::<Request>::new();
//! let val = Request { mode: Mode::Write, path: "/".into() };
//! assert_eq!(req.decode(req.to_bytes(&val)).unwrap(), val);
//! ```

pub use crate::core::{BinType, Static};
pub use crate::native::Native;
pub use crate::retype::Retypeable;
pub use crate::sink::Sink;
pub use crate::types::*;
pub use crate::{bin_alias, bin_enum, bin_union, lazy_static, Record};
