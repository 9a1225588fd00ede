//! Edgecount-Common: shared error handling.
//!
//! Every edgecount crate reports failures through [`Error`] and the
//! [`Result`] alias defined here.
//!
//! # Examples
//!
//! ```
//! use edgecount_common::{Error, Result};
//!
//! fn open() -> Result<()> {
//!     Err(Error::connection("refused"))
//! }
//!
//! assert!(open().is_err());
//! ```

pub mod error;

pub use error::{Error, Result};
