//! 2D vector helpers for fluid dynamics calculations.
//!
//! The core is three functions in [`library`]: [`dot`], [`magnitude`] and
//! [`angle_between`]. They accept arrays, slices, `Vec`s, pairs or
//! [`Vector2D`] values and validate them once on entry.
//!
//! ```
//! use dot_engine::{angle_between, dot, magnitude};
//!
//! assert_eq!(dot((1, 2), (3, 4)).unwrap(), 11.0);
//! assert_eq!(magnitude([3.0, 4.0]).unwrap(), 5.0);
//! assert!(angle_between((0, 0), (1, 0)).is_err());
//! ```
//!
//! [`monitor`] wraps the same functions with observer hooks for callers
//! that want a record of each operation.

pub mod config;
pub mod error;
pub mod library;
pub mod monitor;
pub mod vector;

pub use error::{MonitorError, Result, VectorError};
pub use library::{angle_between, dot, magnitude};
pub use vector::{AsVector2D, Vector2D};
