#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![no_std]

//! Column-major 4x4 single precision matrices for transform and projection math.
//!
//! This crate is reexported in [tupmath](https://docs.rs/tupmath/).
//!
//! # Overview.
//!
//! The work is split in three layers:
//!
//! - [`utils4`] and [`mat2`] are free functions over raw cell arrays. They
//!   allocate nothing and never panic on numeric input.
//! - [`Mat4R`] and [`Mat4W`] are the read and write contracts of a matrix. Any
//!   type able to lend its 16 cells gets the whole API, `[f32; 16]` included.
//! - [`Mat4F`] is the value type most code will want to use.
//!
//! # Conventions
//!
//! Vectors are columns and are multiplied on the right: `p' = M * p`. Cell
//! `(row, col)` is stored at `col * 4 + row`. Compositions such as
//! [`Mat4W::translate3`] right-multiply, so the last appended transform is the
//! first one applied to a point. Rotations are right-handed.
//!
//! Vector arguments are read through the [`tupmath_tup`] traits, which means
//! arrays, tuples and `euclid` types can be passed directly.
//!
//! ```
//! use tupmath_matrix::{Mat4F, Mat4R, Mat4W};
//!
//! let mut m = Mat4F::identity();
//! m.translate3(10.0, 0.0, 0.0).rotate_deg(0.0, 0.0, 1.0, 90.0);
//!
//! let p = m.transform_point3(&[1.0f32, 0.0, 0.0]);
//! assert!((p[0] - 10.0).abs() < 1e-5);
//! assert!((p[1] - 1.0).abs() < 1e-5);
//! ```

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use euclid;
pub use tupmath_tup;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod mat4;
pub mod mat2;
pub mod scalar;
pub mod traits;
pub mod utils4;

#[cfg(test)]
mod mat4_tests;

#[doc(inline)]
pub use crate::error::MatrixError;
#[doc(inline)]
pub use crate::mat4::Mat4F;
#[doc(inline)]
pub use crate::traits::{Mat4R, Mat4W};
pub use crate::utils4::Cells;
