#![deny(bare_trait_objects)]
#![no_std]

//! Transform and projection matrices for 3D graphics.
//!
//! # Crates
//!
//! This meta-crate (`tupmath`) reexports the following sub-crates for convenience:
//!
//! * **tupmath_tup** - Read and write access to small float tuples.
//! * **tupmath_matrix** - Column-major 4x4 matrices and the free functions behind them.
//!
//! Each `tupmath_<name>` crate is reexported as a `<name>` module in `tupmath`,
//! and the most common items are available at the root.
//!
//! ```
//! use tupmath::{Mat4F, Mat4R, Mat4W};
//!
//! let view = Mat4F::identity().translate3_n(0.0, 0.0, -5.0);
//! let proj = Mat4F::identity().set_perspective_deg_n(60.0, 16.0 / 9.0, 0.1, 100.0);
//! let mvp = proj * view;
//!
//! let clip = mvp.transform4(&[0.0f32, 0.0, 0.0, 1.0]);
//! let ndc_z = clip[2] / clip[3];
//! assert!(ndc_z > -1.0 && ndc_z < 1.0);
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled with the `serialization` feature
//! flag (disabled by default). The `std` feature is on by default. Without it
//! the crates are `no_std` and use `libm` for the transcendental functions.

pub extern crate tupmath_matrix;
pub extern crate tupmath_tup;

pub use tupmath_matrix as matrix;
pub use tupmath_tup as tup;

pub use matrix::euclid;
pub use matrix::{Cells, Mat4F, Mat4R, Mat4W, MatrixError};
pub use tup::{Tup2R, Tup2W, Tup3R, Tup3W, Tup4R, Tup4W};
