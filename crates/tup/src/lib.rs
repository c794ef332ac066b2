#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! Component access for small float tuples.
//!
//! The matrix engine never asks for a concrete vector type. It reads coordinates
//! through [`Tup2R`], [`Tup3R`] and [`Tup4R`] and writes results through
//! [`Tup2W`], [`Tup3W`] and [`Tup4W`]. Implementations are provided for
//! fixed-size arrays, plain scalar tuples and the matching `euclid` types, so
//! callers can hand in whatever they already store their coordinates in.
//!
//! This crate is reexported in [tupmath](https://docs.rs/tupmath/).
//!
//! ```
//! use tupmath_tup::{Tup3R, Tup3W};
//!
//! let mut dst = [0.0f32; 3];
//! dst.set3(1.0, 2.0, 3.0);
//! assert_eq!(dst.to_array3(), [1.0, 2.0, 3.0]);
//! assert_eq!((4.0f32, 5.0f32, 6.0f32).v2(), 6.0);
//! ```

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use euclid;

use euclid::{HomogeneousVector, Point2D, Point3D, Vector2D, Vector3D};

/// Read access to the first two components of a tuple.
pub trait Tup2R {
    fn v0(&self) -> f32;
    fn v1(&self) -> f32;

    #[inline]
    fn to_array2(&self) -> [f32; 2] {
        [self.v0(), self.v1()]
    }
}

/// Read access to the first three components of a tuple.
pub trait Tup3R: Tup2R {
    fn v2(&self) -> f32;

    #[inline]
    fn to_array3(&self) -> [f32; 3] {
        [self.v0(), self.v1(), self.v2()]
    }
}

/// Read access to all four components of a tuple.
pub trait Tup4R: Tup3R {
    fn v3(&self) -> f32;

    #[inline]
    fn to_array4(&self) -> [f32; 4] {
        [self.v0(), self.v1(), self.v2(), self.v3()]
    }
}

/// Write access to the first two components of a tuple.
pub trait Tup2W {
    fn set_v0(&mut self, v: f32);
    fn set_v1(&mut self, v: f32);

    #[inline]
    fn set2(&mut self, v0: f32, v1: f32) -> &mut Self {
        self.set_v0(v0);
        self.set_v1(v1);
        self
    }
}

/// Write access to the first three components of a tuple.
pub trait Tup3W: Tup2W {
    fn set_v2(&mut self, v: f32);

    #[inline]
    fn set3(&mut self, v0: f32, v1: f32, v2: f32) -> &mut Self {
        self.set_v0(v0);
        self.set_v1(v1);
        self.set_v2(v2);
        self
    }
}

/// Write access to all four components of a tuple.
pub trait Tup4W: Tup3W {
    fn set_v3(&mut self, v: f32);

    #[inline]
    fn set4(&mut self, v0: f32, v1: f32, v2: f32, v3: f32) -> &mut Self {
        self.set_v0(v0);
        self.set_v1(v1);
        self.set_v2(v2);
        self.set_v3(v3);
        self
    }
}

// Automatically implement the read traits for all references.
impl<'l, T: Tup2R + ?Sized> Tup2R for &'l T {
    #[inline]
    fn v0(&self) -> f32 {
        (*self).v0()
    }
    #[inline]
    fn v1(&self) -> f32 {
        (*self).v1()
    }
}

impl<'l, T: Tup3R + ?Sized> Tup3R for &'l T {
    #[inline]
    fn v2(&self) -> f32 {
        (*self).v2()
    }
}

impl<'l, T: Tup4R + ?Sized> Tup4R for &'l T {
    #[inline]
    fn v3(&self) -> f32 {
        (*self).v3()
    }
}

macro_rules! impl_tup2 {
    ([$($g:tt)*] $Tup:ty, ($($a0:tt)+), ($($a1:tt)+)) => {
        impl<$($g)*> Tup2R for $Tup {
            #[inline]
            fn v0(&self) -> f32 {
                self $($a0)+
            }
            #[inline]
            fn v1(&self) -> f32 {
                self $($a1)+
            }
        }

        impl<$($g)*> Tup2W for $Tup {
            #[inline]
            fn set_v0(&mut self, v: f32) {
                self $($a0)+ = v;
            }
            #[inline]
            fn set_v1(&mut self, v: f32) {
                self $($a1)+ = v;
            }
        }
    };
}

macro_rules! impl_tup3 {
    ([$($g:tt)*] $Tup:ty, ($($a0:tt)+), ($($a1:tt)+), ($($a2:tt)+)) => {
        impl_tup2!([$($g)*] $Tup, ($($a0)+), ($($a1)+));

        impl<$($g)*> Tup3R for $Tup {
            #[inline]
            fn v2(&self) -> f32 {
                self $($a2)+
            }
        }

        impl<$($g)*> Tup3W for $Tup {
            #[inline]
            fn set_v2(&mut self, v: f32) {
                self $($a2)+ = v;
            }
        }
    };
}

macro_rules! impl_tup4 {
    ([$($g:tt)*] $Tup:ty, ($($a0:tt)+), ($($a1:tt)+), ($($a2:tt)+), ($($a3:tt)+)) => {
        impl_tup3!([$($g)*] $Tup, ($($a0)+), ($($a1)+), ($($a2)+));

        impl<$($g)*> Tup4R for $Tup {
            #[inline]
            fn v3(&self) -> f32 {
                self $($a3)+
            }
        }

        impl<$($g)*> Tup4W for $Tup {
            #[inline]
            fn set_v3(&mut self, v: f32) {
                self $($a3)+ = v;
            }
        }
    };
}

impl_tup2!([] [f32; 2], ([0]), ([1]));
impl_tup3!([] [f32; 3], ([0]), ([1]), ([2]));
impl_tup4!([] [f32; 4], ([0]), ([1]), ([2]), ([3]));

impl_tup2!([] (f32, f32), (.0), (.1));
impl_tup3!([] (f32, f32, f32), (.0), (.1), (.2));
impl_tup4!([] (f32, f32, f32, f32), (.0), (.1), (.2), (.3));

impl_tup2!([U] Point2D<f32, U>, (.x), (.y));
impl_tup2!([U] Vector2D<f32, U>, (.x), (.y));
impl_tup3!([U] Point3D<f32, U>, (.x), (.y), (.z));
impl_tup3!([U] Vector3D<f32, U>, (.x), (.y), (.z));
impl_tup4!([U] HomogeneousVector<f32, U>, (.x), (.y), (.z), (.w));

#[test]
fn test_arrays_and_tuples() {
    let mut a = [0.0f32; 4];
    a.set4(1.0, 2.0, 3.0, 4.0);
    assert_eq!(a, [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(a.to_array3(), [1.0, 2.0, 3.0]);

    let mut t = (0.0f32, 0.0f32);
    t.set2(5.0, 6.0);
    assert_eq!(t.to_array2(), [5.0, 6.0]);
    assert_eq!((&t).v1(), 6.0);
}

#[test]
fn test_euclid_types() {
    use euclid::default::{Point3D, Vector2D};

    let p: Point3D<f32> = euclid::point3(1.0, 2.0, 3.0);
    assert_eq!(p.to_array3(), [1.0, 2.0, 3.0]);

    let mut v: Vector2D<f32> = euclid::vec2(0.0, 0.0);
    v.set2(7.0, 8.0);
    assert_eq!(v, euclid::vec2(7.0, 8.0));

    let mut h = HomogeneousVector::<f32, euclid::UnknownUnit>::new(0.0, 0.0, 0.0, 0.0);
    h.set4(1.0, 0.0, 0.0, 1.0);
    assert_eq!(h.to_array4(), [1.0, 0.0, 0.0, 1.0]);
}
