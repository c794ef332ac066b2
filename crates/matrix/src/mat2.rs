//! 2x2 helpers over column-major `[f32; 4]` cells.
//!
//! Cell `(row, col)` lives at `col * 2 + row`.

use crate::scalar;

pub type Cells2 = [f32; 4];

#[inline]
pub const fn index(row: usize, col: usize) -> usize {
    col * 2 + row
}

#[inline]
pub fn identity() -> Cells2 {
    [1.0, 0.0, 0.0, 1.0]
}

/// Panics if `row` or `col` is not in `0..2`.
#[inline]
pub fn at(m: &Cells2, row: usize, col: usize) -> f32 {
    assert!(row < 2 && col < 2, "cell ({}, {}) is out of range", row, col);
    m[index(row, col)]
}

#[inline]
pub fn row(m: &Cells2, i: usize) -> [f32; 2] {
    assert!(i < 2, "row {} is out of range", i);
    [m[index(i, 0)], m[index(i, 1)]]
}

#[inline]
pub fn col(m: &Cells2, i: usize) -> [f32; 2] {
    assert!(i < 2, "column {} is out of range", i);
    [m[index(0, i)], m[index(1, i)]]
}

#[inline]
pub fn det(m: &Cells2) -> f32 {
    scalar::det2(m[0], m[2], m[1], m[3])
}

#[test]
fn test_addressing() {
    // | 1 3 |
    // | 2 4 |
    let m = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(at(&m, 0, 1), 3.0);
    assert_eq!(at(&m, 1, 0), 2.0);
    assert_eq!(row(&m, 0), [1.0, 3.0]);
    assert_eq!(col(&m, 1), [3.0, 4.0]);
    assert_eq!(det(&m), -2.0);
    assert_eq!(det(&identity()), 1.0);
}

#[test]
#[should_panic]
fn test_out_of_range() {
    let m = identity();
    let _ = col(&m, 2);
}

#[test]
#[should_panic(expected = "cell (2, 0) is out of range")]
fn test_at_out_of_range() {
    // Would alias cell (0, 1) without the check.
    let m = [1.0, 2.0, 3.0, 4.0];
    let _ = at(&m, 2, 0);
}

#[test]
#[should_panic(expected = "row 2 is out of range")]
fn test_row_out_of_range() {
    let m = identity();
    let _ = row(&m, 2);
}
