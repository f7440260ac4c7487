//! Coordinate storage.
//!
//! Positions live in one contiguous buffer of `2 * n` doubles: row 0 holds every x, row 1 every y.
//! This is the layout numeric front-ends expect for a `2 x n` matrix, so [`Coordinates::as_slice`]
//! can be handed over without reshaping.

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    len: usize,
    data: Vec<f64>,
}

impl Coordinates {
    pub(crate) fn zeros(len: usize) -> Self {
        Self {
            len,
            data: vec![0.0; len * 2],
        }
    }

    /// Builds a store from caller-owned rows. Returns `None` when the rows differ in length.
    pub fn from_rows(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() {
            return None;
        }
        let mut data = Vec::with_capacity(xs.len() * 2);
        data.extend_from_slice(xs);
        data.extend_from_slice(ys);
        Some(Self {
            len: xs.len(),
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn xs(&self) -> &[f64] {
        &self.data[..self.len]
    }

    pub fn ys(&self) -> &[f64] {
        &self.data[self.len..]
    }

    pub fn rows(&self) -> [&[f64]; 2] {
        [self.xs(), self.ys()]
    }

    pub(crate) fn rows_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        self.data.split_at_mut(self.len)
    }

    pub fn x(&self, v: usize) -> f64 {
        self.data[v]
    }

    pub fn y(&self, v: usize) -> f64 {
        self.data[self.len + v]
    }

    pub fn point(&self, v: usize) -> (f64, f64) {
        (self.x(v), self.y(v))
    }

    pub(crate) fn set(&mut self, v: usize, x: f64, y: f64) {
        self.data[v] = x;
        self.data[self.len + v] = y;
    }

    /// The full `2 x n` buffer, x row first.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Index of the first vertex with a NaN or infinite coordinate.
    pub fn first_non_finite(&self) -> Option<usize> {
        (0..self.len).find(|&v| !(self.x(v).is_finite() && self.y(v).is_finite()))
    }

    /// Overwrites `self` with `other` without reallocating. Both stores must have the same length.
    pub(crate) fn copy_from(&mut self, other: &Coordinates) {
        debug_assert_eq!(self.len, other.len);
        self.data.copy_from_slice(&other.data);
    }
}

/// Per-iteration displacement scratch, parallel to [`Coordinates`].
#[derive(Debug, Clone)]
pub(crate) struct Displacement {
    pub(crate) dx: Vec<f64>,
    pub(crate) dy: Vec<f64>,
}

impl Displacement {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            dx: vec![0.0; len],
            dy: vec![0.0; len],
        }
    }

    pub(crate) fn clear(&mut self) {
        self.dx.fill(0.0);
        self.dy.fill(0.0);
    }

    /// Pushes `a` by `(fx, fy)` and `b` by the opposite amount.
    pub(crate) fn push_apart(&mut self, a: usize, b: usize, fx: f64, fy: f64) {
        self.dx[a] += fx;
        self.dy[a] += fy;
        self.dx[b] -= fx;
        self.dy[b] -= fy;
    }
}
