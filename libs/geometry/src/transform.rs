//! Transformation types and traits.

use impl_trait_for_tuples::impl_for_tuples;
use serde::{Deserialize, Serialize};

use crate::error::{check_finite, Result};
use crate::point::Point;
use crate::wrap_angle;

/// A rigid transformation: rotation and/or reflection followed by a translation.
///
/// This object does not support scaling of geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The transformation matrix represented in row-major order.
    pub(crate) a: [[f64; 2]; 2],
    /// The x-y translation applied after the transformation.
    pub(crate) b: [f64; 2],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Returns `(sin, cos)` of an angle given in degrees.
///
/// Multiples of 90 degrees produce exact values, so Manhattan placements
/// never pick up floating point noise.
fn sin_cos_degrees(angle: f64) -> (f64, f64) {
    let wrapped = wrap_angle(angle);
    if wrapped == 0. {
        (0., 1.)
    } else if wrapped == 90. {
        (1., 0.)
    } else if wrapped == 180. {
        (0., -1.)
    } else if wrapped == 270. {
        (-1., 0.)
    } else {
        wrapped.to_radians().sin_cos()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub const fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }

    /// Returns a translation by `(x,y)`.
    pub const fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }

    /// Returns a counterclockwise rotation by `angle` degrees about the origin.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(angle);
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0., 0.],
        }
    }

    /// Returns a reflection about the x-axis.
    pub const fn reflect_vert() -> Self {
        Self {
            a: [[1., 0.], [0., -1.]],
            b: [0., 0.],
        }
    }

    /// Rotates by `angle` degrees about the origin, then translates by `(x, y)`.
    ///
    /// This is the placement applied to every shape and pin of a component.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let trans = Transformation::rotate_translate(90., 10., 0.);
    /// assert_eq!(Point::new(1., 0.).transform(trans), Point::new(10., 1.));
    /// ```
    pub fn rotate_translate(angle: f64, x: f64, y: f64) -> Self {
        Self::cascade(Self::translate(x, y), Self::rotate(angle))
    }

    /// Like [`Transformation::rotate_translate`], but rejects non-finite inputs.
    pub fn try_rotate_translate(angle: f64, x: f64, y: f64) -> Result<Self> {
        check_finite("orientation", angle)?;
        check_finite("pos_x", x)?;
        check_finite("pos_y", y)?;
        Ok(Self::rotate_translate(angle, x, y))
    }

    /// Returns a new [`TransformationBuilder`].
    #[inline]
    pub fn builder() -> TransformationBuilder {
        TransformationBuilder::default()
    }

    /// Creates a transform from only an offset.
    pub fn from_offset(offset: Point) -> Self {
        Self::translate(offset.x, offset.y)
    }

    /// Create a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// The child is applied first. Note this operation *is not* commutative:
    /// rotating by 90 degrees and then translating by `(1, 0)` lands the point
    /// `(1, 0)` at `(1, 1)`, whereas translating first lands it at `(0, 2)`.
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        // The result-transform's origin is the parent's origin,
        // plus the parent-transformed child's origin
        let mut b = matvec(&parent.a, &child.b);
        b[0] += parent.b[0];
        b[1] += parent.b[1];
        let a = matmul(&parent.a, &child.a);
        Self { a, b }
    }

    /// The point representing the translation of this transformation.
    pub fn offset_point(&self) -> Point {
        Point::new(self.b[0], self.b[1])
    }

    /// The counterclockwise rotation angle in degrees, in `[0, 360)`.
    ///
    /// For reflecting transformations this is the angle applied after the reflection.
    pub fn angle(&self) -> f64 {
        wrap_angle(self.a[1][0].atan2(self.a[0][0]).to_degrees())
    }

    /// Returns `true` if this transformation mirrors geometry.
    pub fn is_reflection(&self) -> bool {
        self.a[0][0] * self.a[1][1] - self.a[0][1] * self.a[1][0] < 0.
    }

    /// Returns the inverse [`Transformation`] of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geometry::transform::Transformation;
    /// use approx::assert_relative_eq;
    ///
    /// let trans = Transformation::rotate_translate(37., 5., 10.);
    /// let inv = trans.inv();
    ///
    /// assert_relative_eq!(Transformation::cascade(inv, trans), Transformation::identity());
    /// ```
    pub fn inv(&self) -> Transformation {
        let inv = unitary_matinv(&self.a);
        let invb = matvec(&inv, &self.b);
        Self {
            a: inv,
            b: [-invb[0], -invb[1]],
        }
    }

    /// Applies this transformation to a single point.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let [x, y] = matvec(&self.a, &[p.x, p.y]);
        Point::new(x + self.b[0], y + self.b[1])
    }
}

/// A builder for creating transformations from translations, rotations and reflections.
///
/// The reflection is applied first, then the rotation, then the translation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationBuilder {
    x: f64,
    y: f64,
    reflect_vert: bool,
    angle: f64,
}

impl TransformationBuilder {
    /// Specifies the x-y translation encoded by the transformation.
    pub fn point(&mut self, point: impl Into<Point>) -> &mut Self {
        let point = point.into();
        self.x = point.x;
        self.y = point.y;
        self
    }

    /// Specifies the angle of rotation encoded by this transformation.
    pub fn angle(&mut self, angle: f64) -> &mut Self {
        self.angle = angle;
        self
    }

    /// Specifies whether the transformation results in a vertical reflection.
    pub fn reflect_vert(&mut self, reflect_vert: bool) -> &mut Self {
        self.reflect_vert = reflect_vert;
        self
    }

    /// Builds a [`Transformation`] from the specified parameters.
    pub fn build(&mut self) -> Transformation {
        let mut inner = Transformation::rotate(self.angle);
        if self.reflect_vert {
            inner = Transformation::cascade(inner, Transformation::reflect_vert());
        }
        Transformation::cascade(Transformation::translate(self.x, self.y), inner)
    }
}

/// Multiples two 2x2 matrices, returning a new 2x2 matrix
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

/// Multiplies a 2x2 matrix by a 2-entry vector, returning a new 2-entry vector.
fn matvec(a: &[[f64; 2]; 2], b: &[f64; 2]) -> [f64; 2] {
    [
        a[0][0] * b[0] + a[0][1] * b[1],
        a[1][0] * b[0] + a[1][1] * b[1],
    ]
}

/// Finds the inverse of an orthogonal matrix.
///
/// Rotations and reflections have determinant +1 or -1, so the inverse is the adjugate
/// divided by the determinant.
fn unitary_matinv(a: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
    [
        [a[1][1] / det, -a[0][1] / det],
        [-a[1][0] / det, a[0][0] / det],
    ]
}

impl approx::AbsDiffEq for Transformation {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-12
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.a
            .iter()
            .flatten()
            .chain(self.b.iter())
            .zip(other.a.iter().flatten().chain(other.b.iter()))
            .all(|(x, y)| x.abs_diff_eq(y, epsilon))
    }
}

impl approx::RelativeEq for Transformation {
    fn default_max_relative() -> Self::Epsilon {
        1e-12
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.a
            .iter()
            .flatten()
            .chain(self.b.iter())
            .zip(other.a.iter().flatten().chain(other.b.iter()))
            .all(|(x, y)| x.relative_eq(y, epsilon, max_relative))
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
#[impl_for_tuples(32)]
pub trait TransformMut {
    /// Applies matrix-vector [`Transformation`] `trans`.
    fn transform_mut(&mut self, trans: Transformation);
}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for i in self.iter_mut() {
            i.transform_mut(trans);
        }
    }
}

impl<T: TransformMut, const N: usize> TransformMut for [T; N] {
    fn transform_mut(&mut self, trans: Transformation) {
        for i in self.iter_mut() {
            i.transform_mut(trans);
        }
    }
}

impl<T: TransformMut> TransformMut for Option<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        if let Some(inner) = self.as_mut() {
            inner.transform_mut(trans);
        }
    }
}

/// A trait for specifying how an object is changed by a [`Transformation`].
///
/// Takes in an owned copy of the shape and returns the transformed version.
pub trait Transform: TransformMut + Sized {
    /// Applies matrix-vector [`Transformation`] `trans`.
    ///
    /// Creates a new shape at a location equal to the transformation of the original.
    #[inline]
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

/// A trait for specifying how a shape is translated by a [`Point`].
#[impl_for_tuples(32)]
pub trait TranslateMut {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate_mut(&mut self, p: Point);
}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for i in self.iter_mut() {
            i.translate_mut(p);
        }
    }
}

impl<T: TranslateMut, const N: usize> TranslateMut for [T; N] {
    fn translate_mut(&mut self, p: Point) {
        for i in self.iter_mut() {
            i.translate_mut(p);
        }
    }
}

impl<T: TranslateMut> TranslateMut for Option<T> {
    fn translate_mut(&mut self, p: Point) {
        if let Some(inner) = self.as_mut() {
            inner.translate_mut(p);
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
///
/// Takes in an owned copy of the shape and returns the translated version.
pub trait Translate: TranslateMut + Sized {
    /// Translates the shape by a [`Point`] through mutation.
    ///
    /// Creates a new shape at a location equal to the translation of the original.
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}
