use std::fmt;
use std::ops;

/// Simple (x, y) coordinate / vector
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Pos2 {
    /// Position on the x-axis.
    pub x: f64,
    /// Position on the y-axis.
    pub y: f64,
}

impl Pos2 {
    /// Return the null vector.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Return a position with both coordinates on the given value.
    #[inline]
    pub fn new(value: f64) -> Self {
        Self { x: value, y: value }
    }

    /// Return the position's length.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Return the distance to another position.
    #[inline]
    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).length()
    }
}

impl ops::Sub<Pos2> for Pos2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl ops::Mul<f64> for Pos2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl fmt::Display for Pos2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Debug for Pos2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Pos2;

    #[test]
    fn arithmetic() {
        let a = Pos2 { x: 4.0, y: 6.0 };
        let b = Pos2 { x: 1.0, y: 2.0 };

        assert_eq!(a - b, Pos2 { x: 3.0, y: 4.0 });
        assert_eq!(b * 2.5, Pos2 { x: 2.5, y: 5.0 });
        assert!(((a - b).length() - 5.0).abs() < f64::EPSILON);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!(Pos2::zero().length().abs() < f64::EPSILON);
        assert_eq!(Pos2::new(3.0), Pos2 { x: 3.0, y: 3.0 });
        assert_eq!(format!("{}", b), "(1, 2)");
    }
}
