use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Vectors shorter than this are left untouched by [`Vec3::normalize`].
pub const NORMALIZE_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scales to unit length in place. A vector of length <= 0.001 is left as
    /// is, so a degenerate normal never turns into NaN.
    pub fn normalize(&mut self) {
        let len = self.length();
        if len > NORMALIZE_EPSILON {
            self.x /= len;
            self.y /= len;
            self.z /= len;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product `self × other`.
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Arithmetic mean of `points`, or the origin for an empty input.
    pub fn mean<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;
        for p in points {
            sum = sum + *p;
            count += 1;
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        sum / count as f32
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, factor: f32) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, divisor: f32) -> Vec3 {
        Vec3::new(self.x / divisor, self.y / divisor, self.z / divisor)
    }
}

pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + t * (end - start)
}

/// Model orientation as three angles in radians.
///
/// `rotate` applies pitch (about X), then yaw (about Y), then roll (about Z).
/// Zero angles are skipped outright so an identity rotation is bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerRotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EulerRotation {
    pub const IDENTITY: EulerRotation = EulerRotation {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn from_degrees(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self::new(pitch.to_radians(), yaw.to_radians(), roll.to_radians())
    }

    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let v = rotate_x(v, self.pitch);
        let v = rotate_y(v, self.yaw);
        rotate_z(v, self.roll)
    }

    /// Undoes [`rotate`](Self::rotate): for any `n` and `l`,
    /// `rotate(n).dot(l) == n.dot(inverse_rotate(l))` up to rounding.
    pub fn inverse_rotate(&self, v: Vec3) -> Vec3 {
        let v = rotate_z(v, -self.roll);
        let v = rotate_y(v, -self.yaw);
        rotate_x(v, -self.pitch)
    }
}

fn rotate_x(v: Vec3, angle: f32) -> Vec3 {
    if angle == 0.0 {
        return v;
    }
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    if angle == 0.0 {
        return v;
    }
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

fn rotate_z(v: Vec3, angle: f32) -> Vec3 {
    if angle == 0.0 {
        return v;
    }
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}
