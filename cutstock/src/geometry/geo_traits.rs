/// Trait for types that can detect collisions between `Self` and `T`.
///
/// Collision means the interiors intersect: entities that only share a boundary do not collide.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can detect 'almost-collisions' between `Self` and `T`.
///
/// Coordinates produced by summing floating point dimensions can be off by a few ulps.
/// Unlike [`CollidesWith`], this trait only reports a collision when the overlap is
/// larger than that tolerance, so entities which (almost) touch are not colliding.
pub trait AlmostCollidesWith<T> {
    fn almost_collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can check whether `T` lies entirely within `Self` (boundary included).
pub trait Encloses<T> {
    fn encloses(&self, other: &T) -> bool;
}

/// Tolerant version of [`Encloses`], see [`AlmostCollidesWith`].
pub trait AlmostEncloses<T> {
    fn almost_encloses(&self, other: &T) -> bool;
}
