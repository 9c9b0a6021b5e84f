//! 2-D geometry primitives: world vectors, walkable quads, circular no-go zones.

/// A 2-D position or displacement in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal world coordinate.
    pub x: f32,
    /// Vertical world coordinate.
    pub y: f32,
}

impl Vec2 {
    /// Create a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Use this wherever only the *ordering* of distances matters — it avoids
    /// the square root of [`dist`](Self::dist).
    pub fn sq_dist(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Exact Euclidean distance to `other`.
    pub fn dist(self, other: Vec2) -> f32 {
        self.sq_dist(other).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A convex walkable quadrilateral on a single vertical layer.
///
/// Trapezoids answer exactly one question: which layer does a world position
/// belong to. Vertices keep the winding delivered by the off-line
/// decomposition pipeline; the containment test accepts either winding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoid {
    /// Identifier assigned by the off-line pipeline.
    pub id: i32,
    /// Vertical layer this quad lies on (0 = ground).
    pub layer: i32,
    /// The four corners, in pipeline winding order.
    pub vertices: [Vec2; 4],
}

impl Trapezoid {
    /// Whether `p` lies inside the quad, edges inclusive.
    ///
    /// Computes the cross product of each of the four directed edges with the
    /// vector to `p`; the point is inside iff the signs do not mix. A zero
    /// cross product (point exactly on an edge) counts as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        let mut has_pos = false;
        let mut has_neg = false;
        for i in 0..4 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 4];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            if cross > 0.0 {
                has_pos = true;
            }
            if cross < 0.0 {
                has_neg = true;
            }
        }
        !(has_pos && has_neg)
    }
}

/// A circular no-go area supplied per query.
///
/// The squared radius is precomputed once so per-point containment checks
/// stay square-root free.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleZone {
    /// Center of the zone.
    pub center: Vec2,
    /// Radius of the zone in world units.
    pub radius: f32,
    /// `radius * radius`, cached for containment tests.
    pub radius_sq: f32,
}

impl ObstacleZone {
    /// Create a zone, caching the squared radius.
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            radius_sq: radius * radius,
        }
    }

    /// Whether `p` lies inside the zone, boundary inclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.sq_dist(p) <= self.radius_sq
    }
}

/// Whether any zone in `obstacles` contains `p`.
pub fn any_zone_contains(obstacles: &[ObstacleZone], p: Vec2) -> bool {
    obstacles.iter().any(|zone| zone.contains(p))
}
