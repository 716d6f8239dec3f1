use glam::DVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        return Self { origin, direction };
    }

    pub fn at(&self, t: f64) -> DVec3 {
        return self.origin + t * self.direction;
    }
}
