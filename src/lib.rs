
pub mod camera;
pub mod color;
pub mod hittable;
pub mod interval;
pub mod random;
pub mod ray;
pub mod shader;

use glam::DVec3;
use hittable::{HittableList, Sphere};

/// A small sphere resting on a very large one.
pub fn demo_world() -> HittableList {
    let mut world = HittableList::new();

    world.add(Sphere::new(DVec3::new(0., 0., -1.), 0.5));

    // ground
    world.add(Sphere::new(DVec3::new(0., -100.5, -1.), 100.));

    return world;
}
