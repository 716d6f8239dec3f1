use crate::color::Color;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::random::{random_on_hemisphere, random_unit_vector, SampleRng};
use crate::ray::Ray;
use std::fmt::Debug;
use std::sync::Arc;

pub struct Scattered {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Decides where light goes after a ray strikes a surface.
///
/// Returning `None` means the ray was absorbed.
pub trait Scatter: Debug + Send + Sync {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut SampleRng) -> Option<Scattered>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffuseKind {
    /// Uniform over the hemisphere around the normal.
    Hemisphere,
    /// Cosine weighted, `normal + random_unit_vector()`.
    Lambertian,
}

/// Baseline policy: every surface is a grey diffuser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diffuse {
    pub albedo: Color,
    pub kind: DiffuseKind,
}

impl Default for Diffuse {
    fn default() -> Self {
        return Self {
            albedo: Color::splat(0.5),
            kind: DiffuseKind::Lambertian,
        };
    }
}

impl Scatter for Diffuse {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut SampleRng) -> Option<Scattered> {
        let direction = match self.kind {
            DiffuseKind::Hemisphere => random_on_hemisphere(rec.normal, rng),
            DiffuseKind::Lambertian => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // catch degenerate scatter direction
                if scatter_direction.abs_diff_eq(Color::ZERO, 1e-8) {
                    scatter_direction = rec.normal;
                }
                scatter_direction
            }
        };

        return Some(Scattered {
            attenuation: self.albedo,
            scattered: Ray::new(rec.point, direction),
        });
    }
}

#[derive(Debug, Clone)]
pub enum Shading {
    /// `0.5 * (normal + 1)` on hit; no bounces.
    Normals,
    /// Follow scattered rays until the depth budget runs out.
    Bounce(Arc<dyn Scatter>),
}

impl Shading {
    pub fn diffuse() -> Self {
        return Shading::Bounce(Arc::new(Diffuse::default()));
    }
}

/// Sky gradient, white at the horizon and blue at the zenith.
pub fn background(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    return (1.0 - a) * Color::new(1., 1., 1.) + a * Color::new(0.5, 0.7, 1.0);
}

/// Color seen along `ray`; `t_min` excludes hits right at the ray origin.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    shading: &Shading,
    depth: u32,
    t_min: f64,
    rng: &mut SampleRng,
) -> Color {
    let rec = match world.hit(ray, Interval::new(t_min, f64::INFINITY)) {
        Some(rec) => rec,
        None => return background(ray),
    };

    match shading {
        Shading::Normals => {
            return 0.5 * (rec.normal + Color::ONE);
        }
        Shading::Bounce(scatter) => {
            // out of bounces, no more light is gathered
            if depth == 0 {
                return Color::ZERO;
            }
            match scatter.scatter(ray, &rec, rng) {
                Some(Scattered {
                    attenuation,
                    scattered,
                }) => {
                    return attenuation
                        * ray_color(&scattered, world, shading, depth - 1, t_min, rng);
                }
                None => return Color::ZERO,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::{HittableList, Sphere};
    use crate::random::rng_for;
    use glam::DVec3;

    fn ground_and_ball() -> HittableList {
        let mut world = HittableList::new();
        world.add(Sphere::new(DVec3::new(0., 0., -1.), 0.5));
        world.add(Sphere::new(DVec3::new(0., -100.5, -1.), 100.));
        return world;
    }

    #[derive(Debug)]
    struct Absorb;

    impl Scatter for Absorb {
        fn scatter(&self, _: &Ray, _: &HitRecord, _: &mut SampleRng) -> Option<Scattered> {
            return None;
        }
    }

    #[test]
    fn miss_returns_sky_gradient() {
        let world = HittableList::new();
        let mut rng = rng_for(0, 0);

        let up = Ray::new(DVec3::ZERO, DVec3::new(0., 3., 0.));
        let color = ray_color(&up, &world, &Shading::diffuse(), 50, 0.001, &mut rng);
        assert!(color.abs_diff_eq(Color::new(0.5, 0.7, 1.0), 1e-12));

        let down = Ray::new(DVec3::ZERO, DVec3::new(0., -1., 0.));
        assert!(background(&down).abs_diff_eq(Color::ONE, 1e-12));

        let level = Ray::new(DVec3::ZERO, DVec3::new(1., 0., 0.));
        assert!(background(&level).abs_diff_eq(Color::new(0.75, 0.85, 1.0), 1e-12));
    }

    #[test]
    fn normals_mode_maps_normal_into_unit_cube() {
        let world = ground_and_ball();
        let mut rng = rng_for(0, 0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        let color = ray_color(&ray, &world, &Shading::Normals, 0, 0., &mut rng);
        assert!(color.abs_diff_eq(Color::new(0.5, 0.5, 1.0), 1e-12));
    }

    #[test]
    fn exhausted_depth_is_black() {
        let world = ground_and_ball();
        let mut rng = rng_for(0, 0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        let color = ray_color(&ray, &world, &Shading::diffuse(), 0, 0.001, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn absorbed_ray_is_black() {
        let world = ground_and_ball();
        let mut rng = rng_for(0, 0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        let shading = Shading::Bounce(Arc::new(Absorb));
        assert_eq!(ray_color(&ray, &world, &shading, 10, 0.001, &mut rng), Color::ZERO);
    }

    #[test]
    fn single_bounce_attenuates_sky() {
        // a lone sphere seen from outside: one bounce always escapes to the sky
        let world = HittableList::with_object(Sphere::new(DVec3::new(0., 0., -1.), 0.5));
        let mut rng = rng_for(9, 0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        for kind in [DiffuseKind::Hemisphere, DiffuseKind::Lambertian] {
            let shading = Shading::Bounce(Arc::new(Diffuse {
                albedo: Color::splat(0.5),
                kind,
            }));
            for _ in 0..100 {
                let color = ray_color(&ray, &world, &shading, 1, 0.001, &mut rng);
                assert!(color.cmpge(Color::new(0.25, 0.35, 0.5) - 1e-12).all());
                assert!(color.cmple(Color::splat(0.5) + 1e-12).all());
            }
        }
    }

    #[test]
    fn diffuse_scatter_leaves_from_hit_point() {
        let rec = HitRecord {
            point: DVec3::new(1., 2., 3.),
            normal: DVec3::new(0., 1., 0.),
            t: 1.,
            front_face: true,
        };
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1., 2., 3.));
        let mut rng = rng_for(4, 0);

        for kind in [DiffuseKind::Hemisphere, DiffuseKind::Lambertian] {
            let diffuse = Diffuse {
                albedo: Color::new(0.1, 0.2, 0.3),
                kind,
            };
            let out = diffuse.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(out.scattered.origin, rec.point);
            assert_eq!(out.attenuation, diffuse.albedo);
            assert!(out.scattered.direction.dot(rec.normal) >= 0.);
        }
    }
}
