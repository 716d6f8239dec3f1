use crate::interval::Interval;
use crate::ray::Ray;
use glam::DVec3;

pub trait Hittable: Send + Sync {
    /// Nearest intersection whose ray parameter lies strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub point: DVec3,
    /// Unit length, always facing against the incoming ray.
    pub normal: DVec3,
    pub t: f64,
    /// True when the ray arrived from outside the surface.
    pub front_face: bool,
}

impl HitRecord {
    pub fn with_face_normal(
        ray: &Ray,
        point: DVec3,
        outward_normal: DVec3,
        t: f64,
    ) -> Self {
        let (front_face, normal) = Self::calc_face_normal(ray, outward_normal);

        return Self {
            point,
            normal,
            t,
            front_face,
        };
    }

    pub fn calc_face_normal(ray: &Ray, outward_normal: DVec3) -> (bool, DVec3) {
        let front_face = ray.direction.dot(outward_normal) < 0.;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        return (front_face, normal);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        return Self { center, radius };
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = h * h - a * c;

        if discriminant < 0. {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;

        return Some(HitRecord::with_face_normal(ray, point, outward_normal, root));
    }
}

/// Sole owner of the scene's primitives, tested in insertion order.
#[derive(Default)]
pub struct HittableList {
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        return Self { objects: vec![] };
    }

    pub fn with_object<T>(object: T) -> Self
    where
        T: Hittable + 'static,
    {
        let mut list = Self::new();
        list.add(object);
        return list;
    }

    pub fn add<T>(&mut self, object: T)
    where
        T: Hittable + 'static,
    {
        self.objects.push(Box::new(object));
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        return self.objects.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.objects.is_empty();
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // each child only gets the range up to the closest hit so far
        let (_closest, hit_record) = self.objects.iter().fold(
            (ray_t.max, None),
            |acc, item| match item.hit(ray, Interval::new(ray_t.min, acc.0)) {
                Some(temp_rec) => (temp_rec.t, Some(temp_rec)),
                None => acc,
            },
        );

        return hit_record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> Interval {
        return Interval::new(0., f64::INFINITY);
    }

    #[test]
    fn ray_at_center_hits_surface_facing_back() {
        let sphere = Sphere::new(DVec3::new(0., 0., -5.), 1.);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        let rec = sphere.hit(&ray, forward()).expect("ray aimed at the center");
        assert!((rec.t - 4.).abs() < 1e-12);
        assert!(rec.point.abs_diff_eq(DVec3::new(0., 0., -4.), 1e-12));
        assert!(rec.normal.abs_diff_eq(-ray.direction, 1e-12));
        assert!(rec.front_face);
    }

    #[test]
    fn ray_passing_beside_sphere_misses() {
        let sphere = Sphere::new(DVec3::new(0., 0., -5.), 1.);
        let ray = Ray::new(DVec3::new(0., 1.01, 0.), DVec3::new(0., 0., -1.));
        assert!(sphere.hit(&ray, forward()).is_none());

        let sideways = Ray::new(DVec3::ZERO, DVec3::new(1., 0., 0.));
        assert!(sphere.hit(&sideways, forward()).is_none());
    }

    #[test]
    fn ray_from_inside_hits_back_face() {
        let sphere = Sphere::new(DVec3::new(0., 0., -5.), 1.);
        let ray = Ray::new(DVec3::new(0., 0., -5.), DVec3::new(0., 0., -1.));

        let rec = sphere.hit(&ray, forward()).expect("ray starts inside");
        assert!((rec.t - 1.).abs() < 1e-12);
        assert!(!rec.front_face);
        // outward normal is (0, 0, -1); the stored one points back inside
        assert!(rec.normal.abs_diff_eq(DVec3::new(0., 0., 1.), 1e-12));
    }

    #[test]
    fn boundary_roots_are_excluded() {
        let sphere = Sphere::new(DVec3::new(0., 0., -5.), 1.);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        // near root is exactly the lower bound, so the far root is taken
        let rec = sphere.hit(&ray, Interval::new(4., f64::INFINITY)).unwrap();
        assert!((rec.t - 6.).abs() < 1e-12);
        assert!(!rec.front_face);

        assert!(sphere.hit(&ray, Interval::new(0., 4.)).is_none());
        assert!(sphere.hit(&ray, Interval::new(4., 6.)).is_none());
    }

    #[test]
    fn list_returns_nearest_hit_regardless_of_order() {
        let near = Sphere::new(DVec3::new(0., 0., -3.), 0.5);
        let far = Sphere::new(DVec3::new(0., 0., -10.), 2.);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));

        let mut list = HittableList::new();
        list.add(far);
        list.add(near);
        let rec = list.hit(&ray, forward()).unwrap();
        assert!((rec.t - 2.5).abs() < 1e-12);

        list.clear();
        list.add(near);
        list.add(far);
        let rec = list.hit(&ray, forward()).unwrap();
        assert!((rec.t - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_list_never_hits() {
        let mut list = HittableList::with_object(Sphere::new(DVec3::new(0., 0., -1.), 0.5));
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0., 0., -1.));
        assert!(list.hit(&ray, forward()).is_none());
    }
}
