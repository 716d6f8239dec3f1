use raytrace::camera::{Camera, CameraConfig};
use raytrace::demo_world;
use std::io::{self, BufWriter};

const ASPECT_RATIO: f64 = 16.0 / 9.0;
const IMAGE_WIDTH: usize = 400;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let world = demo_world();

    let camera = Camera::new(CameraConfig {
        aspect_ratio: ASPECT_RATIO,
        image_width: IMAGE_WIDTH,
        samples_per_pixel: 100,
        max_depth: 50,
        ..CameraConfig::default()
    });

    // the image goes to stdout, progress and logs to stderr
    let mut out = BufWriter::new(io::stdout().lock());
    camera.render(&world, &mut out)
}
