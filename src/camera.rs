use crate::color::{self, Color};
use crate::hittable::Hittable;
use crate::random::{resolve_seed, rng_for, sample_square, SampleRng};
use crate::ray::Ray;
use crate::shader::{ray_color, Shading};
use glam::DVec3;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const VIEWPORT_HEIGHT: f64 = 2.0;

// upper bound on width * height
const MAX_PIXELS: usize = 1 << 28;

/// Settings supplied before rendering. Everything derived from them is
/// recomputed at the start of each render.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Nominal width / height ratio of the image.
    pub aspect_ratio: f64,
    pub image_width: usize,
    pub samples_per_pixel: u32,
    /// Maximum number of bounces in [`Shading::Bounce`].
    pub max_depth: u32,
    pub focal_length: f64,
    pub center: DVec3,
    pub shading: Shading,
    /// Lower bound of the shading query interval.
    pub t_min: f64,
    /// Fixed seed for reproducible renders; fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Trace pixels on the rayon thread pool.
    pub parallel: bool,
    /// Draw a progress bar on stderr.
    pub progress: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        return Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            focal_length: 1.0,
            center: DVec3::ZERO,
            shading: Shading::diffuse(),
            t_min: 0.001,
            seed: None,
            parallel: false,
            progress: true,
        };
    }
}

impl CameraConfig {
    fn validate(&self) -> io::Result<()> {
        let invalid = |msg: &str| Err(io::Error::new(io::ErrorKind::InvalidInput, msg.to_string()));

        if self.image_width == 0 {
            return invalid("image_width must be at least 1");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be at least 1");
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.) {
            return invalid("aspect_ratio must be a positive finite number");
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.) {
            return invalid("focal_length must be a positive finite number");
        }
        match self.image_width.checked_mul(self.image_height()) {
            Some(pixels) if pixels <= MAX_PIXELS => {}
            _ => return invalid("image_width / aspect_ratio gives too many pixels"),
        }
        return Ok(());
    }

    pub fn image_height(&self) -> usize {
        let image_height = (self.image_width as f64 / self.aspect_ratio) as usize;
        return image_height.max(1);
    }
}

/// Pixel geometry derived from a [`CameraConfig`].
#[derive(Debug, Clone, Copy)]
struct Viewport {
    image_width: usize,
    image_height: usize,
    center: DVec3,
    pixel00_loc: DVec3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
    pixel_samples_scale: f64,
}

impl Viewport {
    fn pixel_count(&self) -> usize {
        return self.image_width * self.image_height;
    }

    fn derive(config: &CameraConfig) -> Self {
        let image_width = config.image_width;
        let image_height = config.image_height();
        let center = config.center;

        // real pixel ratio, not the nominal aspect_ratio
        let viewport_width = VIEWPORT_HEIGHT * (image_width as f64 / image_height as f64);

        // calculate the vectors across the horizontal and down the vertical viewport edges.
        let viewport_u = DVec3::new(viewport_width, 0., 0.);
        let viewport_v = DVec3::new(0., -VIEWPORT_HEIGHT, 0.);

        // calculate the pixel deltas
        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left = center
            - DVec3::new(0., 0., config.focal_length)
            - viewport_u / 2.
            - viewport_v / 2.;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        return Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            pixel_samples_scale: (config.samples_per_pixel as f64).recip(),
        };
    }
}

// get x, y coordinates of every pixel, row by row
fn pixel_coords(view: &Viewport) -> impl Iterator<Item = (usize, usize)> {
    return (0..view.image_height).cartesian_product(0..view.image_width);
}

pub struct Camera {
    config: CameraConfig,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        return Self { config };
    }

    pub fn config(&self) -> &CameraConfig {
        return &self.config;
    }

    pub fn image_width(&self) -> usize {
        return self.config.image_width;
    }

    pub fn image_height(&self) -> usize {
        return self.config.image_height();
    }

    /// Renders `world` and writes it to `out` as a P3 image.
    ///
    /// The sequential path writes each pixel as soon as it is traced.
    pub fn render<W: Write>(&self, world: &dyn Hittable, out: &mut W) -> io::Result<()> {
        let (view, seed) = self.prepare()?;
        color::write_header(out, view.image_width, view.image_height)?;

        let started = Instant::now();
        if self.config.parallel {
            for rgb in self.trace_parallel(&view, world, seed) {
                color::write_pixel(out, rgb)?;
            }
        } else {
            let progress = self.progress_bar(&view);
            for (y, x) in pixel_coords(&view).progress_with(progress.clone()) {
                color::write_pixel(out, self.pixel_color(&view, world, seed, x, y))?;
            }
            progress.finish_and_clear();
        }
        info!("rendered {} pixels in {:.2?}", view.pixel_count(), started.elapsed());

        return out.flush();
    }

    /// Row-major pixels starting at the top-left corner.
    pub fn render_pixels(&self, world: &dyn Hittable) -> io::Result<Vec<[u8; 3]>> {
        let (view, seed) = self.prepare()?;

        let started = Instant::now();
        let pixels: Vec<[u8; 3]> = if self.config.parallel {
            self.trace_parallel(&view, world, seed)
        } else {
            let progress = self.progress_bar(&view);
            let pixels: Vec<[u8; 3]> = pixel_coords(&view)
                .progress_with(progress.clone())
                .map(|(y, x)| self.pixel_color(&view, world, seed, x, y))
                .collect();
            progress.finish_and_clear();
            pixels
        };
        info!("rendered {} pixels in {:.2?}", pixels.len(), started.elapsed());

        return Ok(pixels);
    }

    fn prepare(&self) -> io::Result<(Viewport, u64)> {
        self.config.validate()?;

        let view = Viewport::derive(&self.config);
        let seed = resolve_seed(self.config.seed);
        debug!(
            "pixel00 {:?}, delta u {:?}, delta v {:?}, seed {}",
            view.pixel00_loc, view.pixel_delta_u, view.pixel_delta_v, seed
        );
        info!(
            "rendering {}x{} at {} samples per pixel",
            view.image_width, view.image_height, self.config.samples_per_pixel
        );
        return Ok((view, seed));
    }

    fn trace_parallel(&self, view: &Viewport, world: &dyn Hittable, seed: u64) -> Vec<[u8; 3]> {
        let progress = self.progress_bar(view);
        let pixels = pixel_coords(view)
            .collect::<Vec<(usize, usize)>>()

            // run in parallel (multi-threaded)
            .into_par_iter()
            .progress_with(progress.clone())
            .map(|(y, x)| self.pixel_color(view, world, seed, x, y))
            .collect();
        progress.finish_and_clear();
        return pixels;
    }

    fn progress_bar(&self, view: &Viewport) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} pixels ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        return ProgressBar::new(view.pixel_count() as u64).with_style(style);
    }

    fn pixel_color(&self, view: &Viewport, world: &dyn Hittable, seed: u64, x: usize, y: usize) -> [u8; 3] {
        let mut rng = rng_for(seed, (y * view.image_width + x) as u64);

        let multisampled_pixel_color = (0..self.config.samples_per_pixel)
            .map(|_| {
                let ray = self.get_ray(view, x, y, &mut rng);
                ray_color(
                    &ray,
                    world,
                    &self.config.shading,
                    self.config.max_depth,
                    self.config.t_min,
                    &mut rng,
                )
            })
            .sum::<Color>()
            * view.pixel_samples_scale;

        return color::to_rgb(multisampled_pixel_color);
    }

    fn get_ray(&self, view: &Viewport, x: usize, y: usize, rng: &mut SampleRng) -> Ray {
        let pixel_center = view.pixel00_loc
            + (x as f64 * view.pixel_delta_u)
            + (y as f64 * view.pixel_delta_v);

        // a single sample goes through the pixel center
        let pixel_sample = if self.config.samples_per_pixel > 1 {
            let (px, py) = sample_square(rng);
            pixel_center + (px * view.pixel_delta_u) + (py * view.pixel_delta_v)
        } else {
            pixel_center
        };

        return Ray::new(view.center, pixel_sample - view.center);
    }
}
