use crate::interval::Interval;
use glam::DVec3;
use std::io::{self, Write};

pub type Color = DVec3;

pub const MAX_VALUE: u16 = 255;

const INTENSITY: Interval = Interval {
    min: 0.,
    max: 0.999,
};

pub fn linear_to_gamma(linear_component: f64) -> f64 {
    if linear_component > 0. {
        return linear_component.sqrt();
    }
    return 0.;
}

/// Maps an averaged linear color onto `[0, 255]` per channel.
pub fn to_rgb(pixel_color: Color) -> [u8; 3] {
    let byte = |c: f64| (256. * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    return [byte(pixel_color.x), byte(pixel_color.y), byte(pixel_color.z)];
}

pub fn write_header<W: Write>(out: &mut W, width: usize, height: usize) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n{}", width, height, MAX_VALUE)
}

pub fn write_pixel<W: Write>(out: &mut W, rgb: [u8; 3]) -> io::Result<()> {
    writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])
}
