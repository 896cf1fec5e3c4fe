//! Sky chart rendering.
//!
//! Each call draws into its own RGB buffer with `plotters` and hands the
//! result back as an [`image::RgbImage`]; there is no shared canvas between
//! calls. Saving or displaying the image is left to the caller.

use image::RgbImage;
use plotters::prelude::*;
use tracing::debug;

use crate::error::{Result, SkyError};
use crate::projection::{PlotPoint, HORIZON_RADIUS};

/// Parameters controlling the look of the chart.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels. Default 800.
    pub width: u32,
    /// Image height in pixels. Default 800.
    pub height: u32,
    /// Blank space between the chart rim and the image edge, in pixels.
    /// Default 24.
    pub margin: u32,
    /// Colour outside the chart disk.
    pub background: RGBColor,
    /// Colour of the chart disk (the sky).
    pub sky: RGBColor,
    /// Star marker colour.
    pub marker_color: RGBColor,
    /// Star marker opacity. Default 0.7.
    pub marker_alpha: f64,
    /// Draw altitude rings every 30 degrees and compass spokes every 45.
    /// Default true.
    pub draw_grid: bool,
    /// Grid line colour.
    pub grid_color: RGBColor,
    /// Pixels per typographic point, used to turn marker areas (square
    /// points) into pixel radii. Default 100/72, i.e. a 100 dpi canvas.
    pub pixels_per_point: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            margin: 24,
            background: RGBColor(12, 14, 28),
            sky: BLACK,
            marker_color: WHITE,
            marker_alpha: 0.7,
            draw_grid: true,
            grid_color: RGBColor(60, 64, 88),
            pixels_per_point: 100.0 / 72.0,
        }
    }
}

/// Pixel radius of a marker with the given area in square points.
pub fn marker_radius_px(marker_size: f64, pixels_per_point: f64) -> i32 {
    let radius = 0.5 * marker_size.max(0.0).sqrt() * pixels_per_point;
    (radius.round() as i32).max(1)
}

fn circle_path(radius: f64) -> Vec<(f64, f64)> {
    (0..=360)
        .map(|deg| {
            let (s, c) = (deg as f64).to_radians().sin_cos();
            (radius * s, radius * c)
        })
        .collect()
}

fn render_err<E: std::fmt::Display>(e: E) -> SkyError {
    SkyError::RenderError(e.to_string())
}

fn draw(buf: &mut [u8], points: &[PlotPoint], config: &RenderConfig) -> Result<()> {
    let (width, height) = (config.width, config.height);
    let root = BitMapBackend::with_buffer(buf, (width, height)).into_drawing_area();
    root.fill(&config.background).map_err(render_err)?;

    // Largest centered square keeps the chart circular
    let side = width.min(height) as i32;
    let (w, h) = (width as i32, height as i32);
    let square = root
        .clone()
        .shrink(((w - side) / 2, (h - side) / 2), (side, side));

    let mut chart = ChartBuilder::on(&square)
        .margin(config.margin as i32)
        .build_cartesian_2d(
            -HORIZON_RADIUS..HORIZON_RADIUS,
            -HORIZON_RADIUS..HORIZON_RADIUS,
        )
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(Polygon::new(
            circle_path(HORIZON_RADIUS),
            config.sky.filled(),
        )))
        .map_err(render_err)?;

    if config.draw_grid {
        let rings = [30.0, 60.0, HORIZON_RADIUS]
            .into_iter()
            .map(|r| PathElement::new(circle_path(r), config.grid_color.stroke_width(1)));
        chart.draw_series(rings).map_err(render_err)?;

        let spokes = (0..8).map(|i| {
            let (s, c) = (i as f64 * 45.0).to_radians().sin_cos();
            PathElement::new(
                vec![(0.0, 0.0), (HORIZON_RADIUS * s, HORIZON_RADIUS * c)],
                config.grid_color.stroke_width(1),
            )
        });
        chart.draw_series(spokes).map_err(render_err)?;
    }

    let style = config.marker_color.mix(config.marker_alpha).filled();
    chart
        .draw_series(points.iter().map(|p| {
            Circle::new(
                p.to_xy(),
                marker_radius_px(p.marker_size, config.pixels_per_point),
                style,
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Draw the projected stars on a polar sky chart.
///
/// North is up and azimuth increases clockwise, so east is on the right.
/// The zenith is the chart center and the horizon its rim. An empty point
/// list renders an empty chart.
pub fn render(points: &[PlotPoint], config: &RenderConfig) -> Result<RgbImage> {
    if config.width == 0 || config.height == 0 {
        return Err(SkyError::RenderError(format!(
            "invalid image size {}x{}",
            config.width, config.height
        )));
    }
    if 2 * config.margin >= config.width.min(config.height) {
        return Err(SkyError::RenderError(format!(
            "margin {} leaves no room for a {}x{} chart",
            config.margin, config.width, config.height
        )));
    }

    let mut buf = vec![0u8; config.width as usize * config.height as usize * 3];
    draw(&mut buf, points, config)?;
    debug!(
        "Rendered {} stars on a {}x{} chart",
        points.len(),
        config.width,
        config.height
    );

    RgbImage::from_raw(config.width, config.height, buf)
        .ok_or_else(|| SkyError::RenderError("pixel buffer size mismatch".to_string()))
}
