use aotui_core::duel::{RADAR_AXES, RadarSeries};
use std::f64::consts::{FRAC_PI_2, TAU};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::text::Span;
use tui::widgets::Widget;
use tui::widgets::canvas::{Canvas, Context, Line as CanvasLine};

use crate::components::theme::{Palette, fg};

/// Concentric grid rings, as fractions of the outer radius.
const GRID_LEVELS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Outer radius in canvas units; labels sit just beyond it.
const RADIUS: f64 = 1.0;
const LABEL_GAP: f64 = 1.2;
const BOUNDS: [f64; 2] = [-1.6, 1.6];

/// Angle of spoke `i` of `n`, starting straight up and going clockwise.
pub fn spoke_angle(i: usize, n: usize) -> f64 {
    FRAC_PI_2 - i as f64 * TAU / n as f64
}

fn polar(angle: f64, r: f64) -> (f64, f64) {
    (r * angle.cos(), r * angle.sin())
}

/// Polygon vertices of a series, one per axis, in canvas units.
pub fn radar_points(series: &RadarSeries) -> Vec<(f64, f64)> {
    let n = RADAR_AXES.len();
    RADAR_AXES
        .iter()
        .enumerate()
        .map(|(i, axis)| polar(spoke_angle(i, n), series.normalized(axis) * RADIUS))
        .collect()
}

fn draw_polygon(ctx: &mut Context, points: &[(f64, f64)], color: Color) {
    for (i, &(x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(i + 1) % points.len()];
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
    }
}

/// Pentagon radar for one player, with the opponent optionally overlaid.
pub struct RadarChart<'a> {
    pub series: &'a RadarSeries,
    pub color: Color,
    pub overlay: Option<(&'a RadarSeries, Color)>,
}

impl Widget for RadarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 4 {
            return;
        }
        let n = RADAR_AXES.len();
        let grid = fg(Palette::Dim);
        let label_style = Style::default().fg(fg(Palette::Text));

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(BOUNDS)
            .y_bounds(BOUNDS)
            .paint(|ctx| {
                // Grid
                for level in GRID_LEVELS {
                    let ring: Vec<(f64, f64)> =
                        (0..n).map(|i| polar(spoke_angle(i, n), level * RADIUS)).collect();
                    draw_polygon(ctx, &ring, grid);
                }
                for i in 0..n {
                    let (x2, y2) = polar(spoke_angle(i, n), RADIUS);
                    ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2, y2, color: grid });
                }
                ctx.layer();

                if let Some((overlay, color)) = self.overlay {
                    draw_polygon(ctx, &radar_points(overlay), color);
                    ctx.layer();
                }
                draw_polygon(ctx, &radar_points(self.series), self.color);

                for (i, axis) in RADAR_AXES.iter().enumerate() {
                    let (x, y) = polar(spoke_angle(i, n), LABEL_GAP * RADIUS);
                    // Shift left-side labels so they end near the spoke.
                    let x = if x < -0.1 { x - 0.03 * axis.label.len() as f64 } else { x };
                    ctx.print(x, y, Span::styled(axis.label, label_style));
                }
            });
        canvas.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aotui_core::StatKey;

    fn series(values: &[(StatKey, f64)]) -> RadarSeries {
        RadarSeries {
            player: Some("A".into()),
            values: values.iter().copied().collect(),
        }
    }

    #[test]
    fn first_spoke_points_up() {
        let (x, y) = polar(spoke_angle(0, 5), 1.0);
        assert!(x.abs() < 1e-9);
        assert!((y - 1.0).abs() < 1e-9);
        // second spoke is to the right
        assert!(polar(spoke_angle(1, 5), 1.0).0 > 0.0);
    }

    #[test]
    fn points_scale_with_normalized_values() {
        let s = series(&[(StatKey::FirstServe, 0.5), (StatKey::Aces, 40.0)]);
        let points = radar_points(&s);
        assert_eq!(points.len(), RADAR_AXES.len());
        assert!((points[0].1 - 0.5).abs() < 1e-9);
        // clamped to the outer ring
        let (x, y) = points[1];
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
        // missing values collapse to the centre
        assert!(points[2].0.abs() < 1e-9 && points[2].1.abs() < 1e-9);
    }

    #[test]
    fn renders_labels_into_buffer() {
        let s = series(&[(StatKey::FirstServe, 0.6)]);
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        RadarChart { series: &s, color: Color::Blue, overlay: None }.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Aces"));
        assert!(text.contains("DFs"));
    }

    #[test]
    fn tiny_area_is_a_no_op() {
        let s = series(&[]);
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        RadarChart { series: &s, color: Color::Blue, overlay: None }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
