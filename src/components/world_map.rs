use aotui_core::choropleth::{ColorScale, WinsByCountry};
use aotui_core::geo::WorldMap;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Color;
use tui::symbols::Marker;
use tui::widgets::Widget;
use tui::widgets::canvas::{Canvas, Context, Line as CanvasLine};

use crate::components::theme::{Palette, choropleth_color, fg};

const LON_BOUNDS: [f64; 2] = [-180.0, 180.0];
/// Polar caps carry no tennis data; trimming them gives the rest more rows.
const LAT_BOUNDS: [f64; 2] = [-60.0, 85.0];

/// Country outlines coloured by cumulative wins for one year.
pub struct WorldMapView<'a> {
    pub world: &'a WorldMap,
    pub wins: &'a WinsByCountry,
    pub year: u16,
    pub selected: Option<&'a str>,
}

impl WorldMapView<'_> {
    fn color_of(&self, scale: &ColorScale, code: &str) -> Color {
        if self.selected == Some(code) {
            return fg(Palette::Accent);
        }
        choropleth_color(scale, self.wins.wins(self.year, code))
    }
}

fn draw_ring(ctx: &mut Context, ring: &[(f64, f64)], color: Color) {
    for pair in ring.windows(2) {
        let [(x1, y1), (x2, y2)] = [pair[0], pair[1]];
        // Antimeridian crossings would otherwise streak across the map.
        if (x2 - x1).abs() > 180.0 {
            continue;
        }
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
    }
}

impl Widget for WorldMapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let scale = ColorScale::sequential(self.wins.max(self.year));

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(LON_BOUNDS)
            .y_bounds(LAT_BOUNDS)
            .paint(|ctx| {
                for country in &self.world.countries {
                    let color = self.color_of(&scale, &country.code);
                    for ring in &country.rings {
                        draw_ring(ctx, ring, color);
                    }
                }
                // Keep the selection on top of neighbouring outlines.
                if let Some(selected) = self.selected.and_then(|code| self.world.country(code)) {
                    ctx.layer();
                    for ring in &selected.rings {
                        draw_ring(ctx, ring, fg(Palette::Accent));
                    }
                }
            })
            .render(area, buf);
    }
}
