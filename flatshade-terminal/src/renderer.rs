/// Cell rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use flatshade_core::{Polygon, RenderOutput};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

/// Paints screen-space polygons into a grid of terminal cells
///
/// Polygons are painted in order, later ones over earlier ones, the same way
/// the SVG output stacks its paths.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Rasterize `output`, whose coordinates span `screen_width` by
    /// `screen_height` pixels, into the grid
    ///
    /// `cell_aspect` is the height of a cell relative to its width; the image
    /// is letterboxed so squares stay square.
    pub fn rasterize(&mut self, output: &RenderOutput, screen_width: f32, screen_height: f32, cell_aspect: f32) {
        if self.width == 0 || self.height == 0 || screen_width <= 0.0 || screen_height <= 0.0 {
            return;
        }

        // Pixels per cell horizontally; vertically a cell is cell_aspect times taller
        let scale = (screen_width / self.width as f32).max(screen_height / (self.height as f32 * cell_aspect));
        let cell_w = scale;
        let cell_h = scale * cell_aspect;
        let offset_x = (self.width as f32 * cell_w - screen_width) / 2.0;
        let offset_y = (self.height as f32 * cell_h - screen_height) / 2.0;

        for (polygon, color) in output.iter() {
            let glyph = glyph_for(color.luminance());
            let cell = Cell {
                glyph,
                color: Color::Rgb {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                },
            };
            self.fill_polygon(polygon, cell, |col, row| {
                (
                    (col as f32 + 0.5) * cell_w - offset_x,
                    (row as f32 + 0.5) * cell_h - offset_y,
                )
            });
        }
    }

    fn fill_polygon<F>(&mut self, polygon: &Polygon, cell: Cell, to_screen: F)
    where
        F: Fn(usize, usize) -> (f32, f32),
    {
        if polygon.len() < 3 {
            return;
        }

        for row in 0..self.height {
            for col in 0..self.width {
                let (px, py) = to_screen(col, row);
                if contains(polygon, px, py) {
                    self.cells[row * self.width + col] = Some(cell);
                }
            }
        }
    }

    /// Glyph painted at a cell, or a space if nothing covers it
    pub fn glyph_at(&self, col: usize, row: usize) -> char {
        self.cells
            .get(row * self.width + col)
            .copied()
            .flatten()
            .map_or(' ', |cell| cell.glyph)
    }

    pub fn covered(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width {
                match self.cells[row * self.width + col] {
                    Some(cell) => {
                        writer.queue(SetForegroundColor(cell.color))?;
                        writer.queue(Print(cell.glyph))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn glyph_for(luminance: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (luminance.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

/// Even-odd point-in-polygon test in screen XY
fn contains(polygon: &Polygon, x: f32, y: f32) -> bool {
    let vertices = &polygon.vertices;
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
