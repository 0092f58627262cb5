//! Half-block terminal renderer.
//!
//! Every terminal cell shows two vertical pixels: the upper one as the
//! foreground of `▀`, the lower one as the background. The 400x600 world is
//! letterboxed into that pixel grid with a uniform scale.

use crate::geometry::Rect;
use crate::scene::{Anchor, Label, Rgb, Scene};
use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

const BORDER: Rgb = Rgb(20, 20, 28);

fn ccolor(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Pixel buffer ────────────────────────────────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BORDER; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BORDER);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Writes the buffer starting at the top-left cell. Each terminal row is
    /// addressed with its own cursor move, so no line wrapping is involved.
    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.w == 0 {
            return Ok(());
        }
        let mut pen = Pen::default();
        for (row, pair) in self.px.chunks_exact(self.w * 2).enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            let (upper, lower) = pair.split_at(self.w);
            for (&top, &bot) in upper.iter().zip(lower) {
                pen.background(out, bot)?;
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    pen.foreground(out, top)?;
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
        }
        queue!(out, style::ResetColor)
    }
}

/// Last colours sent to the terminal, so runs of equal cells cost one escape.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl Pen {
    fn foreground(&mut self, out: &mut impl Write, c: Rgb) -> io::Result<()> {
        if self.fg != Some(c) {
            queue!(out, style::SetForegroundColor(ccolor(c)))?;
            self.fg = Some(c);
        }
        Ok(())
    }

    fn background(&mut self, out: &mut impl Write, c: Rgb) -> io::Result<()> {
        if self.bg != Some(c) {
            queue!(out, style::SetBackgroundColor(ccolor(c)))?;
            self.bg = Some(c);
        }
        Ok(())
    }
}

// ── World to terminal mapping ───────────────────────────────────────────────

/// Uniform scale plus centring offset from world pixels to buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
}

impl Viewport {
    pub fn fit(world_w: f64, world_h: f64, pw: usize, ph: usize) -> Self {
        let scale = (pw as f64 / world_w).min(ph as f64 / world_h).max(0.0);
        Self {
            scale,
            ox: ((pw as f64 - world_w * scale) / 2.0).floor(),
            oy: ((ph as f64 - world_h * scale) / 2.0).floor(),
        }
    }

    /// Buffer-pixel span `(x, y, w, h)` covered by a world rect.
    pub fn map(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x0 = (self.ox + r.left() * self.scale).round() as i32;
        let y0 = (self.oy + r.top() * self.scale).round() as i32;
        let x1 = (self.ox + r.right() * self.scale).round() as i32;
        let y1 = (self.oy + r.bottom() * self.scale).round() as i32;
        (x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    /// Terminal cell `(col, row)` where a label starts.
    pub fn label_cell(&self, label: &Label) -> (u16, u16) {
        let x = self.ox + label.x * self.scale;
        let col = match label.anchor {
            Anchor::Left => x,
            Anchor::Center => x - label.text.chars().count() as f64 / 2.0,
        };
        let row = (self.oy + label.y * self.scale) / 2.0;
        (col.max(0.0) as u16, row.max(0.0) as u16)
    }
}

// ── Renderer ────────────────────────────────────────────────────────────────

pub struct Renderer {
    buf: PixelBuf,
    world_w: f64,
    world_h: f64,
    view: Viewport,
}

impl Renderer {
    /// `cols`/`rows` are the terminal size in cells.
    pub fn new(world_w: f64, world_h: f64, cols: u16, rows: u16) -> Self {
        let (pw, ph) = (cols as usize, rows as usize * 2);
        Self {
            buf: PixelBuf::new(pw, ph),
            world_w,
            world_h,
            view: Viewport::fit(world_w, world_h, pw, ph),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (pw, ph) = (cols as usize, rows as usize * 2);
        self.buf.resize(pw, ph);
        self.view = Viewport::fit(self.world_w, self.world_h, pw, ph);
    }

    pub fn viewport(&self) -> Viewport {
        self.view
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    /// Rasterises the scene into the pixel buffer.
    pub fn paint(&mut self, scene: &Scene) {
        self.buf.fill(BORDER);
        let world = Rect::new(0.0, 0.0, self.world_w, self.world_h);
        let (x, y, w, h) = self.view.map(&world);
        self.buf.fill_rect(x, y, w, h, scene.background);
        for (rect, color) in &scene.rects {
            let clipped = clip(rect, &world);
            let (x, y, w, h) = self.view.map(&clipped);
            self.buf.fill_rect(x, y, w, h, *color);
        }
    }

    pub fn draw(&mut self, scene: &Scene, out: &mut impl Write) -> io::Result<()> {
        self.paint(scene);
        self.buf.render(out)?;
        for label in &scene.labels {
            let (col, row) = self.view.label_cell(label);
            if usize::from(row) >= self.buf.height() / 2 {
                continue;
            }
            let room = self.buf.width().saturating_sub(col as usize);
            let text: String = label.text.chars().take(room).collect();
            queue!(
                out,
                cursor::MoveTo(col, row),
                style::SetForegroundColor(ccolor(label.color)),
                style::SetBackgroundColor(ccolor(scene.background)),
                style::Print(text),
                style::ResetColor,
            )?;
        }
        out.flush()
    }
}

/// Intersection of `r` with `bounds`, empty if they don't overlap.
fn clip(r: &Rect, bounds: &Rect) -> Rect {
    let x0 = r.left().max(bounds.left());
    let y0 = r.top().max(bounds.top());
    let x1 = r.right().min(bounds.right());
    let y1 = r.bottom().min(bounds.bottom());
    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{BACKGROUND, PIPE};

    #[test]
    fn test_viewport_letterboxes_wide_terminal() {
        // 200x150 pixels: height-limited, scale 0.25 -> world is 100x150.
        let v = Viewport::fit(400.0, 600.0, 200, 150);
        assert_eq!(v.scale, 0.25);
        assert_eq!(v.ox, 50.0);
        assert_eq!(v.oy, 0.0);
        assert_eq!(v.map(&Rect::new(0.0, 0.0, 400.0, 600.0)), (50, 0, 100, 150));
    }

    #[test]
    fn test_label_centering() {
        let v = Viewport::fit(400.0, 600.0, 200, 150);
        let label = Label {
            text: "Game Over!".to_string(),
            x: 200.0,
            y: 200.0,
            anchor: Anchor::Center,
            color: Rgb(255, 255, 255),
        };
        assert_eq!(v.label_cell(&label), (95, 25));
    }

    #[test]
    fn test_paint_clips_pipes_to_world() {
        let mut r = Renderer::new(400.0, 600.0, 100, 75);
        let scene = Scene {
            background: BACKGROUND,
            rects: vec![(Rect::new(380.0, 0.0, 50.0, 600.0), PIPE)],
            labels: Vec::new(),
        };
        r.paint(&scene);
        let v = r.viewport();
        let (x, y, w, h) = v.map(&Rect::new(0.0, 0.0, 400.0, 600.0));
        // Inside the world at the right edge: pipe colour.
        assert_eq!(r.buffer().get((x + w - 1) as usize, y as usize), PIPE);
        // Just outside the world: border, not pipe.
        if ((x + w) as usize) < r.buffer().width() {
            assert_eq!(r.buffer().get((x + w) as usize, y as usize), BORDER);
        }
        assert_eq!(r.buffer().get(x as usize, (y + h - 1) as usize), BACKGROUND);
    }

    #[test]
    fn test_render_addresses_every_row() {
        let mut r = Renderer::new(400.0, 600.0, 8, 4);
        let scene = Scene {
            background: BACKGROUND,
            rects: Vec::new(),
            labels: Vec::new(),
        };
        let mut out = Vec::new();
        r.draw(&scene, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        for row in 1..=4 {
            assert!(text.contains(&format!("\x1B[{row};1H")), "row {row} missing");
        }
        assert!(!text.contains("\r\n"));
    }

    #[test]
    fn test_render_skips_repeated_colours() {
        let buf = PixelBuf::new(6, 4);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("48;2;").count(), 1);
        assert_eq!(text.matches("38;2;").count(), 0);
        assert_eq!(text.matches(' ').count(), 12);
    }

    #[test]
    fn test_render_uses_half_block_for_split_cells() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, PIPE);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('\u{2580}').count(), 1);
        assert_eq!(text.matches("38;2;255;0;0").count(), 1);
    }
}
