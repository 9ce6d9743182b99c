//! Canvas 2D painter for the core's draw list

use std::f64::consts::PI;

use game_core::DrawCmd;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

const SKY: &str = "#70c5ce";
const PIPE_GREEN: &str = "#5cb85c";
const BIRD_BLUE: &str = "#3498db";
const BIRD_GOLD: &str = "#FFD700";
const GLOW: &str = "rgba(255, 215, 0, 0.8)";
const BIRD_RADIUS: f64 = 12.0;
const LABEL_PADDING: f64 = 6.0;
const LABEL_HEIGHT: f64 = 28.0;

/// An image that may still be loading; pending sprites use fallback shapes
pub enum Sprite {
    Pending(HtmlImageElement),
    Ready(HtmlImageElement),
}

impl Sprite {
    pub fn load(name: &str) -> Result<Self, JsValue> {
        let img = HtmlImageElement::new()?;
        img.set_src(&format!("sprites/{}.png", name));
        Ok(Sprite::Pending(img))
    }

    /// Promote to `Ready` once the browser has decoded the image
    fn poll(&mut self) {
        if let Sprite::Pending(img) = self {
            if img.complete() && img.natural_width() > 0 {
                *self = Sprite::Ready(img.clone());
            }
        }
    }

    fn ready(&self) -> Option<&HtmlImageElement> {
        match self {
            Sprite::Ready(img) => Some(img),
            Sprite::Pending(_) => None,
        }
    }
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    background: Sprite,
    bird: Sprite,
    pipe: Sprite,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            background: Sprite::load("background-day")?,
            bird: Sprite::load("bluebird-midflap")?,
            pipe: Sprite::load("pipe-green")?,
        })
    }

    pub fn render(&mut self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        self.background.poll();
        self.bird.poll();
        self.pipe.poll();

        for cmd in cmds {
            match *cmd {
                DrawCmd::Background { width, height } => self.draw_background(width, height)?,
                DrawCmd::GridLine { y, width, label } => self.draw_grid_line(y, width, label)?,
                DrawCmd::Pipe {
                    x,
                    width,
                    gap_top,
                    gap_bottom,
                    height,
                } => self.draw_pipe(x, width, gap_top, gap_bottom, height)?,
                DrawCmd::NoteLabel { x, y, text } => self.draw_note_label(x, y, text)?,
                DrawCmd::Bird {
                    x,
                    y,
                    width,
                    height,
                    locked,
                } => self.draw_bird(x, y, width, height, locked)?,
            }
        }
        Ok(())
    }

    fn draw_background(&self, width: f32, height: f32) -> Result<(), JsValue> {
        let (w, h) = (width as f64, height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        match self.background.ready() {
            Some(img) => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)?;
            }
            None => {
                self.ctx.set_fill_style_str(SKY);
                self.ctx.fill_rect(0.0, 0.0, w, h);
            }
        }
        Ok(())
    }

    fn draw_grid_line(&self, y: f32, width: f32, label: &str) -> Result<(), JsValue> {
        let y = y as f64;
        self.ctx.save();
        self.ctx.set_stroke_style_str("rgba(0, 0, 0, 0.3)");
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        self.ctx.move_to(0.0, y);
        self.ctx.line_to(width as f64, y);
        self.ctx.stroke();

        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
        self.ctx.set_font("14px Arial");
        self.ctx.set_text_align("left");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(label, 5.0, y)?;
        self.ctx.restore();
        Ok(())
    }

    fn draw_pipe(
        &self,
        x: f32,
        width: f32,
        gap_top: f32,
        gap_bottom: f32,
        height: f32,
    ) -> Result<(), JsValue> {
        let (x, w) = (x as f64, width as f64);
        let (top, bottom, h) = (gap_top as f64, gap_bottom as f64, height as f64);

        match self.pipe.ready() {
            Some(img) => {
                // Upper half is the same sprite flipped about the gap edge
                self.ctx.save();
                self.ctx.translate(x + w / 2.0, top)?;
                self.ctx.rotate(PI)?;
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, 0.0, w, top)?;
                self.ctx.restore();

                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, bottom, w, h - bottom)?;
            }
            None => {
                self.ctx.set_fill_style_str(PIPE_GREEN);
                self.ctx.fill_rect(x, 0.0, w, top);
                self.ctx.fill_rect(x, bottom, w, h - bottom);
            }
        }
        Ok(())
    }

    fn draw_note_label(&self, x: f32, y: f32, text: &str) -> Result<(), JsValue> {
        let (x, y) = (x as f64, y as f64);
        self.ctx.save();
        self.ctx.set_font("bold 20px Arial");
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");

        let text_width = self.ctx.measure_text(text)?.width();
        let box_width = text_width + LABEL_PADDING * 2.0;
        self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
        self.ctx.fill_rect(
            x - box_width / 2.0,
            y - LABEL_HEIGHT / 2.0,
            box_width,
            LABEL_HEIGHT,
        );

        self.ctx.set_fill_style_str("#000");
        self.ctx.fill_text(text, x, y)?;
        self.ctx.restore();
        Ok(())
    }

    fn draw_bird(&self, x: f32, y: f32, width: f32, height: f32, locked: bool) -> Result<(), JsValue> {
        let (x, y, w, h) = (x as f64, y as f64, width as f64, height as f64);

        match self.bird.ready() {
            Some(img) => {
                self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    x - w / 2.0,
                    y - h / 2.0,
                    w,
                    h,
                )?;
                if locked {
                    self.ctx.save();
                    self.ctx.set_stroke_style_str(GLOW);
                    self.ctx.set_line_width(3.0);
                    self.ctx.set_shadow_blur(10.0);
                    self.ctx.set_shadow_color(GLOW);
                    self.ctx
                        .stroke_rect(x - w / 2.0 - 2.0, y - h / 2.0 - 2.0, w + 4.0, h + 4.0);
                    self.ctx.restore();
                }
            }
            None => {
                self.ctx
                    .set_fill_style_str(if locked { BIRD_GOLD } else { BIRD_BLUE });
                self.ctx.begin_path();
                self.ctx.arc(x, y, BIRD_RADIUS, 0.0, PI * 2.0)?;
                self.ctx.fill();
            }
        }
        Ok(())
    }
}
