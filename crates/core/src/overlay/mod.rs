//! In-place overlay drawing on frame pixels: detection boxes and labels,
//! the "unsupported" placeholder, and the FPS readout.

pub mod font;

use crate::shared::detection::Detection;
use crate::shared::feature_flags::FeatureFlags;
use crate::shared::frame::Frame;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// Per-class box colors, cycled by class id.
const PALETTE: [[u8; 3]; 10] = [
    [54, 67, 244],
    [99, 30, 233],
    [176, 39, 156],
    [183, 58, 103],
    [181, 81, 63],
    [243, 150, 33],
    [212, 188, 0],
    [136, 150, 0],
    [80, 175, 76],
    [74, 195, 139],
];

const BOX_THICKNESS: usize = 2;
const LABEL_PAD: usize = 2;
const PLACEHOLDER_TEXT: &str = "unsupported";

/// Stateless renderer; all drawing writes directly into the frame buffer.
pub struct OverlayRenderer;

impl OverlayRenderer {
    /// Draw boxes (and labels unless the dataset flag suppresses them)
    /// for every detection. A disabled overlay draws nothing at all.
    pub fn draw_detections(&self, frame: &mut Frame, detections: &[Detection], flags: FeatureFlags) {
        if !flags.enabled {
            return;
        }

        let fw = frame.width() as usize;
        let fh = frame.height() as usize;

        for det in detections {
            let color = PALETTE[det.class_id % PALETTE.len()];

            let x0 = (det.bbox.x.max(0.0) as usize).min(fw.saturating_sub(1));
            let y0 = (det.bbox.y.max(0.0) as usize).min(fh.saturating_sub(1));
            let w = (det.bbox.width.max(0.0) as usize).min(fw - x0);
            let h = (det.bbox.height.max(0.0) as usize).min(fh - y0);
            if w == 0 || h == 0 {
                continue;
            }

            stroke_rect(frame, x0, y0, w, h, color, BOX_THICKNESS);

            if !flags.dataset {
                let label = format!("{} {:.0}%", det.label(), det.score * 100.0);
                let (tw, th) = font::text_size(&label, 1);
                let bg_h = th + 2 * LABEL_PAD;
                let ly = y0.saturating_sub(bg_h);
                fill_rect(frame, x0, ly, tw + 2 * LABEL_PAD, bg_h, WHITE);
                draw_text(frame, x0 + LABEL_PAD, ly + LABEL_PAD, &label, BLACK, 1);
            }
        }
    }

    /// Centered "unsupported" banner, drawn when no detector is held.
    pub fn draw_placeholder(&self, frame: &mut Frame) {
        let fw = frame.width() as usize;
        let fh = frame.height() as usize;

        let scale = if font::text_size(PLACEHOLDER_TEXT, 2).0 + 4 <= fw {
            2
        } else {
            1
        };
        let (tw, th) = font::text_size(PLACEHOLDER_TEXT, scale);
        let pad = 2 * scale;
        let x = fw.saturating_sub(tw) / 2;
        let y = fh.saturating_sub(th) / 2;

        fill_rect(
            frame,
            x.saturating_sub(pad),
            y.saturating_sub(pad),
            tw + 2 * pad,
            th + 2 * pad,
            WHITE,
        );
        draw_text(frame, x, y, PLACEHOLDER_TEXT, BLACK, scale);
    }

    /// Top-right `FPS=N` readout.
    pub fn draw_fps(&self, frame: &mut Frame, fps: u32) {
        let text = format!("FPS={fps}");
        let (tw, th) = font::text_size(&text, 1);
        let fw = frame.width() as usize;

        let x = fw.saturating_sub(tw + 2 * LABEL_PAD);
        fill_rect(frame, x, 0, tw + 2 * LABEL_PAD, th + 2 * LABEL_PAD, WHITE);
        draw_text(frame, x + LABEL_PAD, LABEL_PAD, &text, BLACK, 1);
    }
}

fn fill_rect(frame: &mut Frame, x: usize, y: usize, w: usize, h: usize, color: [u8; 3]) {
    let mut px = frame.as_ndarray_mut();
    let (fh, fw, fc) = px.dim();
    let channels = fc.min(3);
    for yy in y..(y + h).min(fh) {
        for xx in x..(x + w).min(fw) {
            for (c, &value) in color.iter().take(channels).enumerate() {
                px[[yy, xx, c]] = value;
            }
        }
    }
}

fn stroke_rect(
    frame: &mut Frame,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: [u8; 3],
    thickness: usize,
) {
    let t = thickness.min(w).min(h);
    fill_rect(frame, x, y, w, t, color);
    fill_rect(frame, x, y + h - t, w, t, color);
    fill_rect(frame, x, y, t, h, color);
    fill_rect(frame, x + w - t, y, t, h, color);
}

fn draw_text(frame: &mut Frame, x: usize, y: usize, text: &str, color: [u8; 3], scale: usize) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = font::glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                        fill_rect(
                            frame,
                            cursor + col * scale,
                            y + row * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
        cursor += font::GLYPH_ADVANCE * scale;
    }
}
