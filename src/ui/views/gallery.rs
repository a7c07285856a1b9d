//! Gallery view — fixed-size tiles with an image area and a caption overlay.
//!
//! Terminals can't show the image itself, so a tile shows the image's file
//! name (or a placeholder glyph when the record has none).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{hit, render_empty_state, truncate, ViewComponent, ViewProps};
use crate::core::{record::Record, roles::GalleryLayout, row::Row};
use crate::ui::theme::Theme;

const TILE_WIDTH: u16 = 24;
/// Roughly 4:3 once terminal cells' aspect ratio is accounted for.
const TILE_HEIGHT: u16 = 9;
const GAP: u16 = 1;

/// Shown when the image field is empty or missing.
pub const PLACEHOLDER_GLYPH: &str = "▢";

#[derive(Debug, Default, Clone, Copy)]
pub struct GalleryView;

impl GalleryView {
    fn slots<T: Record>(props: &ViewProps<'_, T>, area: Rect) -> Vec<(usize, Rect)> {
        let per_row = ((area.width + GAP) / (TILE_WIDTH + GAP)).max(1) as usize;
        let rows_visible = ((area.height + GAP) / (TILE_HEIGHT + GAP)).max(1) as usize;
        let first_row = match props.selected {
            Some(sel) if sel / per_row >= rows_visible => sel / per_row + 1 - rows_visible,
            _ => 0,
        };

        let mut out = Vec::new();
        for i in (first_row * per_row)..props.rows.len() {
            let y = area.y as usize + (i / per_row - first_row) * (TILE_HEIGHT + GAP) as usize;
            if y >= (area.y + area.height) as usize {
                break;
            }
            let x = area.x + (i % per_row) as u16 * (TILE_WIDTH + GAP);
            let w = TILE_WIDTH.min((area.x + area.width).saturating_sub(x));
            let h = TILE_HEIGHT.min(area.y + area.height - y as u16);
            if w > 0 {
                out.push((i, Rect::new(x, y as u16, w, h)));
            }
        }
        out
    }

    fn render_tile<T: Record>(
        layout: &GalleryLayout<'_, T>,
        row: &Row<'_, T>,
        selected: bool,
        rect: Rect,
        buf: &mut Buffer,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if selected {
                Theme::selected_border_style()
            } else {
                Theme::border_style()
            });
        let inner = block.inner(rect);
        block.render(rect, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }
        let width = inner.width as usize;

        let title = layout.title.map(|c| row.text(&c.key)).unwrap_or_default();
        let mut caption: Vec<Line> = Vec::new();
        if !title.is_empty() {
            caption.push(Line::from(Span::styled(truncate(&title, width), Theme::primary_style())));
        }
        for col in &layout.meta {
            caption.push(Line::from(Span::styled(
                truncate(&row.text(&col.key), width),
                Theme::secondary_style(),
            )));
        }
        let caption_h = (caption.len() as u16).min(inner.height.saturating_sub(1));

        // ── image area ─────────────────────────────────────────
        let image_area = Rect::new(inner.x, inner.y, inner.width, inner.height - caption_h);
        buf.set_style(image_area, Theme::image_area_style());
        let url = layout.image.map(|c| row.text(&c.key)).unwrap_or_default();
        let label = if url.is_empty() {
            PLACEHOLDER_GLYPH.to_string()
        } else {
            let name = url.rsplit('/').find(|s| !s.is_empty()).unwrap_or(&url);
            truncate(&format!("▣ {name}"), width)
        };
        let mid = Rect::new(image_area.x, image_area.y + image_area.height / 2, image_area.width, 1);
        if image_area.height > 0 {
            Paragraph::new(Line::from(Span::styled(label, Theme::placeholder_style())))
                .centered()
                .render(mid, buf);
        }

        // ── caption overlay ────────────────────────────────────
        let caption_top = inner.y + inner.height - caption_h;
        for (i, line) in caption.iter().take(caption_h as usize).enumerate() {
            let y = caption_top + i as u16;
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), Theme::overlay_style());
            buf.set_line(inner.x, y, line, inner.width);
        }
    }
}

impl<T: Record> ViewComponent<T> for GalleryView {
    fn render(&self, props: &ViewProps<'_, T>, area: Rect, buf: &mut Buffer) {
        if props.rows.is_empty() {
            render_empty_state(area, buf);
            return;
        }
        let layout = GalleryLayout::resolve(props.columns);
        for (i, rect) in Self::slots(props, area) {
            Self::render_tile(&layout, &props.rows[i], props.selected == Some(i), rect, buf);
        }
    }

    fn row_at(&self, props: &ViewProps<'_, T>, area: Rect, x: u16, y: u16) -> Option<usize> {
        hit(&Self::slots(props, area), x, y)
    }
}
