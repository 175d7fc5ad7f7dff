use crate::layout::TextLayoutEngine;
use crate::style::PageStyle;
use crate::{RenderError, RenderResult};
use scriptwall_model::SlugStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders screenplay pages onto fixed-size canvases.
pub struct PageRenderer {
    style: PageStyle,
    font_bytes: Vec<u8>,
    font: vello_cpu::peniko::FontData,
    engine: TextLayoutEngine,
}

impl PageRenderer {
    pub fn new(style: PageStyle, font_bytes: Vec<u8>) -> RenderResult<Self> {
        style.validate()?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.clone()),
            0,
        );
        Ok(Self {
            style,
            font_bytes,
            font,
            engine: TextLayoutEngine::new(),
        })
    }

    pub fn style(&self) -> &PageStyle {
        &self.style
    }

    /// Render one page of text: background fill, then the text block
    /// vertically centered (clamped to the top margin), each line
    /// left-aligned at the margin. Lines whose bottom edge would cross the
    /// bottom margin are dropped rather than drawn clipped.
    pub fn render_page(&mut self, text: &str) -> RenderResult<vello_cpu::Pixmap> {
        let width = self.style.width as u16;
        let height = self.style.height as u16;

        let mut ctx = vello_cpu::RenderContext::new(width, height);

        let bg = self.style.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            self.style.width as f64,
            self.style.height as f64,
        ));

        let layout = self.engine.layout_page(
            text,
            &self.font_bytes,
            self.style.font_size,
            self.style.foreground,
            self.style.text_width(),
        )?;

        let margin_y = self.style.margin_y as f64;
        let block_height = layout.height() as f64;
        let y0 = ((self.style.height as f64 - block_height) / 2.0).max(margin_y);
        let max_y = self.style.height as f64 - margin_y;

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            self.style.margin_x as f64,
            y0,
        )));

        for line in layout.lines() {
            let metrics = line.metrics();
            if y0 + (metrics.baseline + metrics.descent) as f64 > max_y {
                break;
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap)
    }
}

/// Write a rendered pixmap as a PNG, creating parent directories as needed.
pub fn save_png(pixmap: &vello_cpu::Pixmap, path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    image::save_buffer_with_format(
        path,
        pixmap.data_as_u8_slice(),
        pixmap.width() as u32,
        pixmap.height() as u32,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| RenderError::canvas(format!("write png '{}': {e}", path.display())))
}

/// Ensure a page image exists for every page text, rendering what's missing.
///
/// When the pages directory already holds one image per page and `force` is
/// false, the existing set is reused as-is, so the daily re-run does no
/// raster work. A set whose size no longer matches the current pagination
/// is stale (different words-per-page or break style) and is regenerated.
pub fn render_all(
    renderer: &mut PageRenderer,
    pages: &[String],
    store: &SlugStore,
    force: bool,
) -> RenderResult<Vec<PathBuf>> {
    let existing = existing_pages(store)?;

    if !force && !pages.is_empty() && existing.len() == pages.len() {
        tracing::info!(count = existing.len(), "Reusing existing wallpaper pages");
        return Ok(existing);
    }

    if !existing.is_empty() {
        if existing.len() != pages.len() {
            tracing::warn!(
                found = existing.len(),
                expected = pages.len(),
                "Existing page images do not match current pagination, re-rendering"
            );
        }
        for stale in &existing {
            fs::remove_file(stale)?;
        }
    }

    tracing::info!(pages = pages.len(), "Rendering wallpaper pages");
    let mut paths = Vec::with_capacity(pages.len());
    for (idx, page_text) in pages.iter().enumerate() {
        let path = store.page_path(idx);
        tracing::debug!(path = %path.display(), "Rendering page");
        let pixmap = renderer.render_page(page_text)?;
        save_png(&pixmap, &path)?;
        paths.push(path);
    }

    Ok(paths)
}

/// Sorted list of already-rendered page images for a slug.
pub fn existing_pages(store: &SlugStore) -> RenderResult<Vec<PathBuf>> {
    let dir = store.pages_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("page_") && n.ends_with(".png"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"png").unwrap();
    }

    #[test]
    fn test_existing_pages_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlugStore::new(dir.path(), "test");

        assert!(existing_pages(&store).unwrap().is_empty());

        touch(&store.page_path(2));
        touch(&store.page_path(0));
        touch(&store.page_path(1));
        touch(&store.pages_dir().join("notes.txt"));

        let pages = existing_pages(&store).unwrap();
        assert_eq!(
            pages,
            vec![store.page_path(0), store.page_path(1), store.page_path(2)]
        );
    }
}
