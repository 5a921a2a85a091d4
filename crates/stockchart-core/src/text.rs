// File: crates/stockchart-core/src/text.rs
// Summary: Font resolution (direct files, system discovery, built-in fallback) and text drawing.
// Notes:
// - Resolution never fails: when no candidate loads, the built-in bitmap face is used.
// - One `GlyphSource` exists per distinct candidate list for the life of the process.
//   The registry lock only guards the map; the face itself is initialized once through
//   a `OnceCell`, so concurrent first callers wait for a single load and later reads
//   take no lock.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fontdue::{Font, FontSettings};
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, trace};

use crate::builtin_font;
use crate::canvas::{PixelCanvas, Rgba};

/// Glyph coverage at or above this value is painted; below it is skipped (no anti-aliasing).
const COVERAGE_THRESHOLD: u8 = 128;

/// One way of finding a typeface, tried in list order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontCandidate {
    /// Tried as a file path first, then as a family name.
    Name(String),
    /// A font file on disk.
    File(PathBuf),
    /// A family name looked up through system font discovery.
    Family(String),
    /// Extra directory whose fonts join the discovery database.
    Directory(PathBuf),
    /// Font bytes compiled into the caller.
    Embedded(&'static [u8]),
}

impl From<&str> for FontCandidate {
    fn from(s: &str) -> Self { Self::Name(s.to_string()) }
}

impl From<String> for FontCandidate {
    fn from(s: String) -> Self { Self::Name(s) }
}

impl std::fmt::Display for FontCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name:{name}"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Family(name) => write!(f, "family:{name}"),
            Self::Directory(dir) => write!(f, "dir:{}", dir.display()),
            Self::Embedded(bytes) => write!(f, "embedded:{} bytes", bytes.len()),
        }
    }
}

enum Face {
    Outline(Box<Font>),
    Builtin,
}

pub struct GlyphSource {
    candidates: Vec<FontCandidate>,
    face: OnceCell<Face>,
}

static REGISTRY: Lazy<Mutex<HashMap<Vec<FontCandidate>, Arc<GlyphSource>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

impl GlyphSource {
    /// Shared source for `candidates`, resolved on first use and cached process-wide.
    pub fn resolve(candidates: &[FontCandidate]) -> Arc<GlyphSource> {
        let source = {
            let mut registry = REGISTRY.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            registry
                .entry(candidates.to_vec())
                .or_insert_with(|| {
                    Arc::new(GlyphSource { candidates: candidates.to_vec(), face: OnceCell::new() })
                })
                .clone()
        };
        source.face();
        source
    }

    /// Source that always renders with the built-in bitmap face.
    pub fn builtin() -> Arc<GlyphSource> {
        Self::resolve(&[])
    }

    fn face(&self) -> &Face {
        self.face.get_or_init(|| load_face(&self.candidates))
    }

    /// True when every candidate failed and the built-in face is in use.
    pub fn is_fallback(&self) -> bool {
        matches!(self.face(), Face::Builtin)
    }

    /// Advance width of `text` at `px` pixels, rounded to whole pixels.
    pub fn measure(&self, text: &str, px: f32) -> i32 {
        match self.face() {
            Face::Outline(font) => {
                let w: f32 = text.chars().map(|ch| font.metrics(ch, px).advance_width).sum();
                w.round() as i32
            }
            Face::Builtin => {
                let n = text.chars().count() as i32;
                n.saturating_mul(builtin_font::ADVANCE * builtin_font::scale_for(px))
            }
        }
    }

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    pub fn draw_text(&self, canvas: &mut PixelCanvas, text: &str, x: i32, baseline: i32, px: f32, color: Rgba) {
        match self.face() {
            Face::Outline(font) => {
                let mut pen = x as f32;
                for ch in text.chars() {
                    let (m, coverage) = font.rasterize(ch, px);
                    let left = pen.round() as i32 + m.xmin;
                    let top = baseline - m.height as i32 - m.ymin;
                    for (i, &c) in coverage.iter().enumerate() {
                        if c >= COVERAGE_THRESHOLD {
                            let col = (i % m.width.max(1)) as i32;
                            let row = (i / m.width.max(1)) as i32;
                            canvas.set_pixel(left + col, top + row, color);
                        }
                    }
                    pen += m.advance_width;
                }
            }
            Face::Builtin => {
                let s = builtin_font::scale_for(px);
                let top = baseline - builtin_font::GLYPH_ROWS * s;
                let mut pen = x;
                for ch in text.chars() {
                    builtin_font::for_each_lit(ch, |col, row| {
                        canvas.fill_rect(pen + col * s, top + row * s, s, s, color);
                    });
                    pen = pen.saturating_add(builtin_font::ADVANCE * s);
                }
            }
        }
    }

    /// Draw `text` horizontally centered on `cx`.
    pub fn draw_text_centered(&self, canvas: &mut PixelCanvas, text: &str, cx: i32, baseline: i32, px: f32, color: Rgba) {
        let w = self.measure(text, px);
        self.draw_text(canvas, text, cx - w / 2, baseline, px, color);
    }

    /// Draw `text` so that it ends at `right`.
    pub fn draw_text_right(&self, canvas: &mut PixelCanvas, text: &str, right: i32, baseline: i32, px: f32, color: Rgba) {
        let w = self.measure(text, px);
        self.draw_text(canvas, text, right - w, baseline, px, color);
    }
}

fn load_face(candidates: &[FontCandidate]) -> Face {
    // direct pass: files and embedded bytes
    for candidate in candidates {
        let loaded = match candidate {
            FontCandidate::File(path) => load_file(path),
            FontCandidate::Name(name) => load_file(Path::new(name)),
            FontCandidate::Embedded(bytes) => parse(bytes, 0),
            FontCandidate::Family(_) | FontCandidate::Directory(_) => continue,
        };
        match loaded {
            Ok(font) => {
                debug!(%candidate, "loaded font directly");
                return Face::Outline(Box::new(font));
            }
            Err(err) => trace!(%candidate, %err, "direct font load failed"),
        }
    }

    // discovery pass: family names against system fonts plus configured directories
    let families: Vec<&str> = candidates
        .iter()
        .filter_map(|c| match c {
            FontCandidate::Family(name) | FontCandidate::Name(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    if !families.is_empty() {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        for candidate in candidates {
            if let FontCandidate::Directory(dir) = candidate {
                db.load_fonts_dir(dir);
            }
        }
        debug!(faces = db.len(), "font discovery database ready");
        for name in families {
            let query = fontdb::Query { families: &[fontdb::Family::Name(name)], ..Default::default() };
            let Some(id) = db.query(&query) else {
                trace!(family = name, "family not found");
                continue;
            };
            match db.with_face_data(id, |data, index| parse(data, index)) {
                Some(Ok(font)) => {
                    debug!(family = name, "loaded font by family");
                    return Face::Outline(Box::new(font));
                }
                Some(Err(err)) => trace!(family = name, %err, "family face failed to parse"),
                None => trace!(family = name, "family face data unavailable"),
            }
        }
    }

    debug!(candidates = candidates.len(), "no font candidate loaded; using built-in face");
    Face::Builtin
}

fn load_file(path: &Path) -> Result<Font, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&bytes, 0)
}

fn parse(bytes: &[u8], collection_index: u32) -> Result<Font, String> {
    let settings = FontSettings { collection_index, ..FontSettings::default() };
    Font::from_bytes(bytes, settings).map_err(|e| e.to_string())
}
