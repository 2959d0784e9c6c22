use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    foundation::math::Fnv1a64,
    text::builtin::BuiltinFont,
    text::engine::TextEngine,
};

/// Latin + kana + kanji sample every outline candidate must shape without `.notdef`.
pub const COVERAGE_TEXT: &str = "Hg あア漢";

/// Family names queried in the system font database when no candidate file covers
/// [`COVERAGE_TEXT`].
pub const SYSTEM_FALLBACK_FAMILIES: &[&str] = &[
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "Source Han Sans JP",
    "Source Han Sans",
    "Hiragino Sans",
    "Hiragino Kaku Gothic ProN",
    "Yu Gothic",
    "Meiryo",
    "MS Gothic",
    "WenQuanYi Micro Hei",
    "Droid Sans Fallback",
    "Arial Unicode MS",
];

#[cfg(target_os = "linux")]
const PLATFORM_FALLBACK_FILES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
];

#[cfg(target_os = "macos")]
const PLATFORM_FALLBACK_FILES: &[&str] = &[
    "/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
];

#[cfg(target_os = "windows")]
const PLATFORM_FALLBACK_FILES: &[&str] = &[
    "C:\\Windows\\Fonts\\meiryob.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothB.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const PLATFORM_FALLBACK_FILES: &[&str] = &[];

/// Raw outline font data (TTF/OTF/TTC face) that passed the coverage check.
#[derive(Clone)]
pub struct OutlineFace {
    /// Font file bytes.
    pub data: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Family name to request from the layout engine, when known up front.
    pub family_hint: Option<String>,
    /// Human-readable origin, e.g. a file path or `system:<family>`.
    pub origin: String,
    fingerprint: u64,
}

impl OutlineFace {
    pub fn new(data: Vec<u8>, index: u32, family_hint: Option<String>, origin: String) -> Self {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_bytes(&data);
        hasher.write_u32(index);
        Self {
            data: Arc::new(data),
            index,
            family_hint,
            origin,
            fingerprint: hasher.finish(),
        }
    }

    /// Stable identity of the face bytes, used to key per-engine registrations.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("origin", &self.origin)
            .field("index", &self.index)
            .field("family_hint", &self.family_hint)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Glyph source behind a [`CaptionFont`].
#[derive(Clone, Debug)]
pub enum FontFace {
    /// Shaped by the text layout engine and rasterized from outlines.
    Outline(OutlineFace),
    /// The built-in bitmap font.
    Builtin(BuiltinFont),
}

/// A font resolved for one pixel size.
#[derive(Clone, Debug)]
pub struct CaptionFont {
    /// Pixel size the font was resolved for.
    pub size_px: f32,
    /// Glyph source.
    pub face: FontFace,
}

impl CaptionFont {
    pub fn builtin(size_px: f32) -> Self {
        Self {
            size_px,
            face: FontFace::Builtin(BuiltinFont::new(size_px)),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin(_))
    }

    pub fn origin(&self) -> &str {
        match &self.face {
            FontFace::Outline(o) => &o.origin,
            FontFace::Builtin(_) => "builtin:5x7",
        }
    }
}

/// One link of the font fallback chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontCandidate {
    /// A font file on disk (face 0).
    File(PathBuf),
    /// First installed family among these names, via the system font database.
    SystemFamilies(Vec<String>),
    /// The built-in bitmap font; always succeeds.
    Builtin,
}

impl FontCandidate {
    fn describe(&self) -> String {
        match self {
            Self::File(p) => p.display().to_string(),
            Self::SystemFamilies(_) => "system font database".to_string(),
            Self::Builtin => "builtin".to_string(),
        }
    }

    /// Load the candidate and check it can render [`COVERAGE_TEXT`].
    fn load(&self, size_px: f32) -> ComposeResult<CaptionFont> {
        let face = match self {
            Self::File(path) => load_file(path, size_px)?,
            Self::SystemFamilies(names) => load_system(names, size_px)?,
            Self::Builtin => return Ok(CaptionFont::builtin(size_px)),
        };
        Ok(CaptionFont {
            size_px,
            face: FontFace::Outline(face),
        })
    }
}

fn load_file(path: &Path, size_px: f32) -> ComposeResult<OutlineFace> {
    if !path.is_file() {
        return Err(ComposeError::asset_load(path, "font file does not exist"));
    }
    let data = std::fs::read(path).map_err(|e| ComposeError::asset_load(path, e))?;
    let face = OutlineFace::new(data, 0, None, path.display().to_string());
    check_coverage(&face, size_px).map_err(|e| ComposeError::asset_load(path, e))?;
    Ok(face)
}

fn load_system(names: &[String], size_px: f32) -> ComposeResult<OutlineFace> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    for name in names {
        let families = [fontdb::Family::Name(name)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        let Some((data, index)) = db.with_face_data(id, |data, index| (data.to_vec(), index))
        else {
            continue;
        };
        let face = OutlineFace::new(data, index, Some(name.clone()), format!("system:{name}"));
        match check_coverage(&face, size_px) {
            Ok(()) => return Ok(face),
            Err(reason) => tracing::debug!(family = %name, %reason, "system font lacks coverage"),
        }
    }
    Err(ComposeError::render(
        "no installed system font covers the coverage text",
    ))
}

fn check_coverage(face: &OutlineFace, size_px: f32) -> Result<(), String> {
    // Fresh engine: the face must cover the sample on its own, with nothing to fall back to.
    let mut engine = TextEngine::new();
    match engine.covers(face, size_px, COVERAGE_TEXT) {
        Ok(true) => Ok(()),
        Ok(false) => Err("font lacks glyphs for the Latin/CJK coverage text".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Ordered font fallback chain; the first candidate covering the sample text wins.
#[derive(Clone, Debug)]
pub struct FontResolver {
    candidates: Vec<FontCandidate>,
}

impl FontResolver {
    /// Chain: `primary`, platform multi-script font files, system database, built-in.
    pub fn new(primary: Option<PathBuf>) -> Self {
        let mut candidates = Vec::new();
        if let Some(p) = primary {
            candidates.push(FontCandidate::File(p));
        }
        candidates.extend(
            PLATFORM_FALLBACK_FILES
                .iter()
                .map(|p| FontCandidate::File(PathBuf::from(p))),
        );
        candidates.push(FontCandidate::SystemFamilies(
            SYSTEM_FALLBACK_FAMILIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ));
        Self::with_candidates(candidates)
    }

    /// Explicit chain. [`FontCandidate::Builtin`] is appended when missing so resolution can
    /// never fail.
    pub fn with_candidates(mut candidates: Vec<FontCandidate>) -> Self {
        candidates.retain(|c| *c != FontCandidate::Builtin);
        candidates.push(FontCandidate::Builtin);
        Self { candidates }
    }

    pub fn candidates(&self) -> &[FontCandidate] {
        &self.candidates
    }

    /// Resolve a font for `size_px`. Never fails; falling back past the first candidate logs a
    /// degradation warning.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, size_px: f32) -> CaptionFont {
        for (i, candidate) in self.candidates.iter().enumerate() {
            match candidate.load(size_px) {
                Ok(font) => {
                    if font.is_builtin() {
                        tracing::warn!(
                            "font resolution degraded: no candidate font renders Latin+CJK, using built-in bitmap font"
                        );
                    } else if i > 0 {
                        tracing::warn!(
                            font = font.origin(),
                            "font resolution degraded: primary font unusable, using fallback"
                        );
                    } else {
                        tracing::debug!(font = font.origin(), "resolved caption font");
                    }
                    return font;
                }
                Err(e) => {
                    tracing::debug!(candidate = %candidate.describe(), error = %e, "font candidate rejected");
                }
            }
        }
        CaptionFont::builtin(size_px)
    }
}

/// Process-wide memo of resolved fonts keyed by pixel size.
///
/// Owned by the compositor and shared by reference with every composition; each size is resolved
/// at most once.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: Mutex<HashMap<u32, CaptionFont>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_resolve(&self, resolver: &FontResolver, size_px: f32) -> CaptionFont {
        let mut fonts = self.fonts.lock().unwrap_or_else(PoisonError::into_inner);
        fonts
            .entry(size_px.to_bits())
            .or_insert_with(|| resolver.resolve(size_px))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.fonts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
