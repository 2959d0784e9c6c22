//! postcraft composes short marketing captions onto background images for social posts.
//!
//! One composition takes a background and a caption and writes a finished PNG:
//!
//! - the background is normalized to opaque RGB and scaled-and-cropped up to the target canvas
//! - a font able to render mixed Latin/CJK text is picked from a fallback chain
//! - the caption is wrapped per word (Latin) or per character (CJK) to 65% of the image width
//! - the text block is drawn centered on a semi-transparent panel, then overlays are pasted
//!
//! The batch driver applies this across a caption list with cyclic background selection, and
//! the content assembler pairs the outputs with product data into post payloads.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod content;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod text;

pub use crate::assets::backgrounds::{BackgroundAsset, BackgroundSet};
pub use crate::compose::batch::{
    BatchFailure, BatchOptions, BatchReport, compose_all, compose_all_with_report,
};
pub use crate::compose::compositor::{ComposeSettings, Compositor, output_path};
pub use crate::content::assemble::{PAYLOAD_FILE_NAME, PostPayload, Product, assemble_posts};
pub use crate::foundation::config::ComposeConfig;
pub use crate::foundation::error::{ComposeError, ComposeResult};
pub use crate::layout::wrap::{TextLayout, TextMeasure, layout};
pub use crate::text::engine::TextEngine;
pub use crate::text::font::{CaptionFont, FontCache, FontCandidate, FontResolver};
pub use crate::text::script::{WrapStrategy, is_cjk};
