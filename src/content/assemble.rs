//! Pairing of captions, composed images and products into posting payloads.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    compose::compositor::output_path,
    foundation::error::{ComposeError, ComposeResult},
};

/// File name of the assembled payload list.
pub const PAYLOAD_FILE_NAME: &str = "posts_payload.json";

/// A product advertised next to a caption; one row of a `title,price,link,image` CSV file.
///
/// Columns match by header name. Missing columns and empty cells are empty strings; extra
/// columns are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub title: String,
    pub price: String,
    pub link: String,
    pub image: String,
}

/// One ready-to-post item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    /// Caption followed by the price and shop lines.
    pub text: String,
    /// Composed image, empty when none was available.
    pub image_path: String,
    pub product: Option<Product>,
}

impl PostPayload {
    pub fn new(caption: &str, image: Option<&Path>, product: Option<&Product>) -> Self {
        let (price, link) = product
            .map(|p| (p.price.as_str(), p.link.as_str()))
            .unwrap_or_default();
        Self {
            text: format!("{caption}\n\nPrice: {price}\nShop: {link}"),
            image_path: image.map(|p| p.display().to_string()).unwrap_or_default(),
            product: product.cloned(),
        }
    }
}

/// Read products from a CSV file with a header row. A missing file is not an error: it yields
/// no products.
pub fn load_products(path: &Path) -> ComposeResult<Vec<Product>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "product file not found, continuing without products");
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open products '{}'", path.display()))?;

    let mut products = Vec::new();
    for (row, record) in reader.deserialize::<Product>().enumerate() {
        let product = record.map_err(|e| {
            ComposeError::serde(format!("products '{}' row {}: {e}", path.display(), row + 1))
        })?;
        products.push(product);
    }
    tracing::info!(count = products.len(), path = %path.display(), "loaded products");
    Ok(products)
}

/// One payload per caption. `images[i]` belongs to caption `i` (`None` leaves the image path
/// empty); products are reused cyclically when there are fewer of them than captions.
pub fn assemble_posts(
    captions: &[String],
    images: &[Option<PathBuf>],
    products: &[Product],
) -> Vec<PostPayload> {
    let missing = (0..captions.len())
        .filter(|i| images.get(*i).is_none_or(Option::is_none))
        .count();
    if missing > 0 {
        tracing::warn!(missing, "captions without a composed image");
    }
    captions
        .iter()
        .enumerate()
        .map(|(i, caption)| {
            let image = images.get(i).and_then(Option::as_deref);
            PostPayload::new(caption, image, cyclic(products, i))
        })
        .collect()
}

fn cyclic<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        items.get(index % items.len())
    }
}

/// The composed image of each of `count` captions in `dir`: `composed_<i + 1>.png` when that file
/// exists, else `None`. Files beyond `count` (left over from longer runs) are ignored.
pub fn composed_images(dir: &Path, count: usize) -> Vec<Option<PathBuf>> {
    (0..count)
        .map(|i| Some(output_path(dir, i)).filter(|p| p.is_file()))
        .collect()
}

/// Write `posts` as pretty JSON, creating the parent directory.
pub fn write_payloads(path: &Path, posts: &[PostPayload]) -> ComposeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create payload dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(posts)?;
    std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(count = posts.len(), path = %path.display(), "saved post payloads");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/content/assemble.rs"]
mod tests;
