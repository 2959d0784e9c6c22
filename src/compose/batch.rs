use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    assets::backgrounds::BackgroundSet,
    compose::compositor::{Compositor, output_path},
    foundation::error::{ComposeError, ComposeResult},
    text::engine::TextEngine,
};

/// How a batch is scheduled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Compose on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide. Must be >= 1 when set.
    pub threads: Option<usize>,
}

/// One caption that produced no output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchFailure {
    /// Zero-based caption index.
    pub index: usize,
    /// Rendered error message.
    pub error: String,
}

/// Outcome of a batch: written files in caption order, plus the skipped items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outputs: Vec<PathBuf>,
    /// Failed captions, by ascending index.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// One slot per caption: the written file for caption `i`, or `None` when it failed.
    pub fn outputs_by_index(&self) -> Vec<Option<PathBuf>> {
        let count = self.outputs.len() + self.failures.len();
        let mut written = self.outputs.iter();
        (0..count)
            .map(|i| {
                if self.failures.iter().any(|f| f.index == i) {
                    None
                } else {
                    written.next().cloned()
                }
            })
            .collect()
    }
}

/// Compose every caption sequentially and return the written paths in caption order.
///
/// Caption `i` uses background `i mod len` and writes `composed_<i + 1>.png`. Failed items are
/// logged and left out.
pub fn compose_all(
    compositor: &Compositor,
    backgrounds: &BackgroundSet,
    captions: &[String],
) -> ComposeResult<Vec<PathBuf>> {
    compose_all_with_report(compositor, backgrounds, captions, &BatchOptions::default())
        .map(|report| report.outputs)
}

/// [`compose_all`] with scheduling options and the list of failed indices.
///
/// An empty background set fails the whole call before any item is attempted. Parallel and
/// sequential runs write identical files and return identical reports.
#[tracing::instrument(skip_all, fields(captions = captions.len(), parallel = options.parallel))]
pub fn compose_all_with_report(
    compositor: &Compositor,
    backgrounds: &BackgroundSet,
    captions: &[String],
    options: &BatchOptions,
) -> ComposeResult<BatchReport> {
    if backgrounds.is_empty() {
        return Err(ComposeError::no_backgrounds(backgrounds.source()));
    }
    if captions.iter().any(|c| !c.trim().is_empty()) {
        // Resolve once up front so workers never race on the first lookup.
        let font = compositor.font();
        tracing::info!(font = font.origin(), size_px = font.size_px, "caption font ready");
    }

    let results: Vec<ComposeResult<PathBuf>> = if options.parallel {
        let pool = build_thread_pool(options.threads)?;
        pool.install(|| {
            captions
                .par_iter()
                .enumerate()
                .map_init(TextEngine::new, |engine, (index, caption)| {
                    compose_item(compositor, engine, backgrounds, index, caption)
                })
                .collect()
        })
    } else {
        let mut engine = TextEngine::new();
        captions
            .iter()
            .enumerate()
            .map(|(index, caption)| {
                compose_item(compositor, &mut engine, backgrounds, index, caption)
            })
            .collect()
    };

    let mut report = BatchReport::default();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(path) => report.outputs.push(path),
            Err(e) => {
                tracing::error!(index, error = %e, "composition failed, item skipped");
                report.failures.push(BatchFailure {
                    index,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        composed = report.outputs.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    Ok(report)
}

fn compose_item(
    compositor: &Compositor,
    engine: &mut TextEngine,
    backgrounds: &BackgroundSet,
    index: usize,
    caption: &str,
) -> ComposeResult<PathBuf> {
    let background = backgrounds.select(index)?;
    let output = output_path(&compositor.settings().output_dir, index);
    compositor.compose(engine, &background.path, caption, &output)
}

fn build_thread_pool(threads: Option<usize>) -> ComposeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ComposeError::config(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ComposeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/batch.rs"]
mod tests;
