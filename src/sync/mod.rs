//! Sync orchestrator: one full rebuild of the content tree.
//!
//! Stages run in a fixed order and map onto [`SyncState`]:
//! 1. `FetchingCatalog`: folder listing, then the bulk photo listing. A failure
//!    here ends the run before anything on disk is touched.
//! 2. `BuildingSkeleton`: reset the root, create directories, write indices.
//!    A failure here ends the run and leaves whatever was written so far.
//! 3. `EnrichingPhotos`: for each listed photo, strictly one at a time and in
//!    listing order, fetch its details and write them. A failed write is
//!    logged and skipped; a failed fetch follows [`DetailFailurePolicy`].

pub mod error;

pub use error::SyncError;

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::catalog::CatalogFetcher;
use crate::model::Photo;
use crate::tree::ContentTreeWriter;
use crate::types::DetailFailurePolicy;

/// Default cutoff of the bulk photo listing.
pub const DEFAULT_MAX_RESULTS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    FetchingCatalog,
    BuildingSkeleton,
    EnrichingPhotos,
    Done,
    Failed,
}

/// Subset of application config consumed by the orchestrator.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub max_results: u32,
    pub on_detail_error: DetailFailurePolicy,
    pub no_progress_bar: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            on_detail_error: DetailFailurePolicy::Skip,
            no_progress_bar: false,
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub folders: usize,
    pub photos: usize,
    pub rejected_records: usize,
    pub details_written: usize,
    pub fetch_failures: usize,
    pub write_failures: usize,
    pub elapsed: Duration,
}

pub struct SyncOrchestrator {
    fetcher: CatalogFetcher,
    writer: ContentTreeWriter,
    options: SyncOptions,
    state: SyncState,
}

/// Create a progress bar with a consistent template.
///
/// Hidden when disabled or when stdout is not a TTY.
fn create_progress_bar(no_progress_bar: bool, total: u64) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .expect("valid template")
        .progress_chars("=> "),
    );
    pb
}

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {:02}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

impl SyncOrchestrator {
    pub fn new(fetcher: CatalogFetcher, writer: ContentTreeWriter, options: SyncOptions) -> Self {
        Self {
            fetcher,
            writer,
            options,
            state: SyncState::Idle,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    fn transition(&mut self, next: SyncState) {
        debug!(from = ?self.state, to = ?next, "sync state");
        self.state = next;
    }

    /// Run the whole pipeline once.
    ///
    /// Returns the report once every listed photo has been attempted, however
    /// many were skipped.
    pub async fn run(&mut self) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        match self.run_stages().await {
            Ok(mut report) => {
                report.elapsed = started.elapsed();
                self.transition(SyncState::Done);
                log_summary(&report);
                Ok(report)
            }
            Err(e) => {
                error!("Sync failed during {:?}: {}", self.state, e);
                self.transition(SyncState::Failed);
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        self.transition(SyncState::FetchingCatalog);
        info!("Fetching catalog...");
        let folders = self.fetcher.fetch_folders().await?;
        let listing = self.fetcher.fetch_all_photos(self.options.max_results).await?;
        report.folders = folders.len();
        report.photos = listing.photos.len();
        report.rejected_records = listing.rejected;
        info!(
            "Catalog has {} folders and {} photos",
            report.folders, report.photos
        );
        if listing.photos.len() + listing.rejected >= self.options.max_results as usize {
            warn!(
                "Photo listing reached the cutoff of {}; photos beyond it are not synced",
                self.options.max_results
            );
        }

        self.transition(SyncState::BuildingSkeleton);
        info!("Rebuilding {}", self.writer.root().display());
        self.writer.reset_root().await?;
        self.writer.create_album_directories(&folders).await?;
        self.writer
            .write_album_indices(&folders, &listing.photos)
            .await?;

        self.transition(SyncState::EnrichingPhotos);
        info!("Enriching {} photos...", listing.photos.len());
        self.enrich_photos(&listing.photos, &mut report).await?;

        Ok(report)
    }

    /// Fetch and write each photo's details, one at a time.
    async fn enrich_photos(
        &self,
        photos: &[Photo],
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let pb = create_progress_bar(self.options.no_progress_bar, photos.len() as u64);

        for photo in photos {
            pb.set_message(photo.public_id.clone());

            let detail = match self.fetcher.fetch_photo_detail(&photo.public_id).await {
                Ok(detail) => detail,
                Err(e) => match self.options.on_detail_error {
                    DetailFailurePolicy::Skip => {
                        pb.suspend(|| warn!(public_id = e.public_id(), "Skipping photo: {}", e));
                        report.fetch_failures += 1;
                        pb.inc(1);
                        continue;
                    }
                    DetailFailurePolicy::Abort => {
                        pb.finish_and_clear();
                        return Err(e.into());
                    }
                },
            };

            match self.writer.write_photo_detail(&detail).await {
                Ok(_) => report.details_written += 1,
                Err(e) => {
                    pb.suspend(|| warn!("Skipping {}: {}", photo.public_id, e));
                    report.write_failures += 1;
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(())
    }
}

fn log_summary(report: &SyncReport) {
    info!("── Summary ──");
    info!(
        "  {} folders, {} photos ({} rejected records)",
        report.folders, report.photos, report.rejected_records
    );
    info!(
        "  {} written, {} fetch failures, {} write failures",
        report.details_written, report.fetch_failures, report.write_failures
    );
    info!("  elapsed: {}", format_duration(report.elapsed));
}
