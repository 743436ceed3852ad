// file: src/runner/progress.rs
// description: progress tracking and statistics reporting for bulk runs
// reference: uses indicatif for progress bars and tracks per-repository outcomes

use crate::models::Outcome;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub repos_updated: usize,
    pub repos_skipped: usize,
    pub repos_failed: usize,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.repos_updated + self.repos_skipped + self.repos_failed
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        ((total - self.repos_failed) as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    updated: Arc<AtomicUsize>,
    skipped: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_repos: usize) -> Self {
        Self::with_color(total_repos, true)
    }

    pub fn with_color(total_repos: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_repos as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            updated: Arc::new(AtomicUsize::new(0)),
            skipped: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn record_outcome(&self, outcome: &Outcome) {
        if outcome.is_updated() {
            self.updated.fetch_add(1, Ordering::SeqCst);
        } else {
            self.skipped.fetch_add(1, Ordering::SeqCst);
        }
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Run complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> RunStats {
        let duration = self.start_time.elapsed().as_secs();

        RunStats {
            repos_updated: self.updated.load(Ordering::SeqCst),
            repos_skipped: self.skipped.load(Ordering::SeqCst),
            repos_failed: self.failed.load(Ordering::SeqCst),
            duration_secs: duration,
        }
    }

    fn update_detail_bar(&self) {
        let updated = self.updated.load(Ordering::SeqCst);
        let skipped = self.skipped.load(Ordering::SeqCst);
        let failed = self.failed.load(Ordering::SeqCst);

        let message = format!(
            "Updated: {} | Skipped: {} | Failed: {}",
            updated, skipped, failed
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_success_rate() {
        let mut stats = RunStats::new();
        stats.repos_updated = 80;
        stats.repos_skipped = 10;
        stats.repos_failed = 10;

        assert_eq!(stats.total(), 100);
        assert!((stats.success_rate() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_stats_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_records_outcomes() {
        let tracker = ProgressTracker::with_color(10, false);

        tracker.record_outcome(&Outcome::Updated { commit_url: None });
        tracker.record_outcome(&Outcome::SkippedNoChange);
        tracker.record_failure();

        let stats = tracker.get_stats();
        assert_eq!(stats.repos_updated, 1);
        assert_eq!(stats.repos_skipped, 1);
        assert_eq!(stats.repos_failed, 1);
    }
}
