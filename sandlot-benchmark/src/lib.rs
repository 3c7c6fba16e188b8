use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct GenerationMetrics {
    // Generation Stats
    pub total_levels_generated: AtomicUsize,
    pub total_generation_time_us: AtomicU64,
    pub max_generation_time_us: AtomicU64,
    pub total_cells_generated: AtomicUsize,

    // Per-pass Breakdown
    pub total_profile_us: AtomicU64,
    pub total_ground_us: AtomicU64, // ground fill and trees
    pub total_stone_us: AtomicU64,
    pub total_water_us: AtomicU64,

    // Level Files
    pub total_levels_encoded: AtomicUsize,
    pub total_encode_time_us: AtomicU64,
    pub total_levels_decoded: AtomicUsize,
    pub total_decode_time_us: AtomicU64,
    pub total_bytes_raw: AtomicUsize,
    pub total_bytes_compressed: AtomicUsize,

    // Editor
    pub total_edits_applied: AtomicUsize,
    pub total_edits_rejected: AtomicUsize,

    // Session
    pub start_time: Option<Instant>,
    pub config_summary: String,
}

impl GenerationMetrics {
    pub fn new(config_summary: String) -> Self {
        Self {
            start_time: Some(Instant::now()),
            config_summary,
            ..Default::default()
        }
    }

    pub fn record_generation(&self, duration: Duration, cells: usize) {
        self.total_levels_generated.fetch_add(1, Ordering::Relaxed);
        self.total_cells_generated.fetch_add(cells, Ordering::Relaxed);
        let us = duration.as_micros() as u64;
        self.total_generation_time_us.fetch_add(us, Ordering::Relaxed);
        self.max_generation_time_us.fetch_max(us, Ordering::Relaxed);
    }

    pub fn record_profile(&self, duration: Duration) {
        self.total_profile_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_ground(&self, duration: Duration) {
        self.total_ground_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_stone(&self, duration: Duration) {
        self.total_stone_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_water(&self, duration: Duration) {
        self.total_water_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_encode(&self, duration: Duration, raw: usize, compressed: usize) {
        self.total_levels_encoded.fetch_add(1, Ordering::Relaxed);
        self.total_encode_time_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.total_bytes_raw.fetch_add(raw, Ordering::Relaxed);
        self.total_bytes_compressed.fetch_add(compressed, Ordering::Relaxed);
    }

    pub fn record_decode(&self, duration: Duration) {
        self.total_levels_decoded.fetch_add(1, Ordering::Relaxed);
        self.total_decode_time_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_edit(&self, applied: bool) {
        if applied {
            self.total_edits_applied.fetch_add(1, Ordering::Relaxed);
        } else {
            self.total_edits_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn generate_report(&self) -> String {
        let uptime = self.start_time.unwrap_or_else(Instant::now).elapsed();
        let generated = self.total_levels_generated.load(Ordering::Relaxed);
        let gen_time_total =
            self.total_generation_time_us.load(Ordering::Relaxed) as f64 / 1000.0; // ms
        let gen_max = self.max_generation_time_us.load(Ordering::Relaxed) as f64 / 1000.0; // ms
        let gen_avg = if generated > 0 { gen_time_total / generated as f64 } else { 0.0 };
        let cells = self.total_cells_generated.load(Ordering::Relaxed);
        let cells_per_ms = if gen_time_total > 0.0 { cells as f64 / gen_time_total } else { 0.0 };

        let profile_time = self.total_profile_us.load(Ordering::Relaxed) as f64 / 1000.0;
        let ground_time = self.total_ground_us.load(Ordering::Relaxed) as f64 / 1000.0;
        let stone_time = self.total_stone_us.load(Ordering::Relaxed) as f64 / 1000.0;
        let water_time = self.total_water_us.load(Ordering::Relaxed) as f64 / 1000.0;

        let profile_avg = if generated > 0 { profile_time / generated as f64 } else { 0.0 };
        let ground_avg = if generated > 0 { ground_time / generated as f64 } else { 0.0 };
        let stone_avg = if generated > 0 { stone_time / generated as f64 } else { 0.0 };
        let water_avg = if generated > 0 { water_time / generated as f64 } else { 0.0 };

        let encoded = self.total_levels_encoded.load(Ordering::Relaxed);
        let encode_time = self.total_encode_time_us.load(Ordering::Relaxed) as f64 / 1000.0;
        let encode_avg = if encoded > 0 { encode_time / encoded as f64 } else { 0.0 };

        let decoded = self.total_levels_decoded.load(Ordering::Relaxed);
        let decode_time = self.total_decode_time_us.load(Ordering::Relaxed) as f64 / 1000.0;
        let decode_avg = if decoded > 0 { decode_time / decoded as f64 } else { 0.0 };

        let raw = self.total_bytes_raw.load(Ordering::Relaxed);
        let compressed = self.total_bytes_compressed.load(Ordering::Relaxed);
        let compression_ratio = if compressed > 0 { raw as f64 / compressed as f64 } else { 0.0 };

        let applied = self.total_edits_applied.load(Ordering::Relaxed);
        let rejected = self.total_edits_rejected.load(Ordering::Relaxed);

        format!(
            "Sandlot Generation Report\n\
             =========================\n\
             Configuration: {}\n\
             Session Duration: {:.2?}\n\n\
             [Generation]\n\
             Levels Generated: {}\n\
             Cells Generated: {}\n\
             Total Time: {:.2} ms\n\
             Avg Time: {:.2} ms/level\n\
             Max Time: {:.2} ms\n\
             Throughput: {:.0} cells/ms\n\
               - Pass Breakdown:\n\
                 * Height Profile: {:.2} ms\n\
                 * Ground and Trees: {:.2} ms\n\
                 * Stone Layer: {:.2} ms\n\
                 * Water: {:.2} ms\n\n\
             [Level Files]\n\
             Encoded: {} (avg {:.2} ms)\n\
             Decoded: {} (avg {:.2} ms)\n\
             Compression Ratio: {:.2}x ({:.1} KB -> {:.1} KB)\n\n\
             [Editor]\n\
             Edits Applied: {}\n\
             Edits Rejected: {}\n",
            self.config_summary,
            uptime,
            generated, cells, gen_time_total, gen_avg, gen_max, cells_per_ms,
            profile_avg, ground_avg, stone_avg, water_avg,
            encoded, encode_avg,
            decoded, decode_avg,
            compression_ratio, raw as f64 / 1024.0, compressed as f64 / 1024.0,
            applied, rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_generation_tracks_max() {
        let metrics = GenerationMetrics::new("test".to_string());
        metrics.record_generation(Duration::from_micros(300), 100);
        metrics.record_generation(Duration::from_micros(900), 100);
        metrics.record_generation(Duration::from_micros(100), 50);

        assert_eq!(metrics.total_levels_generated.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.total_cells_generated.load(Ordering::Relaxed), 250);
        assert_eq!(metrics.total_generation_time_us.load(Ordering::Relaxed), 1300);
        assert_eq!(metrics.max_generation_time_us.load(Ordering::Relaxed), 900);
    }

    #[test]
    fn test_pass_timings_reported_separately() {
        let metrics = GenerationMetrics::default();
        metrics.record_generation(Duration::from_millis(10), 100);
        metrics.record_ground(Duration::from_millis(2));
        metrics.record_stone(Duration::from_millis(3));
        metrics.record_water(Duration::from_millis(4));

        assert_eq!(metrics.total_ground_us.load(Ordering::Relaxed), 2000);
        assert_eq!(metrics.total_stone_us.load(Ordering::Relaxed), 3000);
        let report = metrics.generate_report();
        assert!(report.contains("* Ground and Trees: 2.00 ms"));
        assert!(report.contains("* Stone Layer: 3.00 ms"));
        assert!(report.contains("* Water: 4.00 ms"));
    }

    #[test]
    fn test_record_edit_splits_applied_and_rejected() {
        let metrics = GenerationMetrics::default();
        metrics.record_edit(true);
        metrics.record_edit(true);
        metrics.record_edit(false);

        assert_eq!(metrics.total_edits_applied.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.total_edits_rejected.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_report_without_activity() {
        // No division by zero when nothing was recorded
        let metrics = GenerationMetrics::new("width=10 height=10".to_string());
        let report = metrics.generate_report();
        assert!(report.contains("Configuration: width=10 height=10"));
        assert!(report.contains("Levels Generated: 0"));
        assert!(report.contains("Compression Ratio: 0.00x"));
    }

    #[test]
    fn test_report_compression_ratio() {
        let metrics = GenerationMetrics::default();
        metrics.record_encode(Duration::from_millis(1), 4096, 1024);
        let report = metrics.generate_report();
        assert!(report.contains("Compression Ratio: 4.00x (4.0 KB -> 1.0 KB)"));
    }
}
