//! Presentation helpers for callers reporting a transcode result.
//!
//! The pipeline only reports byte counts; turning them into a size label or a
//! reduction figure is left to whoever renders the result.

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Whole-percent reduction, `round((1 - new / original) * 100)`.
///
/// Negative when the output grew. Zero for an empty original.
pub fn reduction_percent(original_size: u64, new_size: u64) -> i64 {
    if original_size == 0 {
        return 0;
    }
    ((1.0 - new_size as f64 / original_size as f64) * 100.0).round() as i64
}
