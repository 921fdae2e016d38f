//! Media file helpers
//!
//! Size and MIME checks for the QR-from-video picker.

/// Largest video file the QR generator accepts
pub const MAX_VIDEO_SIZE: u64 = 100 * 1024 * 1024;

/// Whether a MIME type denotes a video file
pub fn is_video_mime(mime: &str) -> bool {
    mime.starts_with("video/")
}

/// Whether `size` fits within `max` bytes
pub fn is_file_size_valid(size: u64, max: u64) -> bool {
    size <= max
}

/// Human-readable file size: bytes below 1 KiB, otherwise two-decimal
/// KB/MB
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn test_video_mime_detection() {
        assert!(is_video_mime("video/mp4"));
        assert!(is_video_mime("video/webm"));
        assert!(!is_video_mime("image/png"));
        assert!(!is_video_mime(""));
    }

    #[test]
    fn test_size_limit() {
        assert!(is_file_size_valid(MAX_VIDEO_SIZE, MAX_VIDEO_SIZE));
        assert!(!is_file_size_valid(MAX_VIDEO_SIZE + 1, MAX_VIDEO_SIZE));
    }
}
