//! Output file naming

/// Name of a materialized file: zero-padded frame index, `_`, sensor suffix.
///
/// ```
/// assert_eq!(
///     materializer::output_file_name(7, 8, "rgb_gray_img.png"),
///     "00000007_rgb_gray_img.png"
/// );
/// ```
pub fn output_file_name(frame_index: u64, width: usize, suffix: &str) -> String {
    format!("{frame_index:0width$}_{suffix}")
}
