//! FFmpeg video filter construction.

use beatclip_models::{EncodingConfig, ExposureFilter};

/// Build the filter chain applied to every montage segment.
///
/// Order matters: the exposure look is applied first, then the segment is
/// normalized onto the shared canvas (scale preserving aspect, pad to the
/// canvas, square pixels, constant frame rate) so the concat demuxer sees
/// identical stream parameters across segments.
pub fn segment_filter(exposure: &ExposureFilter, encoding: &EncodingConfig) -> String {
    format!(
        "{},{}",
        exposure.to_eq_filter(),
        canvas_filter(
            encoding.canvas_width,
            encoding.canvas_height,
            encoding.canvas_fps
        )
    )
}

/// Normalization chain for a target canvas.
pub fn canvas_filter(width: u32, height: u32, fps: u32) -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,\
         pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,\
         setsar=1,fps={fps}",
        w = width,
        h = height,
        fps = fps
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_filter() {
        let filter = canvas_filter(1280, 720, 30);
        assert!(filter.contains("scale=1280:720"));
        assert!(filter.contains("pad=1280:720"));
        assert!(filter.contains("fps=30"));
        assert!(filter.contains("setsar=1"));
    }

    #[test]
    fn test_segment_filter_order() {
        let filter = segment_filter(&ExposureFilter::default(), &EncodingConfig::default());
        let eq_pos = filter.find("eq=").unwrap();
        let scale_pos = filter.find("scale=").unwrap();
        assert!(eq_pos < scale_pos, "exposure must precede normalization");
        assert!(filter.contains("brightness=-0.500"));
        assert!(filter.contains("contrast=0.300"));
    }
}
