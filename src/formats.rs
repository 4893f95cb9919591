//! Image format handling for the transcoding pipeline
//!
//! Input formats come from the decoder's container detection and are kept as a
//! closed set. Output formats carry the MIME type and extension that travel
//! with the encoded bytes.
use image::ImageFormat;
use std::fmt;

/// Format reported by the decoder for an input image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedFormat {
    Jpeg,
    Png,
    WebP,
    /// Any other container the decoder understood (GIF, BMP, TIFF, ...)
    Unknown,
}

impl DetectedFormat {
    /// Map the decoder's container tag into the closed set.
    pub fn from_image_format(format: Option<ImageFormat>) -> Self {
        match format {
            Some(ImageFormat::Jpeg) => DetectedFormat::Jpeg,
            Some(ImageFormat::Png) => DetectedFormat::Png,
            Some(ImageFormat::WebP) => DetectedFormat::WebP,
            _ => DetectedFormat::Unknown,
        }
    }

    /// Encoder branch for this format. Anything that is not PNG or WebP is
    /// written as JPEG, including formats that decoded fine but are not listed
    /// here. This is a lossy, format-changing fallback.
    pub fn output_format(&self) -> OutputFormat {
        match self {
            DetectedFormat::Png => OutputFormat::Png,
            DetectedFormat::WebP => OutputFormat::WebP,
            DetectedFormat::Jpeg | DetectedFormat::Unknown => OutputFormat::Jpeg,
        }
    }
}

impl fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectedFormat::Jpeg => "jpeg",
            DetectedFormat::Png => "png",
            DetectedFormat::WebP => "webp",
            DetectedFormat::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Supported output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JPEG via mozjpeg
    Jpeg,
    /// Palette-reduced PNG via imagequant and oxipng
    Png,
    /// Lossy WebP
    WebP,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    pub fn all_formats() -> Vec<OutputFormat> {
        vec![OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

/// File extension (with leading dot) for an output MIME type.
///
/// Kept as the inverse of [`OutputFormat::mime_type`]: PNG and WebP map to
/// their own extension, every other MIME type maps to `.jpg`.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => ".png",
        "image/webp" => ".webp",
        _ => ".jpg",
    }
}
