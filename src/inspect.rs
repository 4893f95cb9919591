use crate::config::OptimizerConfig;
use crate::error::{Result, TranscodeError};
use crate::formats::DetectedFormat;
use image::{DynamicImage, GenericImageView, ImageReader, Limits};
use std::io::Cursor;
use tracing::debug;

/// Raw upload as handed over by the caller.
#[derive(Debug, Clone)]
pub struct InputImage {
    bytes: Vec<u8>,
    original_filename: String,
}

impl InputImage {
    pub fn new(bytes: Vec<u8>, original_filename: impl Into<String>) -> Self {
        Self {
            bytes,
            original_filename: original_filename.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    pub fn original_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.original_filename)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: Option<u32>,
    pub format: DetectedFormat,
}

impl ImageMetadata {
    /// Build metadata from decoded dimensions. A zero width means the
    /// decoder produced nothing usable; a zero height is only recorded as absent.
    pub fn from_dimensions(width: u32, height: u32, format: DetectedFormat) -> Result<Self> {
        if width == 0 {
            return Err(TranscodeError::MissingDimension(width, height));
        }

        Ok(Self {
            width,
            height: (height > 0).then_some(height),
            format,
        })
    }
}

/// Pixel buffer plus the metadata read from its container.
#[derive(Debug)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub metadata: ImageMetadata,
}

/// Rejects empty and oversized inputs before any decoding work is done.
pub fn validate_input(bytes: &[u8], config: &OptimizerConfig) -> Result<()> {
    if bytes.is_empty() {
        return Err(TranscodeError::NoInput);
    }

    let size = bytes.len() as u64;
    if size > config.max_input_bytes {
        return Err(TranscodeError::InputTooLarge(size, config.max_input_bytes));
    }

    Ok(())
}

/// Decodes an image buffer, consuming it.
///
/// The format is taken from the container's magic bytes; the caller's
/// filename plays no part here.
pub fn decode_image(bytes: Vec<u8>, config: &OptimizerConfig) -> Result<DecodedImage> {
    validate_input(&bytes, config)?;

    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(config.max_dimension);
    limits.max_image_height = Some(config.max_dimension);
    reader.limits(limits);

    let format = DetectedFormat::from_image_format(reader.format());
    let image = reader.decode()?;

    let (width, height) = image.dimensions();
    let metadata = ImageMetadata::from_dimensions(width, height, format)?;

    debug!(width, height, %format, color = ?image.color(), "decoded image");

    Ok(DecodedImage { image, metadata })
}

/// Reads only the header: container format and dimensions, without decoding pixels.
pub fn inspect_image(bytes: &[u8]) -> Result<ImageMetadata> {
    if bytes.is_empty() {
        return Err(TranscodeError::NoInput);
    }

    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = DetectedFormat::from_image_format(reader.format());
    let (width, height) = reader.into_dimensions()?;

    ImageMetadata::from_dimensions(width, height, format)
}
