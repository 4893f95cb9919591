use crate::constants::{
    LIBDEFLATER_MAX_LEVEL, OUTPUT_QUALITY, OXIPNG_MAX_PRESET, PNG_DITHERING_LEVEL,
    PNG_QUANT_MIN_QUALITY, PNG_QUANT_SPEED, WEBP_METHOD,
};
use crate::error::{Result, TranscodeError};
use crate::formats::{DetectedFormat, OutputFormat};
use image::{DynamicImage, ImageFormat, RgbaImage};
use oxipng::{optimize_from_memory, Deflaters, Options, StripChunks};
use std::io::Cursor;
use std::panic;
use tracing::{debug, warn};

/// Output of the encoder: the bytes plus the format they were written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encodes the pixel buffer with the branch chosen from the detected format.
///
/// The branch depends only on `format`; the pixel buffer is consumed.
pub fn encode_image(img: DynamicImage, format: DetectedFormat) -> Result<EncodedImage> {
    let output = format.output_format();

    let bytes = match output {
        OutputFormat::Png => encode_png(img)?,
        OutputFormat::WebP => encode_webp(img)?,
        OutputFormat::Jpeg => encode_jpeg(img)?,
    };

    if bytes.is_empty() {
        return Err(TranscodeError::encode(output_name(output), "encoder produced no data"));
    }

    debug!(%output, size = bytes.len(), "encoded image");

    Ok(EncodedImage {
        bytes,
        format: output,
    })
}

fn output_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Jpeg => "JPEG",
        OutputFormat::Png => "PNG",
        OutputFormat::WebP => "WebP",
    }
}

/// JPEG through mozjpeg with optimized Huffman tables and progressive scans.
pub fn encode_jpeg(img: DynamicImage) -> Result<Vec<u8>> {
    let rgb = img.into_rgb8();
    let (width, height) = rgb.dimensions();

    // libjpeg reports fatal errors by unwinding.
    let outcome = panic::catch_unwind(move || -> std::io::Result<Vec<u8>> {
        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(OUTPUT_QUALITY as f32);
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);
        comp.set_optimize_scans(true);

        let mut comp = comp.start_compress(Vec::new())?;
        comp.write_scanlines(rgb.as_raw())?;
        comp.finish()
    });

    match outcome {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => Err(TranscodeError::encode("JPEG", e)),
        Err(_) => Err(TranscodeError::encode("JPEG", "mozjpeg aborted while compressing")),
    }
}

/// Lossy WebP at the highest effort level.
pub fn encode_webp(img: DynamicImage) -> Result<Vec<u8>> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| TranscodeError::encode("WebP", "failed to initialise encoder config"))?;
    config.lossless = 0;
    config.quality = OUTPUT_QUALITY as f32;
    config.method = WEBP_METHOD;

    let encoded = if img.color().has_alpha() {
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        encoder.encode_advanced(&config)
    } else {
        let rgb = img.into_rgb8();
        let (width, height) = rgb.dimensions();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
        encoder.encode_advanced(&config)
    };
    let memory = encoded.map_err(|e| TranscodeError::encode("WebP", format!("{:?}", e)))?;

    Ok(memory.to_vec())
}

/// PNG quantized to a palette, then recompressed by oxipng at its maximum preset.
pub fn encode_png(img: DynamicImage) -> Result<Vec<u8>> {
    let rgba = img.into_rgba8();

    let reduced = match quantize(&rgba) {
        Ok(quantized) => quantized,
        Err(e) => {
            warn!("palette quantization failed, keeping full colour: {}", e);
            rgba
        }
    };

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(reduced)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| TranscodeError::encode("PNG", e))?;
    let png = cursor.into_inner();

    optimize_from_memory(&png, &png_options()).map_err(|e| TranscodeError::encode("PNG", e))
}

fn png_options() -> Options {
    let mut options = Options::from_preset(OXIPNG_MAX_PRESET);
    options.strip = StripChunks::Safe;
    options.palette_reduction = true;
    options.color_type_reduction = true;
    options.bit_depth_reduction = true;
    options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_MAX_LEVEL,
    };
    options
}

/// Remaps the image onto at most 256 colours. The result is still RGBA;
/// oxipng turns it into an indexed PNG.
fn quantize(rgba: &RgbaImage) -> std::result::Result<RgbaImage, imagequant::Error> {
    let (width, height) = rgba.dimensions();

    let mut attr = imagequant::new();
    attr.set_speed(PNG_QUANT_SPEED)?;
    attr.set_quality(PNG_QUANT_MIN_QUALITY, OUTPUT_QUALITY)?;

    let pixels: Vec<imagequant::RGBA> = rgba
        .pixels()
        .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect();

    let mut liq_image = attr.new_image(pixels, width as usize, height as usize, 0.0)?;
    let mut result = attr.quantize(&mut liq_image)?;
    result.set_dithering_level(PNG_DITHERING_LEVEL)?;
    let (palette, indices) = result.remapped(&mut liq_image)?;

    let mut expanded = Vec::with_capacity(indices.len() * 4);
    for idx in indices {
        let color = palette[idx as usize];
        expanded.extend_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    RgbaImage::from_raw(width, height, expanded).ok_or(imagequant::Error::BufferTooSmall)
}
