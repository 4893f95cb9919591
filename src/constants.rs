pub const OUTPUT_QUALITY: u8 = 80;

/// Images wider than this are resized.
pub const RESIZE_THRESHOLD_WIDTH: u32 = 1200;
/// Width an oversized image is resized to.
pub const RESIZE_TARGET_WIDTH: u32 = 1600;

pub const WEBP_METHOD: i32 = 6;

pub const OXIPNG_MAX_PRESET: u8 = 6;
pub const LIBDEFLATER_MAX_LEVEL: u8 = 12;
pub const PNG_QUANT_MIN_QUALITY: u8 = 0;
pub const PNG_QUANT_SPEED: i32 = 4;
pub const PNG_DITHERING_LEVEL: f32 = 1.0;

pub const DEFAULT_MAX_INPUT_BYTES: u64 = 100 * 1024 * 1024;
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;
pub const MAX_WORKERS: usize = 256;

pub const OUTPUT_SUFFIX: &str = "_optimized";

pub const NO_INPUT_MESSAGE: &str = "No file was provided.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not optimize the image.";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

// CLI output prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const OPTIMIZED_SIZE_PREFIX: &str = "📈 Optimized size:";
pub const REDUCTION_PREFIX: &str = "🎯 Reduction:";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const INFO_PREFIX: &str = "📋";
