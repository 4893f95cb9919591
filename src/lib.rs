pub mod cli;
pub mod config;
pub mod constants;
pub mod encode;
pub mod error;
pub mod formats;
pub mod inspect;
pub mod logger;
pub mod package;
pub mod pipeline;
pub mod resize;
pub mod utils;
pub mod worker;

pub use config::OptimizerConfig;
pub use encode::{encode_image, EncodedImage};
pub use error::{FailureKind, Result, TranscodeError, TranscodeFailure};
pub use formats::{extension_for_mime, DetectedFormat, OutputFormat};
pub use inspect::{decode_image, inspect_image, DecodedImage, ImageMetadata, InputImage};
pub use logger::init_logging;
pub use package::{output_filename, DataUri, OptimizeResponse, TranscodeResult};
pub use pipeline::Transcoder;
pub use resize::{apply_resize, plan_resize, ResizePlan};
pub use worker::TranscodePool;
