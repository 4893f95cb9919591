use crate::config::OptimizerConfig;
use crate::encode::encode_image;
use crate::error::Result;
use crate::inspect::{decode_image, InputImage};
use crate::package::{package, OptimizeResponse, TranscodeResult};
use crate::resize::apply_resize;
use tracing::{debug, error, warn};

/// Stateless transcoder. Holds only read-only configuration, so one instance
/// can serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: OptimizerConfig,
}

impl Transcoder {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Decode -> resize -> encode -> package, in a single pass.
    ///
    /// Each stage consumes the previous stage's buffer.
    pub fn transcode(&self, input: InputImage) -> Result<TranscodeResult> {
        let original_size = input.original_size();
        let (bytes, original_filename) = input.into_parts();

        let decoded = decode_image(bytes, &self.config)?;
        let format = decoded.metadata.format;

        let resized = apply_resize(decoded.image);
        let encoded = encode_image(resized, format)?;

        let result = package(encoded, &original_filename, original_size);
        debug!(
            filename = %result.output_filename,
            original_size,
            new_size = result.new_size,
            "transcode complete"
        );

        Ok(result)
    }

    /// Boundary entry point: every failure is logged here and turned into the
    /// single failure payload. Internal detail never reaches the response.
    pub fn optimize(
        &self,
        raw_bytes: Vec<u8>,
        original_filename: &str,
        original_size_hint: Option<u64>,
    ) -> OptimizeResponse {
        let input = InputImage::new(raw_bytes, original_filename);
        let original_size = input.original_size();

        if let Some(hint) = original_size_hint.filter(|&hint| hint != original_size) {
            warn!(hint, original_size, "size hint does not match received bytes");
        }

        match self.transcode(input) {
            Ok(result) => result.into(),
            Err(e) => {
                error!(
                    kind = %e.kind(),
                    filename = original_filename,
                    "error optimizing image: {}",
                    e
                );
                e.into_failure(original_size).into()
            }
        }
    }
}
