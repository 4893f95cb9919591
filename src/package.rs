use crate::constants::OUTPUT_SUFFIX;
use crate::encode::EncodedImage;
use crate::error::TranscodeFailure;
use crate::formats::extension_for_mime;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;

/// Successful transcode, ready to hand back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeResult {
    pub encoded_bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub output_filename: String,
    pub original_size: u64,
    pub new_size: u64,
}

impl TranscodeResult {
    pub fn data_uri(&self) -> String {
        build_data_uri(self.mime_type, &self.encoded_bytes)
    }
}

/// Packages encoded bytes with their derived filename and byte counts.
/// The extension comes from the MIME type, not from the encoder branch.
pub fn package(encoded: EncodedImage, original_filename: &str, original_size: u64) -> TranscodeResult {
    let mime_type = encoded.mime_type();
    let new_size = encoded.len();

    TranscodeResult {
        output_filename: output_filename(original_filename, mime_type),
        encoded_bytes: encoded.bytes,
        mime_type,
        original_size,
        new_size,
    }
}

/// `{name without last extension}_optimized{extension for mime}`.
///
/// Everything from the last `.` on is dropped; a name without a dot is used whole.
pub fn output_filename(original_filename: &str, mime_type: &str) -> String {
    let base = match original_filename.rfind('.') {
        Some(idx) => &original_filename[..idx],
        None => original_filename,
    };

    format!("{}{}{}", base, OUTPUT_SUFFIX, extension_for_mime(mime_type))
}

pub fn build_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// A decoded `data:{mime};base64,{payload}` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        let bytes = STANDARD.decode(payload).ok()?;

        Some(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}

/// Wire payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptimizeResponse {
    Success(SuccessPayload),
    Failure(FailurePayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessPayload {
    pub success: bool,
    pub data: String,
    pub original_size: u64,
    pub new_size: u64,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailurePayload {
    pub success: bool,
    pub error: String,
}

impl OptimizeResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, OptimizeResponse::Success(_))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<TranscodeResult> for OptimizeResponse {
    fn from(result: TranscodeResult) -> Self {
        OptimizeResponse::Success(SuccessPayload {
            success: true,
            data: result.data_uri(),
            original_size: result.original_size,
            new_size: result.new_size,
            filename: result.output_filename,
        })
    }
}

impl From<TranscodeFailure> for OptimizeResponse {
    fn from(failure: TranscodeFailure) -> Self {
        OptimizeResponse::Failure(FailurePayload {
            success: false,
            error: failure.message,
        })
    }
}
