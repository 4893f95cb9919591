mod common;

use common::{encode_as, gradient_image, noise_image};
use image::{GenericImageView, ImageFormat};
use img_optimize::{
    DataUri, FailureKind, InputImage, OptimizeResponse, TranscodeError, TranscodeResult,
    Transcoder,
};

fn transcode(bytes: Vec<u8>, name: &str) -> img_optimize::Result<TranscodeResult> {
    Transcoder::default().transcode(InputImage::new(bytes, name))
}

#[test]
fn test_large_png_end_to_end() {
    let bytes = encode_as(&noise_image(2000, 1500, 7), ImageFormat::Png);
    let original_size = bytes.len() as u64;

    let result = transcode(bytes, "landscape.png").unwrap();

    assert_eq!(result.mime_type, "image/png");
    assert_eq!(result.output_filename, "landscape_optimized.png");
    assert_eq!(result.original_size, original_size);
    assert_eq!(result.new_size, result.encoded_bytes.len() as u64);
    assert!(result.new_size < result.original_size);

    let output = image::load_from_memory(&result.encoded_bytes).unwrap();
    assert_eq!(output.dimensions(), (1600, 1200));
}

#[test]
fn test_width_at_threshold_is_not_resized() {
    let bytes = encode_as(&gradient_image(1200, 300), ImageFormat::Jpeg);
    let result = transcode(bytes, "edge.jpg").unwrap();

    let output = image::load_from_memory(&result.encoded_bytes).unwrap();
    assert_eq!(output.dimensions(), (1200, 300));
}

#[test]
fn test_width_over_threshold_targets_1600() {
    let bytes = encode_as(&gradient_image(1201, 300), ImageFormat::Jpeg);
    let result = transcode(bytes, "edge.jpg").unwrap();

    let output = image::load_from_memory(&result.encoded_bytes).unwrap();
    assert_eq!(output.dimensions(), (1600, 400));
}

#[test]
fn test_tall_portrait_only_checks_width() {
    let bytes = encode_as(&gradient_image(600, 2400), ImageFormat::Jpeg);
    let result = transcode(bytes, "portrait.jpg").unwrap();

    let output = image::load_from_memory(&result.encoded_bytes).unwrap();
    assert_eq!(output.dimensions(), (600, 2400));
}

#[test]
fn test_webp_input_stays_webp() {
    let bytes = encode_as(&gradient_image(80, 60), ImageFormat::WebP);
    let result = transcode(bytes, "sticker.webp").unwrap();

    assert_eq!(result.mime_type, "image/webp");
    assert_eq!(result.output_filename, "sticker_optimized.webp");
    assert_eq!(image::guess_format(&result.encoded_bytes).unwrap(), ImageFormat::WebP);
}

#[test]
fn test_jpeg_filename_derivation() {
    let bytes = encode_as(&gradient_image(64, 64), ImageFormat::Jpeg);

    let result = transcode(bytes.clone(), "photo.JPG").unwrap();
    assert_eq!(result.output_filename, "photo_optimized.jpg");

    let result = transcode(bytes, "noext").unwrap();
    assert_eq!(result.output_filename, "noext_optimized.jpg");
}

#[test]
fn test_branch_ignores_filename_extension() {
    let png = encode_as(&gradient_image(32, 32), ImageFormat::Png);

    let result = transcode(png, "misleading.jpg").unwrap();
    assert_eq!(result.mime_type, "image/png");
    assert_eq!(result.output_filename, "misleading_optimized.png");
}

#[test]
fn test_unlisted_format_becomes_jpeg() {
    for format in [ImageFormat::Bmp, ImageFormat::Gif, ImageFormat::Tiff] {
        let bytes = encode_as(&gradient_image(24, 24), format);

        let result = transcode(bytes, "legacy.bmp").unwrap();
        assert_eq!(result.mime_type, "image/jpeg", "{:?} should fall back to JPEG", format);
        assert_eq!(result.output_filename, "legacy_optimized.jpg");
        assert_eq!(image::guess_format(&result.encoded_bytes).unwrap(), ImageFormat::Jpeg);
    }
}

#[test]
fn test_empty_input_fails_without_output() {
    let err = transcode(Vec::new(), "nothing.png").unwrap_err();
    assert!(matches!(err, TranscodeError::NoInput));

    let failure = err.into_failure(0);
    assert_eq!(failure.kind, FailureKind::NoInput);
    assert_eq!(failure.message, "No file was provided.");
}

#[test]
fn test_garbage_input_fails_with_generic_message() {
    let garbage: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();

    let response = Transcoder::default().optimize(garbage, "random.png", None);
    match response {
        OptimizeResponse::Failure(payload) => {
            assert!(!payload.success);
            assert_eq!(payload.error, "Could not optimize the image.");
        }
        OptimizeResponse::Success(_) => panic!("garbage should not transcode"),
    }
}

#[test]
fn test_truncated_png_is_decode_failure() {
    let mut bytes = encode_as(&gradient_image(64, 64), ImageFormat::Png);
    bytes.truncate(bytes.len() / 2);

    let err = transcode(bytes, "cut.png").unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
}

#[test]
fn test_success_payload_carries_data_uri() {
    let bytes = encode_as(&gradient_image(48, 32), ImageFormat::Png);
    let original_size = bytes.len() as u64;

    match Transcoder::default().optimize(bytes, "icon.png", Some(original_size)) {
        OptimizeResponse::Success(payload) => {
            assert!(payload.success);
            assert_eq!(payload.filename, "icon_optimized.png");
            assert_eq!(payload.original_size, original_size);

            let uri = DataUri::parse(&payload.data).unwrap();
            assert_eq!(uri.mime_type, "image/png");
            assert_eq!(uri.bytes.len() as u64, payload.new_size);
        }
        OptimizeResponse::Failure(payload) => panic!("unexpected failure: {}", payload.error),
    }
}

#[test]
fn test_webp_encoder_rejects_oversized_resize() {
    // 1300x14000 scales to 1600x17231, past libwebp's per-side limit.
    let bytes = encode_as(&image::DynamicImage::new_rgb8(1300, 14000), ImageFormat::WebP);

    let err = transcode(bytes.clone(), "tower.webp").unwrap_err();
    assert_eq!(err.kind(), FailureKind::Encode);
    assert!(matches!(err, TranscodeError::Encode { format: "WebP", .. }));

    let response = Transcoder::default().optimize(bytes, "tower.webp", None);
    assert_eq!(
        response.to_json().unwrap(),
        r#"{"success":false,"error":"Could not optimize the image."}"#
    );
}
