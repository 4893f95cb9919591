use crate::constants::{RESIZE_TARGET_WIDTH, RESIZE_THRESHOLD_WIDTH};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    Keep,
    Scale { width: u32, height: u32 },
}

/// Decides whether an image of the given size is resized.
///
/// Only the width is consulted. Anything wider than the threshold is scaled
/// to the target width, which means widths between the threshold and the
/// target are enlarged. Height follows the aspect ratio.
pub fn plan_resize(width: u32, height: u32) -> ResizePlan {
    if width <= RESIZE_THRESHOLD_WIDTH {
        return ResizePlan::Keep;
    }

    ResizePlan::Scale {
        width: RESIZE_TARGET_WIDTH,
        height: scaled_height(width, height, RESIZE_TARGET_WIDTH),
    }
}

fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as f64 * target_width as f64 / width as f64).round() as u32;
    scaled.max(1)
}

/// Applies the resize plan, consuming the pixel buffer.
pub fn apply_resize(img: DynamicImage) -> DynamicImage {
    let (width, height) = img.dimensions();

    match plan_resize(width, height) {
        ResizePlan::Keep => img,
        ResizePlan::Scale {
            width: new_width,
            height: new_height,
        } => {
            debug!(width, height, new_width, new_height, "resizing image");
            img.resize_exact(new_width, new_height, FilterType::Lanczos3)
        }
    }
}
