use anyhow::{bail, Context, Result};
use clap::Parser;
use img_optimize::cli::{Args, Commands};
use img_optimize::constants::{
    INFO_PREFIX, OPTIMIZED_SIZE_PREFIX, ORIGINAL_SIZE_PREFIX, PROGRESS_SPINNER_TEMPLATE,
    REDUCTION_PREFIX, SUCCESS_PREFIX, WARNING_PREFIX,
};
use img_optimize::resize::{plan_resize, ResizePlan};
use img_optimize::utils::{format_file_size, reduction_percent};
use img_optimize::{
    init_logging, inspect_image, InputImage, OptimizerConfig, TranscodePool, Transcoder,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet, args.verbose);

    let config = OptimizerConfig::new(
        args.limits.max_input_bytes,
        args.limits.max_dimension,
        args.limits.workers,
    )?;

    match args.command {
        Commands::Optimize {
            input,
            out_dir,
            json,
        } => {
            let pool = TranscodePool::new(Transcoder::new(config))?;
            if json {
                print_payload(&pool, &input)?;
            } else {
                optimize_file(&pool, &input, out_dir.as_deref(), args.quiet)?;
            }
        }
        Commands::Inspect { input } => {
            show_image_info(&input)?;
        }
    }

    Ok(())
}

fn read_upload(input: &Path) -> Result<(Vec<u8>, String)> {
    let bytes = fs::read(input).with_context(|| format!("failed to read {:?}", input))?;
    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((bytes, filename))
}

fn print_payload(pool: &TranscodePool, input: &Path) -> Result<()> {
    let (bytes, filename) = read_upload(input)?;
    let size_hint = bytes.len() as u64;

    let response = pool.optimize_blocking(bytes, &filename, Some(size_hint));
    println!("{}", response.to_json()?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn optimize_file(
    pool: &TranscodePool,
    input: &Path,
    out_dir: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let (bytes, filename) = read_upload(input)?;
    let original_size = bytes.len() as u64;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE)?);
    pb.set_message(format!("Optimizing {}...", filename));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = match pool.run(InputImage::new(bytes, filename)) {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            tracing::error!(kind = %e.kind(), "error optimizing image: {}", e);
            bail!(e.into_failure(original_size).message);
        }
    };
    pb.finish_and_clear();

    let target_dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    if !target_dir.as_os_str().is_empty() {
        fs::create_dir_all(&target_dir)
            .with_context(|| format!("failed to create {:?}", target_dir))?;
    }
    let output_path = target_dir.join(&result.output_filename);
    fs::write(&output_path, &result.encoded_bytes)
        .with_context(|| format!("failed to write {:?}", output_path))?;

    if !quiet {
        let reduction = reduction_percent(result.original_size, result.new_size);
        println!(
            "{} {} ({})",
            ORIGINAL_SIZE_PREFIX,
            result.original_size,
            format_file_size(result.original_size)
        );
        println!(
            "{} {} ({})",
            OPTIMIZED_SIZE_PREFIX,
            result.new_size,
            format_file_size(result.new_size)
        );
        println!("{} {}%", REDUCTION_PREFIX, reduction);
        if reduction > 0 {
            println!("{} Saved {:?} ({})", SUCCESS_PREFIX, output_path, result.mime_type);
        } else {
            println!(
                "{}  Saved {:?}, but the file did not shrink",
                WARNING_PREFIX, output_path
            );
        }
    }

    Ok(())
}

fn show_image_info(input: &Path) -> Result<()> {
    let (bytes, filename) = read_upload(input)?;
    let metadata = inspect_image(&bytes)?;

    println!("{} Image: {}", INFO_PREFIX, filename);
    println!("  📦 File size: {}", format_file_size(bytes.len() as u64));
    println!("  🎭 Detected format: {}", metadata.format);
    match metadata.height {
        Some(height) => println!("  📏 Dimensions: {}x{} pixels", metadata.width, height),
        None => println!("  📏 Width: {} pixels (height unknown)", metadata.width),
    }

    match plan_resize(metadata.width, metadata.height.unwrap_or(0)) {
        ResizePlan::Keep => println!("  🔄 Resize: none"),
        ResizePlan::Scale { width, height } => {
            println!("  🔄 Resize: to {}x{}", width, height)
        }
    }

    let output = metadata.format.output_format();
    println!("  🎯 Output: {} ({})", output, output.mime_type());

    Ok(())
}
