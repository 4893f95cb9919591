use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-optimize",
    about = "Shrink a single image for web delivery",
    long_about = "img-optimize decodes one JPEG, PNG or WebP image, downscales it when it is wider than \
                  1200 pixels, and re-encodes it with fixed web-friendly settings. Images in any other \
                  decodable format are written as JPEG.",
    version,
    after_help = "EXAMPLES:\n  \
    img-optimize optimize photo.png\n  \
    img-optimize optimize photo.jpg -o ./out\n  \
    img-optimize optimize banner.webp --json\n  \
    img-optimize inspect photo.png"
)]
pub struct Args {
    #[command(flatten)]
    pub limits: LimitArgs,

    #[arg(short = 'q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-stage details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs)]
pub struct LimitArgs {
    #[arg(
        long,
        global = true,
        env = "IMG_OPTIMIZE_MAX_INPUT_BYTES",
        help = "Largest accepted input in bytes (default: 100 MiB)"
    )]
    pub max_input_bytes: Option<u64>,

    #[arg(
        long,
        global = true,
        env = "IMG_OPTIMIZE_MAX_DIMENSION",
        help = "Largest accepted width or height in pixels (default: 16384)"
    )]
    pub max_dimension: Option<u32>,

    #[arg(
        short = 'j',
        long,
        global = true,
        env = "IMG_OPTIMIZE_WORKERS",
        help = "Number of worker threads (default: auto)"
    )]
    pub workers: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Optimize a single image",
        long_about = "Optimize a single image and write it next to the input as \
                      <name>_optimized.<ext>, or print the JSON response payload with --json."
    )]
    Optimize {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'o',
            long,
            help = "Directory for the optimized file (default: input directory)"
        )]
        out_dir: Option<PathBuf>,

        #[arg(
            long,
            help = "Print the response payload as JSON instead of writing a file",
            conflicts_with = "out_dir"
        )]
        json: bool,
    },

    #[command(
        about = "Show detected format, dimensions and the planned transcode",
        long_about = "Read the image header and report the container format, dimensions, \
                      whether it would be resized, and which encoder would be used."
    )]
    Inspect {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}
