use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use stereodepth::image::io::{load_gray_image, load_rgb_image};
use stereodepth::{
    argmax_corr_mat, output_shape, KernelView, Mat, Metric, Shape2d, SlideParams,
    StereoDepthResult,
};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "StereoDepth CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Mode {
    #[default]
    Disparity,
    Slide,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    #[default]
    CrossCorrelation,
    SquaredDiff,
    AbsoluteDiff,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::CrossCorrelation => Metric::CrossCorrelation,
            MetricConfig::SquaredDiff => Metric::SquaredDiff,
            MetricConfig::AbsoluteDiff => Metric::AbsoluteDiff,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisparityConfig {
    left_path: String,
    right_path: String,
    kernel_size: usize,
}

impl Default for DisparityConfig {
    fn default() -> Self {
        Self {
            left_path: String::new(),
            right_path: String::new(),
            kernel_size: stereodepth::legacy::KERNEL_LIMIT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SlideConfig {
    source_path: String,
    kernel_path: String,
    color: bool,
    metric: MetricConfig,
    kernel_shape: Option<[usize; 2]>,
    kernel_offset: [usize; 2],
    stride: [usize; 2],
    padding: [usize; 2],
    parallel: bool,
}

impl Default for SlideConfig {
    fn default() -> Self {
        let params = SlideParams::default();
        Self {
            source_path: String::new(),
            kernel_path: String::new(),
            color: false,
            metric: MetricConfig::default(),
            kernel_shape: None,
            kernel_offset: [0, 0],
            stride: [params.stride.height(), params.stride.width()],
            padding: [params.padding.height(), params.padding.width()],
            parallel: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    mode: Mode,
    output_path: Option<String>,
    disparity: DisparityConfig,
    slide: SlideConfig,
}

#[derive(Debug, Serialize)]
struct Output<T> {
    mode: &'static str,
    height: usize,
    width: usize,
    data: Vec<T>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("stereodepth=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;

    let json = match config.mode {
        Mode::Disparity => serde_json::to_string_pretty(&run_disparity(&config.disparity)?)?,
        Mode::Slide => serde_json::to_string_pretty(&run_slide(config.slide)?)?,
    };

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

/// Best-shift map of the right image's windows over the left image.
fn run_disparity(cfg: &DisparityConfig) -> Result<Output<usize>, Box<dyn std::error::Error>> {
    if cfg.left_path.is_empty() || cfg.right_path.is_empty() {
        return Err("disparity.left_path and disparity.right_path must be set".into());
    }
    let left = load_gray_image(&cfg.left_path)?;
    let right = load_gray_image(&cfg.right_path)?;
    if left.shape() != right.shape() {
        return Err("left and right images must have the same size".into());
    }

    let plane = left.plane();
    let k = cfg.kernel_size;
    if plane.height() < k || plane.width() < k {
        return Err("images must be at least kernel_size in both dimensions".into());
    }
    let left = left.map(|v| f32::from(*v));
    let right = right.map(|v| f32::from(*v));

    let height = plane.height() - k + 1;
    let width = plane.width() - k + 1;
    let mut data = vec![0usize; height * width];
    argmax_corr_mat(
        left.as_slice(),
        right.as_slice(),
        &mut data,
        plane.width(),
        plane.height(),
        k,
    )?;
    tracing::info!(height, width, kernel_size = k, "disparity map computed");

    Ok(Output {
        mode: "disparity",
        height,
        width,
        data,
    })
}

/// Slides a window of the kernel image over the source image.
fn run_slide(cfg: SlideConfig) -> Result<Output<f32>, Box<dyn std::error::Error>> {
    if cfg.source_path.is_empty() || cfg.kernel_path.is_empty() {
        return Err("slide.source_path and slide.kernel_path must be set".into());
    }
    let color = cfg.color;
    let load = |path: &str| -> StereoDepthResult<Mat<u8>> {
        if color {
            load_rgb_image(path)
        } else {
            load_gray_image(path)
        }
    };
    let source = load(cfg.source_path.as_str())?.map(|v| f32::from(*v));
    let carrier = load(cfg.kernel_path.as_str())?.map(|v| f32::from(*v));

    let kernel_shape = cfg
        .kernel_shape
        .map(|[h, w]| Shape2d::new(h, w))
        .unwrap_or_else(|| carrier.plane());
    let kernel = KernelView::with_offset(
        carrier.as_slice(),
        carrier.plane(),
        kernel_shape,
        Shape2d::new(cfg.kernel_offset[0], cfg.kernel_offset[1]),
    );
    let params = SlideParams::new()
        .with_stride(Shape2d::new(cfg.stride[0], cfg.stride[1]))
        .with_padding(Shape2d::new(cfg.padding[0], cfg.padding[1]));

    let metric = Metric::from(cfg.metric);
    let mut dst: Mat<f32> = Mat::zeros(output_shape(source.shape(), kernel_shape, params)?);
    let shape = metric.apply_f32(
        dst.as_mut_slice(),
        source.as_slice(),
        source.shape(),
        kernel,
        params,
        cfg.parallel,
    )?;
    tracing::info!(
        metric = metric.name(),
        height = shape.height(),
        width = shape.width(),
        "slide computed"
    );

    Ok(Output {
        mode: metric.name(),
        height: shape.height(),
        width: shape.width(),
        data: dst.into_vec(),
    })
}
