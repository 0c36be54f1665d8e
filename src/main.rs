mod annotate;
mod capture;
mod cli;
mod config;
mod detect;
mod error;
mod filter;
mod geometry;
mod hotkey;
mod logging;
mod merge;
mod models;
mod pipeline;
mod utils;

use annotate::Annotator;
use config::PipelineConfig;
use detect::command::{CommandClassifier, CommandDetector, CommandRecognizer};
use detect::json_file;
use detect::ElementClassifier;
use error::{PipelineError, Result};
use hotkey::{HotkeyListener, Trigger};
use pipeline::{run_pass, PassOutput, Pipeline};
use std::env;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if it doesn't)
    let _ = dotenvy::dotenv();

    logging::init(env::var("LOG_DIR").ok().as_deref())
        .map_err(|e| PipelineError::InvalidConfig(format!("logging setup failed: {}", e)))?;

    let args: Vec<String> = env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        cli::print_help();
        return Ok(());
    }
    if args.contains(&"--version".to_string()) || args.contains(&"-v".to_string()) {
        cli::print_version();
        return Ok(());
    }

    let mut config = PipelineConfig::from_env()?;
    if let Some(dir) = flag_value(&args, "--output-dir") {
        config.output_dir = PathBuf::from(dir);
    }

    if args.contains(&"--watch".to_string()) {
        run_watch_mode(config)
    } else {
        run_merge_mode(&args, config)
    }
}

/// Value following a `--flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(String::as_str)
}

/// First argument that is neither a flag nor a flag's value.
fn positional_arg(args: &[String]) -> Option<&str> {
    const FLAGS_WITH_VALUES: [&str; 3] = ["--components", "--texts", "--output-dir"];

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        if FLAGS_WITH_VALUES.contains(&arg) {
            i += 2;
        } else if arg.starts_with('-') {
            i += 1;
        } else {
            return Some(arg);
        }
    }
    None
}

/// Timestamped stem for one pass's output files.
///
/// Millisecond precision keeps back-to-back passes from overwriting each
/// other's files.
fn output_basename(now: chrono::DateTime<chrono::Local>) -> String {
    format!("detection_{}", now.format("%Y-%m-%d_%H-%M-%S_%3f"))
}

fn build_annotator(config: &PipelineConfig) -> Result<Annotator> {
    match &config.label_font {
        Some(path) => Annotator::with_font(path),
        None => Ok(Annotator::new()),
    }
}

fn build_classifier(config: &PipelineConfig) -> Option<Box<dyn ElementClassifier>> {
    config
        .classifier_cmd
        .clone()
        .map(|spec| Box::new(CommandClassifier::new(spec)) as Box<dyn ElementClassifier>)
}

/// Write the annotated image and the JSON report, both timestamped.
///
/// Nothing is written unless the pass completed, so a failed pass leaves
/// no partial output on disk.
fn write_outputs(
    frame: &image::RgbaImage,
    output: &PassOutput,
    annotator: &Annotator,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)?;

    let basename = output_basename(chrono::Local::now());
    let image_path = output_dir.join(format!("{}.png", basename));
    let report_path = output_dir.join(format!("{}.json", basename));

    let annotated = annotator.annotate(frame, &output.elements);
    annotated.save(&image_path)?;

    let json = serde_json::to_string_pretty(&output.report)?;
    std::fs::write(&report_path, json)?;

    Ok((image_path, report_path))
}

/// Hotkey loop: capture and analyze on the capture key, stop on the exit
/// key. A failed pass is logged and the listener keeps going.
fn run_watch_mode(config: PipelineConfig) -> Result<()> {
    let detector_spec = config.detector_cmd.clone().ok_or_else(|| {
        PipelineError::InvalidConfig("watch mode requires DETECTOR_CMD".to_string())
    })?;
    let ocr_spec = config
        .ocr_cmd
        .clone()
        .ok_or_else(|| PipelineError::InvalidConfig("watch mode requires OCR_CMD".to_string()))?;

    let capture_key = hotkey::parse_keycode(&config.capture_hotkey)?;
    let exit_key = hotkey::parse_keycode(&config.exit_hotkey)?;

    let annotator = build_annotator(&config)?;
    let classifier = build_classifier(&config);
    let output_dir = config.output_dir.clone();
    let poll_interval = config.poll_interval;

    let pipeline = Pipeline::new(
        Box::new(CommandDetector::new(detector_spec)),
        Box::new(CommandRecognizer::new(ocr_spec)),
        classifier,
        config,
    );

    println!("screenlens v{}", env!("CARGO_PKG_VERSION"));
    println!("Press {:?} to capture and analyze the screen.", capture_key);
    println!("Press {:?} to exit.", exit_key);

    let mut listener = HotkeyListener::new(capture_key, exit_key, poll_interval);

    loop {
        match listener.wait() {
            Trigger::Exit => {
                println!("Exiting...");
                break;
            }
            Trigger::Capture => {
                tracing::info!("Capture hotkey pressed; starting analysis pass");
                // One pass runs to completion before the next trigger is
                // observed; a failure aborts only this frame.
                if let Err(e) = run_one_pass(&pipeline, &annotator, &output_dir) {
                    tracing::error!("Analysis pass failed: {}", e);
                    println!("Pass failed: {}. Still listening.", e);
                }
                println!("Ready for next capture.");
            }
        }
    }

    Ok(())
}

fn run_one_pass(pipeline: &Pipeline, annotator: &Annotator, output_dir: &Path) -> Result<()> {
    let frame = capture::capture_primary()?;
    let output = pipeline.run(&frame)?;
    let (image_path, report_path) = write_outputs(&frame, &output, annotator, output_dir)?;

    println!(
        "Detected {} elements. Results: {} / {}",
        output.elements.len(),
        image_path.display(),
        report_path.display()
    );
    Ok(())
}

/// Offline mode: merge pre-computed detector/OCR stage files over a saved
/// screenshot.
fn run_merge_mode(args: &[String], config: PipelineConfig) -> Result<()> {
    let image_arg = positional_arg(args).ok_or_else(|| {
        PipelineError::InvalidConfig("no input image; run with --help for usage".to_string())
    })?;

    let components_path = flag_value(args, "--components").ok_or_else(|| {
        PipelineError::InvalidConfig("offline mode requires --components <JSON>".to_string())
    })?;

    let frame = image::open(image_arg)
        .map_err(|e| PipelineError::InvalidConfig(format!("cannot open {}: {}", image_arg, e)))?
        .to_rgba8();

    let components = json_file::load_component_boxes(Path::new(components_path))?;
    let texts = match flag_value(args, "--texts") {
        Some(path) => json_file::load_text_detections(Path::new(path))?,
        None => Vec::new(),
    };

    println!(
        "Merging {} component boxes and {} text regions over {}",
        components.len(),
        texts.len(),
        image_arg
    );

    let annotator = build_annotator(&config)?;
    let classifier = build_classifier(&config);

    let output = run_pass(&frame, components, texts, classifier.as_deref(), &config)?;
    let (image_path, report_path) =
        write_outputs(&frame, &output, &annotator, &config.output_dir)?;

    println!("Surviving elements: {}", output.elements.len());
    println!("Annotated image: {}", image_path.display());
    println!("Detection report: {}", report_path.display());

    Ok(())
}
