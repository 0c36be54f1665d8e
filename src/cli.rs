/// CLI argument parsing and help text

pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!("screenlens v{}", version);
    println!("Hotkey-driven UI element detection: capture, detect, OCR, classify, annotate");
    println!();
    println!("USAGE:");
    println!("    screenlens --watch");
    println!("    screenlens <IMAGE> --components <JSON> --texts <JSON>");
    println!();
    println!("OPTIONS:");
    println!("    --watch                Listen for the capture hotkey and analyze the screen");
    println!("    --components <PATH>    Detector stage file (JSON array of boxes)");
    println!("    --texts <PATH>         OCR stage file (JSON array of text detections)");
    println!("    --output-dir <PATH>    Where annotated images and reports go");
    println!("    -h, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Watch mode: capture on F3, exit on Escape");
    println!("    DETECTOR_CMD='uied-detect {{image}}' OCR_CMD='ocr-cli {{image}}' screenlens --watch");
    println!();
    println!("    # Offline merge of pre-computed stage files");
    println!("    screenlens screenshot.png --components compo.json --texts ocr.json");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    DETECTOR_CMD           - External component detector command (watch mode)");
    println!("    OCR_CMD                - External OCR command (watch mode)");
    println!("    CLASSIFIER_CMD         - External classifier command (optional)");
    println!("    OVERLAP_THRESHOLD      - Component/text overlap drop ratio (default: 0.9)");
    println!("    ICON_MIN_SIZE          - Icon filter minimum side, px (default: 8)");
    println!("    ICON_MAX_SIZE          - Icon filter maximum side, px (default: 64)");
    println!("    MAX_ASPECT_RATIO       - Icon filter max aspect ratio (default: 3.0)");
    println!("    CAPTURE_HOTKEY         - Capture key in watch mode (default: f3)");
    println!("    EXIT_HOTKEY            - Exit key in watch mode (default: esc)");
    println!("    OUTPUT_DIR             - Output directory (default: screenshots)");
    println!("    LABEL_FONT             - TTF/OTF file for annotation labels");
    println!("    LOG_DIR                - Enable rotating file logs in this directory");
    println!("    RUST_LOG               - Log level (error/warn/info/debug/trace)");
    println!();
    println!("CONFIGURATION:");
    println!("    Settings can also be placed in a .env file in the working directory.");
}

pub fn print_version() {
    println!("screenlens v{}", env!("CARGO_PKG_VERSION"));
}
