/// Minimum fraction of a component's area that must be covered by a text box
/// for the component to be discarded as "is text, not a graphical element".
///
/// Hand-tuned; treat as configuration (override with `OVERLAP_THRESHOLD`).
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.90;

/// Smallest side length (pixels) a component may have and still count as an
/// icon/button candidate.
pub const DEFAULT_ICON_MIN_SIZE: u32 = 8;

/// Largest side length (pixels) for an icon/button candidate.
pub const DEFAULT_ICON_MAX_SIZE: u32 = 64;

/// Maximum `max(w,h)/min(w,h)` ratio for an icon/button candidate.
///
/// Keeps only roughly square elements; long bars and separators fail this.
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 3.0;

/// Side length (pixels) of the square crop fed to the element classifier.
pub const CLASSIFIER_INPUT_SIZE: u32 = 64;

/// Watch-mode key that triggers a capture-and-analyze pass.
pub const DEFAULT_CAPTURE_HOTKEY: &str = "f3";

/// Watch-mode key that stops the listener.
pub const DEFAULT_EXIT_HOTKEY: &str = "esc";

/// How often the hotkey listener polls the keyboard state.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 20;

/// Where annotated images and detection reports land by default.
pub const DEFAULT_OUTPUT_DIR: &str = "screenshots";
