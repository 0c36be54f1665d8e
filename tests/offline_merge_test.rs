use image::RgbaImage;
use screenlens::annotate::Annotator;
use screenlens::config::PipelineConfig;
use screenlens::detect::json_file;
use screenlens::models::DetectionReport;
use screenlens::pipeline::run_pass;
use std::fs;

/// Exercise the offline path end to end: stage files in, annotated image
/// and report out.
#[test]
fn test_offline_merge_from_stage_files() {
    let dir = tempfile::tempdir().unwrap();

    let components_path = dir.path().join("compo.json");
    fs::write(
        &components_path,
        r#"[{"x_min":0,"y_min":0,"x_max":10,"y_max":10},
           {"x_min":50,"y_min":50,"x_max":60,"y_max":60}]"#,
    )
    .unwrap();

    let texts_path = dir.path().join("ocr.json");
    fs::write(
        &texts_path,
        r#"[{"bbox":{"x_min":0,"y_min":0,"x_max":10,"y_max":10},"text":"Menu"}]"#,
    )
    .unwrap();

    let components = json_file::load_component_boxes(&components_path).unwrap();
    let texts = json_file::load_text_detections(&texts_path).unwrap();

    let frame = RgbaImage::new(100, 100);
    let mut config = PipelineConfig::default();
    config.icon_filter.min_size = 5;
    config.icon_filter.max_size = 50;
    config.icon_filter.max_aspect_ratio = 2.0;

    let output = run_pass(&frame, components, texts, None, &config).unwrap();

    // The text-covered component is dropped; survivor plus text remain.
    assert_eq!(output.elements.len(), 2);

    // Annotate and persist like the binary does.
    let annotated = Annotator::new().annotate(&frame, &output.elements);
    let image_path = dir.path().join("annotated.png");
    annotated.save(&image_path).unwrap();
    assert!(image_path.exists());

    let report_path = dir.path().join("report.json");
    fs::write(
        &report_path,
        serde_json::to_string_pretty(&output.report).unwrap(),
    )
    .unwrap();

    let round_trip: DetectionReport =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(round_trip.elements, output.elements);
    assert_eq!(round_trip.raw_component_count, 2);
}
