//! End-to-end runs over a temporary sequence directory.

use std::path::Path;

use lapse_core::{FramePipeline, PipelineConfig};
use lapse_model::{DriftMode, OutputResolution};
use lapse_sequence::{backup_settings, LoadedSequence, Pp3Document};

const KEYFRAME_START: &str = "[Version]
AppVersion=5.9
Version=346

[Exposure]
Auto=false
Compensation=-1

[White Balance]
Enabled=true
Setting=Custom
Temperature=5000
Green=0.8

[Crop]
Enabled=false
X=0
Y=0
W=6000
H=4000

[Sharpening]
Enabled=true
Amount=200
";

const KEYFRAME_END: &str = "[Exposure]
Compensation=1

[White Balance]
Setting=Custom
Temperature=7000
Green=1.2
";

fn nef() -> Vec<String> {
    vec!["NEF".to_string()]
}

fn setup(dir: &Path) {
    for i in 0..5 {
        std::fs::write(dir.join(format!("DSC_{i:04}.NEF")), b"").unwrap();
    }
    std::fs::write(dir.join("DSC_0000.NEF.pp3"), KEYFRAME_START).unwrap();
    std::fs::write(dir.join("DSC_0004.NEF.pp3"), KEYFRAME_END).unwrap();
}

fn run(dir: &Path, config: PipelineConfig) -> lapse_core::RunReport {
    let loaded = LoadedSequence::load(dir, &nef()).unwrap();
    let sequence = loaded.sequence().unwrap();
    let pipeline = FramePipeline::new(config, loaded.source_lookup().rect);
    let mut writer = loaded.writer();
    pipeline.run(&sequence, &mut writer).unwrap()
}

#[test]
fn test_midpoint_frame_is_interpolated() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    let report = run(dir.path(), PipelineConfig::default());
    assert_eq!(report.frames, 5);
    assert_eq!(report.interpolated, 3);
    assert_eq!(report.keyframes_rewritten, 2);

    let mid = Pp3Document::load(dir.path().join("DSC_0002.NEF.pp3")).unwrap();
    assert_eq!(mid.get("White Balance", "Temperature"), Some("6000"));
    assert_eq!(mid.get("White Balance", "Green"), Some("1.000"));
    assert_eq!(mid.get("Exposure", "Compensation"), Some("0.000"));

    // Inherited from the previous keyframe.
    assert_eq!(mid.get("Sharpening", "Amount"), Some("200"));
    assert_eq!(mid.get("Version", "AppVersion"), Some("5.9"));

    assert_eq!(mid.get("Crop", "Enabled"), Some("true"));
    assert_eq!(mid.get("Crop", "X"), Some("0"));
    assert_eq!(mid.get("Crop", "Y"), Some("312"));
    assert_eq!(mid.get("Crop", "W"), Some("6000"));
    assert_eq!(mid.get("Crop", "H"), Some("3375"));
    assert_eq!(mid.get("Resize", "Width"), Some("3840"));
}

#[test]
fn test_keyframes_are_rewritten_with_own_values() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());
    run(dir.path(), PipelineConfig::default());

    let last = Pp3Document::load(dir.path().join("DSC_0004.NEF.pp3")).unwrap();
    assert_eq!(last.get("White Balance", "Temperature"), Some("7000"));
    assert_eq!(last.get("White Balance", "Green"), Some("1.200"));
    assert_eq!(last.get("Exposure", "Compensation"), Some("1.000"));
    assert_eq!(last.get("Crop", "H"), Some("3375"));
    assert_eq!(last.get("Sharpening", "Amount"), None);
}

#[test]
fn test_keyframes_untouched_without_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());
    let config = PipelineConfig {
        rewrite_keyframes: false,
        ..Default::default()
    };
    let report = run(dir.path(), config);
    assert_eq!(report.keyframes_rewritten, 0);
    assert_eq!(report.skipped_annotated, 2);

    let first = std::fs::read_to_string(dir.path().join("DSC_0000.NEF.pp3")).unwrap();
    assert_eq!(first, KEYFRAME_START);
}

#[test]
fn test_second_run_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    let first = run(dir.path(), PipelineConfig::default());
    assert_eq!(first.created(), 3);

    let second = run(dir.path(), PipelineConfig::default());
    assert_eq!(second.created(), 0);
    assert_eq!(second.interpolated, 0);
    assert_eq!(second.held, 0);
    assert_eq!(second.keyframes_rewritten, 5);
}

#[test]
fn test_source_size_comes_from_original_keyframe() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());
    run(dir.path(), PipelineConfig::default());

    // The first keyframe now has crop enabled, so a reload falls back.
    let reloaded = LoadedSequence::load(dir.path(), &nef()).unwrap();
    assert!(reloaded.source_lookup().fallback.is_some());
}

#[test]
fn test_drift_and_output_reach_files() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());
    let config = PipelineConfig {
        drift: DriftMode::TopToBottom,
        output: OutputResolution::Hd1080,
        ..Default::default()
    };
    run(dir.path(), config);

    let first = Pp3Document::load(dir.path().join("DSC_0001.NEF.pp3")).unwrap();
    let last = Pp3Document::load(dir.path().join("DSC_0003.NEF.pp3")).unwrap();
    let y = |doc: &Pp3Document| doc.get("Crop", "Y").unwrap().parse::<u32>().unwrap();
    assert!(y(&first) < y(&last));
    assert_eq!(first.get("Resize", "Width"), Some("1920"));
    assert_eq!(first.get("Resize", "ShortEdge"), Some("1080"));
}

#[test]
fn test_backup_preserves_originals() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    let backup = backup_settings(dir.path()).unwrap().unwrap();
    assert_eq!(backup.files, 2);
    run(dir.path(), PipelineConfig::default());

    let saved = std::fs::read_to_string(backup.dir.join("DSC_0000.NEF.pp3")).unwrap();
    assert_eq!(saved, KEYFRAME_START);

    // The backup directory is not mistaken for a frame.
    let loaded = LoadedSequence::load(dir.path(), &nef()).unwrap();
    assert_eq!(loaded.frame_count(), 5);
}
