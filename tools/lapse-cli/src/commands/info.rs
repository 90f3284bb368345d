//! Show sequence information.

use std::path::PathBuf;

use lapse_core::crop::crop_loss;
use lapse_core::crop_16x9;
use lapse_model::DriftMode;
use lapse_sequence::LoadedSequence;

pub fn run(dir: PathBuf, extensions: Vec<String>) -> anyhow::Result<()> {
    let loaded = LoadedSequence::load(&dir, &extensions)
        .map_err(|e| anyhow::anyhow!("Failed to load sequence: {e}"))?;

    println!("Sequence: {}", loaded.root.display());
    println!("  Frames: {}", loaded.frame_count());
    println!("  Extensions: {}", extensions.join(", "));
    if let (Some(first), Some(last)) = (loaded.frames.first(), loaded.frames.last()) {
        println!(
            "  Range: {} .. {}",
            first.raw.display(),
            last.raw.display()
        );
    }
    println!("  Annotated: {}", loaded.annotated_indices().len());
    println!();

    println!("Keyframes: {}", loaded.keyframes.len());
    for kf in &loaded.keyframes {
        let k = &kf.keyframe;
        println!(
            "  [{:>5}] T={} G={:.3} C={:+.2}  {}",
            k.index,
            k.temperature() as i64,
            k.green(),
            k.compensation(),
            kf.frame.sidecar_name()
        );
        for warning in &kf.warnings {
            println!("          warning: {warning}");
        }
    }
    for failed in &loaded.failed {
        println!("  [{:>5}] unreadable: {}", failed.frame.index, failed.error);
    }
    println!();

    let lookup = loaded.source_lookup();
    let source = lookup.rect;
    let crop = crop_16x9(source, DriftMode::Center, 0.0);
    let (lost_w, lost_h) = crop_loss(source);
    println!("Source:");
    println!("  Size: {}", super::source_summary(&lookup));
    println!("  Aspect: {:.3}", source.aspect_ratio());
    println!(
        "  16:9 crop: {}x{} at ({}, {}), losing {}x{} px",
        crop.width, crop.height, crop.x, crop.y, lost_w, lost_h
    );

    Ok(())
}
