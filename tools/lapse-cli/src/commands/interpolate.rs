//! Interpolate settings across a sequence directory.

use std::path::PathBuf;

use anyhow::Context;
use lapse_common::{LapseError, LapseResult, RunDefaults};
use lapse_core::{
    FramePipeline, FrameRecord, FrameSink, PipelineConfig, PipelineError, RunReport, SourceLookup,
};
use lapse_model::{OptionKey, ZoomRange, ZoomSpec};
use lapse_sequence::{backup_settings, LoadedSequence};

/// Flags of the `interpolate` subcommand.
pub struct InterpolateArgs {
    pub dir: PathBuf,
    pub dry_run: bool,
    pub json: bool,
    pub no_backup: bool,
    pub no_rewrite_keyframes: bool,
    pub aspect_drift: Option<String>,
    pub zoom_level: Option<ZoomRange>,
    pub zoom_anchor: Option<String>,
    pub zoom_easing: Option<String>,
    pub output: Option<String>,
    pub extensions: Vec<String>,
}

/// Flags override configured defaults one value at a time.
fn pipeline_config(defaults: &RunDefaults, args: &InterpolateArgs) -> PipelineConfig {
    PipelineConfig {
        drift: lenient_or(args.aspect_drift.as_deref(), defaults.drift),
        zoom: ZoomSpec {
            range: args.zoom_level.unwrap_or(defaults.zoom),
            anchor: lenient_or(args.zoom_anchor.as_deref(), defaults.anchor),
            easing: lenient_or(args.zoom_easing.as_deref(), defaults.easing),
        },
        output: lenient_or(args.output.as_deref(), defaults.output),
        rewrite_keyframes: !args.no_rewrite_keyframes,
    }
}

fn lenient_or<T: OptionKey>(value: Option<&str>, default: T) -> T {
    value.map(T::parse_lenient).unwrap_or(default)
}

pub fn run(defaults: &RunDefaults, args: InterpolateArgs) -> anyhow::Result<()> {
    if !args.dir.is_dir() {
        return Err(LapseError::FileNotFound { path: args.dir }.into());
    }

    let config = pipeline_config(defaults, &args);
    let extensions = super::extensions_or(defaults, args.extensions.clone());
    let loaded = LoadedSequence::load(&args.dir, &extensions)
        .with_context(|| format!("Failed to load sequence from {}", args.dir.display()))?;

    if loaded.frame_count() == 0 {
        println!(
            "{} in {} (extensions: {})",
            PipelineError::NoFrames,
            args.dir.display(),
            extensions.join(", ")
        );
        return Ok(());
    }
    println!("Found {} frames", loaded.frame_count());

    if loaded.keyframes.is_empty() {
        println!("{}", PipelineError::NoKeyframes);
        return Ok(());
    }

    println!();
    print_keyframes(&loaded);
    println!();

    let source = loaded.source_lookup();
    let pipeline = FramePipeline::new(config, source.rect);
    print_settings(&pipeline, &source);

    let backup = defaults.backup && !args.no_backup && !args.dry_run;
    if backup {
        match backup_settings(&loaded.root).context("Failed to back up settings files")? {
            Some(b) => println!("Backed up {} settings files to {}", b.files, b.dir.display()),
            None => println!("No settings files to back up"),
        }
    } else {
        tracing::debug!(dry_run = args.dry_run, "Skipping backup");
    }

    let sequence = loaded.sequence()?;
    let report = if args.dry_run {
        let mut sink = DryRunPrinter {
            loaded: &loaded,
            json: args.json,
        };
        pipeline.run(&sequence, &mut sink)?
    } else {
        let mut writer = loaded.writer();
        pipeline.run(&sequence, &mut writer)?
    };

    tracing::info!(
        frames = report.frames,
        created = report.created(),
        keyframes_rewritten = report.keyframes_rewritten,
        skipped = report.skipped_annotated,
        dry_run = args.dry_run,
        "Run complete"
    );
    println!();
    print_report(&report, args.dry_run);
    Ok(())
}

fn print_keyframes(loaded: &LoadedSequence) {
    println!("Keyframes: {}", loaded.keyframes.len());
    println!("  {:>6}  {:>6}  {:>6}  {:>6}  File", "Frame", "Temp", "Green", "Comp");
    for kf in &loaded.keyframes {
        let k = &kf.keyframe;
        println!(
            "  {:>6}  {:>6}  {:>6.3}  {:>+6.2}  {}",
            k.index,
            k.temperature() as i64,
            k.green(),
            k.compensation(),
            kf.frame.sidecar_name()
        );
    }
    for failed in &loaded.failed {
        println!("  {:>6}  skipped: {}", failed.frame.index, failed.error);
    }
}

fn print_settings(pipeline: &FramePipeline, source: &SourceLookup) {
    let config = pipeline.config();
    let (base, _) = pipeline.crop_at(0.0);
    let (width, height) = config.output.dimensions();

    println!("Source: {}", super::source_summary(source));
    println!(
        "Crop: {}x{} at ({}, {}), drift {}",
        base.width, base.height, base.x, base.y, config.drift
    );
    if config.zoom.is_active() {
        println!(
            "Zoom: {}% (anchor {}, easing {})",
            config.zoom.range, config.zoom.anchor, config.zoom.easing
        );
    }
    println!("Output: {width}x{height} ({})", config.output.label());
}

fn print_report(report: &RunReport, dry_run: bool) {
    let verb = if dry_run { "Would write" } else { "Wrote" };
    println!(
        "{verb} {} frames ({} interpolated, {} held), {} keyframes rewritten, {} annotated frames skipped",
        report.created(),
        report.interpolated,
        report.held,
        report.keyframes_rewritten,
        report.skipped_annotated
    );
}

/// Prints frames instead of writing them.
struct DryRunPrinter<'a> {
    loaded: &'a LoadedSequence,
    json: bool,
}

impl FrameSink for DryRunPrinter<'_> {
    fn write_frame(&mut self, record: &FrameRecord) -> LapseResult<()> {
        let line = if self.json {
            json_line(record)?
        } else {
            let name = self
                .loaded
                .frame(record.index)
                .map(|f| f.sidecar_name())
                .unwrap_or_default();
            dry_run_line(&name, record)
        };
        println!("{line}");
        Ok(())
    }
}

/// `[DRY] <sidecar>: T=.. G=.. C=.. Crop=[x,y,wxh]`, plus ` FOV=..%` when zooming.
///
/// Temperature and FOV percent are truncated, not rounded.
fn dry_run_line(name: &str, record: &FrameRecord) -> String {
    let e = &record.exposure;
    let c = &record.crop;
    let mut line = format!(
        "[DRY] {name}: T={} G={:.3} C={:+.2} Crop=[{},{},{}x{}]",
        e.temperature as i64, e.green, e.compensation, c.x, c.y, c.width, c.height
    );
    if let Some(fov) = record.fov {
        line.push_str(&format!(" FOV={}%", (fov * 100.0) as i64));
    }
    line
}

fn json_line(record: &FrameRecord) -> LapseResult<String> {
    Ok(serde_json::to_string(record)?)
}
