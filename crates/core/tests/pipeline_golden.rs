use lapse_core::{FrameKind, FramePipeline, FrameRecord, PipelineConfig, Sequence};
use lapse_model::{
    CropRect, DriftMode, Easing, ExposureValues, Keyframe, OutputResolution, SourceRect,
    ZoomAnchor, ZoomRange, ZoomSpec,
};

fn sunrise_config() -> PipelineConfig {
    PipelineConfig {
        drift: DriftMode::TopToBottom,
        zoom: ZoomSpec {
            range: ZoomRange::parse("100-70").unwrap(),
            anchor: ZoomAnchor::Bottom,
            easing: Easing::EaseInOut,
        },
        output: OutputResolution::Res5k,
        rewrite_keyframes: true,
    }
}

fn sunrise_frames() -> Vec<FrameRecord> {
    let sequence = Sequence::with_keyframes(
        10,
        vec![
            Keyframe::new(6, ExposureValues::new(7200.0, 1.3, 1.25)),
            Keyframe::new(0, ExposureValues::new(4800.0, 0.9, -0.5)),
        ],
    )
    .expect("keyframes should be valid");

    let pipeline = FramePipeline::new(sunrise_config(), SourceRect::DEFAULT_SENSOR);
    let mut frames: Vec<FrameRecord> = vec![];
    pipeline
        .run(&sequence, &mut frames)
        .expect("pipeline should run");
    frames
}

#[test]
fn drift_zoom_sequence_matches_reference_crops() {
    let expected = [
        CropRect::new(0, 0, 6056, 3406),
        CropRect::new(31, 105, 5993, 3370),
        CropRect::new(115, 268, 5826, 3277),
        CropRect::new(236, 473, 5584, 3141),
        CropRect::new(379, 705, 5298, 2979),
        CropRect::new(530, 943, 4996, 2810),
        CropRect::new(673, 1174, 4710, 2649),
        CropRect::new(794, 1379, 4468, 2513),
        CropRect::new(877, 1543, 4301, 2419),
        CropRect::new(908, 1648, 4239, 2384),
    ];

    let frames = sunrise_frames();
    assert_eq!(frames.len(), expected.len());
    for (frame, crop) in frames.iter().zip(expected) {
        assert_eq!(frame.crop, crop, "frame {}", frame.index);
        assert!(SourceRect::DEFAULT_SENSOR.contains(&frame.crop));
        assert_eq!((frame.resize.width, frame.resize.height), (5120, 2880));
    }
}

#[test]
fn drift_zoom_sequence_matches_reference_exposure() {
    let expected = [
        (4800, "0.900", "-0.500"),
        (4977, "0.930", "-0.370"),
        (5422, "1.004", "-0.046"),
        (6000, "1.100", "0.375"),
        (6577, "1.196", "0.796"),
        (7022, "1.270", "1.120"),
        (7200, "1.300", "1.250"),
        (7200, "1.300", "1.250"),
        (7200, "1.300", "1.250"),
        (7200, "1.300", "1.250"),
    ];

    let frames = sunrise_frames();
    for (frame, (temperature, green, compensation)) in frames.iter().zip(expected) {
        assert_eq!(frame.exposure.temperature as i64, temperature, "frame {}", frame.index);
        assert_eq!(format!("{:.3}", frame.exposure.green), green);
        assert_eq!(format!("{:.3}", frame.exposure.compensation), compensation);
    }

    assert_eq!(frames[0].kind, FrameKind::Keyframe);
    assert_eq!(frames[3].kind, FrameKind::Interpolated { prev: 0, next: 6 });
    assert_eq!(frames[9].kind, FrameKind::Held { keyframe: 6 });
}

#[test]
fn frame_records_serialize_for_reporting() {
    let frames = sunrise_frames();
    let json = serde_json::to_value(frames[3]).unwrap();
    assert_eq!(json["kind"]["kind"], "interpolated");
    assert_eq!(json["crop"]["width"], 5584);
}
