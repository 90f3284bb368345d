//! List output resolutions.

use lapse_model::{OptionKey, OutputResolution};

pub fn run() -> anyhow::Result<()> {
    println!("Output resolutions:");
    for resolution in OutputResolution::ALL {
        let (width, height) = resolution.dimensions();
        let marker = if *resolution == OutputResolution::default() {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<6} {:>5}x{:<5} {}{marker}",
            resolution.key(),
            width,
            height,
            resolution.label()
        );
    }
    Ok(())
}
