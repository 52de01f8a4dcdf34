use image::{DynamicImage, Rgb, RgbImage};
use spiraldraw::{Dimensions, Drawing, ExportOptions, SpiralConfig};
use std::env::args;

fn main() {
    // a dark disc on a light background stands in for a photo
    let reference = RgbImage::from_fn(600, 600, |x, y| {
        let (dx, dy) = (x as f64 - 300., y as f64 - 300.);
        let distance = (dx * dx + dy * dy).sqrt();
        let shade = (distance / 300. * 255.).min(255.) as u8;
        Rgb([shade, shade, shade])
    });
    let reference = DynamicImage::ImageRgb8(reference);

    let config = SpiralConfig {
        seed: Some(2024),
        ..Default::default()
    };

    #[allow(clippy::unwrap_used)]
    let mut drawing = Drawing::builder()
        .config(config)
        .reference(&reference)
        .build()
        .unwrap();

    drawing.run_loops(60).expect("spiral failed");

    let blur = if args().any(|x| &x == "--blur") {
        Some(2.0)
    } else {
        None
    };
    drawing
        .export(
            "created.png",
            &ExportOptions {
                blur,
                resize: Some(Dimensions::from_wh(1000, 1000)),
            },
        )
        .expect("couldn't export");

    println!("Wrote created.png");
}
