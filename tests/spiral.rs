use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use spiraldraw::{
    feedback_offset, loop_steps, Canvas, Dimensions, Drawing, ExportOptions, Growth, LineWidth,
    LuminanceSampler, Point, SpiralConfig, SpiralError, SpiralGenerator, Surface,
};

fn free_config() -> SpiralConfig {
    SpiralConfig {
        growth: Growth::Free,
        ..Default::default()
    }
}

#[test]
fn test_single_free_loop() {
    let mut drawing = Drawing::builder().config(free_config()).seed(1).build().unwrap();
    drawing.run_loops(1).unwrap();

    let history = drawing.history();
    assert_eq!(loop_steps(60., 0.4).unwrap(), 150);
    assert_eq!(history.loops()[0].steps(), 150);

    let first = history.points()[0];
    assert!((first.radius() - (60. + 14. / 150.)).abs() < 1e-9);
    assert_eq!(first.angle(), 0.);

    // point on the positive x-axis lands right of centre on the canvas
    let image = drawing.canvas().image();
    assert_eq!(*image.get_pixel(1560, 1500), Rgb([0, 0, 0]));
    assert_eq!(*image.get_pixel(1500, 1500), Rgb([255, 255, 255]));
}

#[test]
fn test_luminance_widths_for_black_and_white_references() {
    let canvas = Dimensions::from_wh(300, 300);
    let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([0, 0, 0])));
    let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([255, 255, 255])));
    let config = SpiralConfig::default();

    let on_black =
        LineWidth::from_config(&config, Some(LuminanceSampler::new(&black, canvas).unwrap()));
    let on_white =
        LineWidth::from_config(&config, Some(LuminanceSampler::new(&white, canvas).unwrap()));

    assert_eq!(on_black.at(Point { x: 150, y: 150 }), 24);
    assert_eq!(on_white.at(Point { x: 150, y: 150 }), 3);
    // off the field counts as white padding
    assert_eq!(on_black.at(Point { x: 900, y: 150 }), 3);
}

#[test]
fn test_feedback_loops_without_jitter_are_exact() {
    let config = SpiralConfig {
        max_jitter: 0,
        ..Default::default()
    };
    let width = LineWidth::from_config(&config, None);
    let mut canvas = Canvas::new(config.canvas, config.background);
    let mut spiral = SpiralGenerator::new(config, width, SmallRng::from_entropy()).unwrap();
    spiral.run_loops(3, &mut canvas).unwrap();

    let history = spiral.history();
    let loops = history.loops();
    assert_eq!(loops.len(), 3);
    assert_eq!(
        history.len(),
        loops.iter().map(|l| l.steps()).sum::<usize>()
    );

    let points = history.points();
    for (previous, current) in [(loops[0], loops[1]), (loops[1], loops[2])] {
        for i in 0..current.steps() {
            let global = current.range().start + i;
            let offset = feedback_offset(i, current.steps(), previous.steps());
            assert_eq!(points[global].radius(), points[global - offset].radius() + 14.);
        }
    }
}

#[test]
fn test_degenerate_start_radius() {
    let mut drawing = Drawing::builder()
        .config(SpiralConfig {
            start_radius: 0.3,
            ..Default::default()
        })
        .build()
        .unwrap();

    match drawing.run_loops(1) {
        Err(SpiralError::DegenerateLoop { radius, .. }) => assert_eq!(radius, 0.3),
        other => panic!("expected a degenerate loop, got {:?}", other),
    }
}

#[test]
fn test_spiral_past_reference_border() {
    // the spiral outgrows a tiny canvas; sampling and drawing must clip quietly
    let reference = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([0, 0, 0])));
    let mut drawing = Drawing::builder()
        .config(SpiralConfig {
            canvas: Dimensions::from_wh(200, 200),
            start_radius: 20.,
            ..Default::default()
        })
        .reference(&reference)
        .seed(11)
        .build()
        .unwrap();

    drawing.run_loops(10).unwrap();
    assert!(drawing.generator().current_radius() > 100.);
}

#[test]
fn test_export_writes_resized_png() {
    let mut drawing = Drawing::builder()
        .config(SpiralConfig {
            canvas: Dimensions::from_wh(300, 300),
            start_radius: 20.,
            ..Default::default()
        })
        .seed(5)
        .build()
        .unwrap();
    drawing.run_loops(3).unwrap();

    let folder = std::env::temp_dir().join(format!("spiral-draw-export-{}", std::process::id()));
    let path = drawing
        .export_to_folder(
            &folder,
            &ExportOptions {
                blur: Some(1.0),
                resize: Some(Dimensions::from_wh(120, 90)),
            },
        )
        .unwrap();

    let written = image::open(&path).unwrap();
    assert_eq!((written.width(), written.height()), (120, 90));

    std::fs::remove_dir_all(&folder).unwrap();
}

#[test]
fn test_recording_surface() {
    struct Counter(usize);

    impl Surface for Counter {
        fn dimensions(&self) -> Dimensions {
            Dimensions::from_wh(3000, 3000)
        }

        fn draw_line(&mut self, _: Point<i32>, _: Point<i32>, _: Rgb<u8>, _: u32) {
            self.0 += 1;
        }
    }

    let config = free_config();
    let width = LineWidth::from_config(&config, None);
    let mut spiral = SpiralGenerator::new(config, width, SmallRng::seed_from_u64(0)).unwrap();
    let mut counter = Counter(0);
    spiral.run_loops(2, &mut counter).unwrap();

    assert_eq!(counter.0, spiral.history().len());
}
