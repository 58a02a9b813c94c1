use punchkit_core::{HoleShape, SampleMode, SampleParams};
use punchkit_sampler::{sample, RasterBuffer};

fn uniform_gray(width: u32, height: u32, value: u8) -> RasterBuffer {
    RasterBuffer::uniform(width, height, [value, value, value, 255])
}

fn gray_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> RasterBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = f(x, y);
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RasterBuffer::from_rgba(width, height, data).unwrap()
}

fn base_params() -> SampleParams {
    SampleParams {
        mode: SampleMode::Density,
        hole_diameters: vec![3.0, 5.0, 8.0],
        hole_spacing_mm: 10.0,
        edge_margin_mm: 0.0,
        brightness_pct: 100.0,
        contrast_pct: 100.0,
        rotation_deg: 0.0,
        panel_length_mm: 100.0,
        panel_height_mm: 100.0,
        shape: HoleShape::Circle,
    }
}

#[test]
fn test_mid_gray_buckets_to_middle_diameter() {
    let raster = uniform_gray(100, 100, 128);
    let mut params = base_params();
    params.hole_spacing_mm = 50.0;
    params.panel_length_mm = 1000.0;
    params.panel_height_mm = 600.0;

    let holes = sample(&raster, &params).unwrap();

    assert!(!holes.is_empty());
    for hole in &holes {
        assert_eq!(hole.diameter, 5.0);
        let intensity = hole.intensity.unwrap();
        assert!(intensity > 0.49 && intensity < 0.51);
    }
}

#[test]
fn test_darker_bands_get_larger_diameters() {
    // Three vertical bands: black, mid gray, white.
    let raster = gray_from_fn(90, 90, |x, _| match x {
        0..=29 => 0,
        30..=59 => 128,
        _ => 255,
    });
    let mut params = base_params();
    params.panel_length_mm = 90.0;
    params.panel_height_mm = 90.0;

    let holes = sample(&raster, &params).unwrap();

    assert!(!holes.is_empty());
    for hole in &holes {
        if hole.x < 30.0 {
            assert_eq!(hole.diameter, 8.0);
        } else {
            assert_eq!(hole.diameter, 5.0);
        }
        // The white band emits nothing.
        assert!(hole.x < 60.0);
    }
}

#[test]
fn test_edge_margin_excludes_border_band() {
    let raster = uniform_gray(100, 100, 0);
    for mode in [SampleMode::Density, SampleMode::Contour, SampleMode::Pixel] {
        let mut params = base_params();
        params.mode = mode;
        params.hole_spacing_mm = 25.0;
        params.edge_margin_mm = 50.0;
        params.panel_length_mm = 500.0;
        params.panel_height_mm = 500.0;

        let holes = sample(&raster, &params).unwrap();
        for hole in &holes {
            assert!(hole.x >= 50.0 && hole.x <= 450.0);
            assert!(hole.y >= 50.0 && hole.y <= 450.0);
        }
    }
}

#[test]
fn test_contour_marks_step_edge_at_middle_diameter() {
    // Left half black, right half white.
    let raster = gray_from_fn(20, 20, |x, _| if x < 10 { 0 } else { 255 });
    let mut params = base_params();
    params.mode = SampleMode::Contour;
    params.hole_spacing_mm = 1.0;
    params.panel_length_mm = 20.0;
    params.panel_height_mm = 20.0;

    let holes = sample(&raster, &params).unwrap();

    // Only the last dark column sees the jump to its right neighbor.
    assert_eq!(holes.len(), 20);
    for hole in &holes {
        assert_eq!(hole.x, 9.0);
        assert_eq!(hole.diameter, 5.0);
        assert!(hole.intensity.unwrap() > 0.3);
    }
}

#[test]
fn test_contour_is_silent_on_flat_image() {
    let raster = uniform_gray(50, 50, 60);
    let mut params = base_params();
    params.mode = SampleMode::Contour;
    params.panel_length_mm = 50.0;
    params.panel_height_mm = 50.0;

    let holes = sample(&raster, &params).unwrap();
    assert!(holes.is_empty());
}

#[test]
fn test_pixel_mode_binary_diameters() {
    // Dark left half, light right half, both above the emit threshold.
    let raster = gray_from_fn(100, 100, |x, _| if x < 50 { 40 } else { 180 });
    let mut params = base_params();
    params.mode = SampleMode::Pixel;
    params.hole_spacing_mm = 2.0;

    let holes = sample(&raster, &params).unwrap();

    // Cell stride is max(2 * 2px, 5px) = 5px, so 20 columns by 20 rows.
    assert_eq!(holes.len(), 400);
    let large = holes.iter().filter(|h| h.diameter == 8.0).count();
    let small = holes.iter().filter(|h| h.diameter == 3.0).count();
    assert_eq!(large, 200);
    assert_eq!(small, 200);
    for hole in &holes {
        if hole.x < 50.0 {
            assert_eq!(hole.diameter, 8.0);
        } else {
            assert_eq!(hole.diameter, 3.0);
        }
    }
}

#[test]
fn test_pixel_mode_skips_near_white() {
    let raster = uniform_gray(50, 50, 230);
    let mut params = base_params();
    params.mode = SampleMode::Pixel;
    params.panel_length_mm = 50.0;
    params.panel_height_mm = 50.0;

    let holes = sample(&raster, &params).unwrap();
    assert!(holes.is_empty());
}

#[test]
fn test_empty_diameters_is_config_error() {
    let raster = uniform_gray(10, 10, 0);
    let mut params = base_params();
    params.hole_diameters.clear();

    let err = sample(&raster, &params).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_zero_sized_image_returns_empty() {
    let raster = RasterBuffer::from_rgba(0, 0, Vec::new()).unwrap();
    let holes = sample(&raster, &base_params()).unwrap();
    assert!(holes.is_empty());
}

#[test]
fn test_zero_sized_panel_returns_empty() {
    let raster = uniform_gray(10, 10, 0);
    let mut params = base_params();
    params.panel_length_mm = 0.0;

    let holes = sample(&raster, &params).unwrap();
    assert!(holes.is_empty());
}

#[test]
fn test_fractional_strides_emit_unrounded_positions() {
    let raster = uniform_gray(100, 100, 0);
    let mut params = base_params();
    // 2.5 px stride at a 2.5 mm/px scale.
    params.hole_spacing_mm = 6.25;
    params.panel_length_mm = 250.0;
    params.panel_height_mm = 250.0;

    let holes = sample(&raster, &params).unwrap();

    assert!(holes.len() > 2);
    assert_eq!(holes[0].x, 0.0);
    assert!((holes[1].x - 6.25).abs() < 1e-9);
}

#[test]
fn test_brightness_prepass_feeds_sampling() {
    let raster = uniform_gray(50, 50, 128);
    let mut params = base_params();
    params.panel_length_mm = 50.0;
    params.panel_height_mm = 50.0;

    let normal = sample(&raster, &params).unwrap();
    assert!(!normal.is_empty());

    // Doubled brightness saturates mid gray to white, below the emit
    // threshold.
    params.brightness_pct = 200.0;
    let brightened = sample(&raster, &params).unwrap();
    assert!(brightened.is_empty());
}

#[test]
fn test_rotation_prepass_feeds_sampling() {
    // Dark left half rotates to the top half under a quarter turn.
    let raster = gray_from_fn(100, 100, |x, _| if x < 50 { 0 } else { 255 });
    let mut params = base_params();
    params.rotation_deg = 90.0;

    let holes = sample(&raster, &params).unwrap();

    assert_eq!(holes.len(), 50);
    for hole in &holes {
        assert!(hole.y < 50.0);
    }
}

#[test]
fn test_holes_carry_configured_shape() {
    let raster = uniform_gray(20, 20, 0);
    let mut params = base_params();
    params.shape = HoleShape::Hexagon;
    params.panel_length_mm = 20.0;
    params.panel_height_mm = 20.0;

    let holes = sample(&raster, &params).unwrap();
    assert!(!holes.is_empty());
    assert!(holes.iter().all(|h| h.shape == HoleShape::Hexagon));
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use punchkit_sampler::PixelToMm;

    proptest! {
        #[test]
        fn scale_round_trip_recovers_pixels(
            panel_length in 1.0f64..5000.0,
            panel_height in 1.0f64..5000.0,
            width in 1u32..4000,
            height in 1u32..4000,
            px in 0.0f64..4000.0,
            py in 0.0f64..4000.0,
        ) {
            let mapper = PixelToMm::new(panel_length, panel_height, width, height);
            let (mm_x, mm_y) = mapper.to_panel_space(px, py);
            let (back_x, back_y) = mapper.to_pixel_space(mm_x, mm_y);
            prop_assert!((back_x - px).abs() < 1e-6 * px.max(1.0));
            prop_assert!((back_y - py).abs() < 1e-6 * py.max(1.0));
        }

        #[test]
        fn holes_stay_inside_panel(
            gray in 0u8..=255u8,
            spacing in 1.0f64..30.0,
            margin in 0.0f64..40.0,
        ) {
            let raster = uniform_gray(64, 48, gray);
            let mut params = base_params();
            params.hole_spacing_mm = spacing;
            params.edge_margin_mm = margin;
            params.panel_length_mm = 320.0;
            params.panel_height_mm = 240.0;

            let holes = sample(&raster, &params).unwrap();
            for hole in holes {
                prop_assert!(hole.x >= 0.0 && hole.x <= 320.0);
                prop_assert!(hole.y >= 0.0 && hole.y <= 240.0);
            }
        }

        #[test]
        fn darker_never_gets_smaller_diameter(a in 0u8..=255u8, b in 0u8..=255u8) {
            let (dark, light) = if a <= b { (a, b) } else { (b, a) };
            let params = base_params();

            let dark_holes = sample(&uniform_gray(20, 20, dark), &params).unwrap();
            let light_holes = sample(&uniform_gray(20, 20, light), &params).unwrap();
            if let (Some(d), Some(l)) = (dark_holes.first(), light_holes.first()) {
                prop_assert!(d.diameter >= l.diameter);
            }
        }
    }
}
