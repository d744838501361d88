use histo_common::{BackgroundMode, HistoError, OutputFormat, Rgb, RenderConfig};
use histo_engine::HistogramData;
use histo_render::{composite, StyleRegistry, STYLE_NAMES};

fn sample_data() -> HistogramData {
    let bins = 32;
    let ramp: Vec<f32> = (0..bins).map(|i| i as f32 / (bins - 1) as f32).collect();
    let inverse: Vec<f32> = ramp.iter().rev().copied().collect();
    let flat = vec![0.5f32; bins];
    HistogramData::new([ramp, flat, inverse], vec![Rgb::new(200, 100, 50)])
}

fn render(style: &str, cfg: &RenderConfig) -> Vec<u8> {
    let registry = StyleRegistry::new();
    let plan = registry
        .resolve(style)
        .unwrap()
        .render(&sample_data(), cfg)
        .unwrap();
    composite(&plan, cfg).unwrap().bytes
}

#[test]
fn test_png_decodes_at_requested_dimensions() {
    for (width, height_override, expect_w, expect_h) in [
        (800, None, 800, 494),
        (1200, None, 1200, 742),
        (1, None, 1, 1),
        (4096, None, 4096, 2532),
        (640, Some(480), 640, 480),
    ] {
        let cfg = RenderConfig {
            width,
            height_override,
            ..RenderConfig::default()
        };
        let bytes = render("minimal", &cfg);
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), expect_w);
        assert_eq!(img.height(), expect_h);
    }
}

#[test]
fn test_every_style_rasterizes() {
    let cfg = RenderConfig {
        width: 320,
        show_grid: true,
        ..RenderConfig::default()
    };
    for style in STYLE_NAMES {
        let bytes = render(style, &cfg);
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 320, "{style}");
        assert_eq!(img.height(), 198, "{style}");
    }
}

#[test]
fn test_transparent_png_has_transparent_corner() {
    let cfg = RenderConfig {
        width: 200,
        background: BackgroundMode::Transparent,
        ..RenderConfig::default()
    };
    let bytes = render("minimal", &cfg);
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0)[3], 0);
}

#[test]
fn test_dark_background_dominates_corner() {
    let cfg = RenderConfig {
        width: 200,
        background: BackgroundMode::Dark,
        ..RenderConfig::default()
    };
    let bytes = render("minimal", &cfg);
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let corner = img.get_pixel(0, 0);
    assert!(corner[0] < 80 && corner[1] < 80 && corner[2] < 80);
    assert_eq!(corner[3], 255);
}

#[test]
fn test_svg_output_is_valid_utf8_document() {
    let cfg = RenderConfig {
        output_format: OutputFormat::Svg,
        width: 400,
        ..RenderConfig::default()
    };
    for style in STYLE_NAMES {
        let bytes = render(style, &cfg);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<svg"), "{style}");
        assert!(text.contains("viewBox=\"0 0 400 247\""), "{style}");
        assert!(text.trim_end().ends_with("</svg>"), "{style}");
    }
}

#[test]
fn test_pdf_output_for_vector_styles() {
    let cfg = RenderConfig {
        output_format: OutputFormat::Pdf,
        width: 400,
        ..RenderConfig::default()
    };
    for style in STYLE_NAMES.iter().filter(|&&s| s != "original") {
        let bytes = render(style, &cfg);
        assert!(bytes.starts_with(b"%PDF-1.4"), "{style}");
        assert!(bytes.ends_with(b"%%EOF\n"), "{style}");
    }
}

#[test]
fn test_stipple_style_rejected_in_pdf() {
    let cfg = RenderConfig {
        output_format: OutputFormat::Pdf,
        width: 400,
        ..RenderConfig::default()
    };
    let registry = StyleRegistry::new();
    let plan = registry
        .resolve("original")
        .unwrap()
        .render(&sample_data(), &cfg)
        .unwrap();
    match composite(&plan, &cfg) {
        Err(HistoError::RenderError(msg)) => {
            assert!(msg.contains("stipple"));
            assert!(msg.contains("pdf"));
        }
        other => panic!("expected RenderError, got {other:?}"),
    }
}

#[test]
fn test_identical_input_yields_identical_bytes() {
    let cfg = RenderConfig {
        width: 256,
        ..RenderConfig::default()
    };
    for style in ["watercolor", "original", "retro_film"] {
        assert_eq!(render(style, &cfg), render(style, &cfg), "{style}");
    }
}
