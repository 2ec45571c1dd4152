//! End-to-end tests for the xray crates.
//!
//! Sources are written to disk, decoded, turned into a banner, exported as
//! PNG and decoded again, so every crate boundary is crossed.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::path::Path;
    use tempfile::tempdir;
    use xray_core::{ErrorKind, GenerationMode, ProcessOptions, RgbaBuffer};
    use xray_io::{GeneratedImage, ImageData};
    use xray_ops::{preview, Compositor, PreviewTheme};

    /// Writes a gray ramp: value depends on x, within `[lo, hi]`.
    fn write_gray_ramp(path: &Path, width: u32, height: u32, lo: u8, hi: u8) {
        let mut data = Vec::new();
        for _ in 0..height {
            for x in 0..width {
                let v = lo as u32 + (hi - lo) as u32 * x / (width - 1).max(1);
                data.extend_from_slice(&[v as u8; 3]);
            }
        }
        xray_io::png::write(path, &ImageData::from_u8(width, height, 3, data)).unwrap();
    }

    /// Writes a colorful RGBA test card with partial transparency.
    fn write_card(path: &Path, width: u32, height: u32) {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    ((x + y) % 256) as u8,
                    if x % 5 == 0 { 128 } else { 255 },
                ]);
            }
        }
        xray_io::png::write(path, &ImageData::from_u8(width, height, 4, data)).unwrap();
    }

    fn assert_translucent(buf: &RgbaBuffer) {
        for (i, p) in buf.pixels().enumerate() {
            assert!((1..=254).contains(&p[3]), "pixel {i} has alpha {}", p[3]);
        }
    }

    #[test]
    fn test_png_pipeline_all_modes() {
        let dir = tempdir().unwrap();
        let light_path = dir.path().join("light.png");
        let dark_path = dir.path().join("dark.png");
        write_card(&light_path, 90, 40);
        write_card(&dark_path, 31, 77);

        let light = xray_io::read_source(&light_path).unwrap();
        let dark = xray_io::read_source(&dark_path).unwrap();

        for mode in GenerationMode::ALL {
            for preserve_color in [false, true] {
                let opts = ProcessOptions::banner()
                    .with_size(300, 100)
                    .with_mode(mode)
                    .with_preserve_color(preserve_color);
                let banner = xray_ops::generate(&light, &dark, &opts).unwrap();
                assert_translucent(&banner);

                let out_path = dir.path().join(format!("{mode}-{preserve_color}.png"));
                GeneratedImage::encode(&banner).unwrap().write(&out_path).unwrap();

                let reread = xray_io::read(&out_path).unwrap();
                assert_eq!((reread.width, reread.height, reread.channels), (300, 100, 4));
                assert_eq!(reread.to_u8(), banner.as_bytes());
            }
        }
    }

    #[test]
    fn test_single_pixel_sources_make_full_banner() {
        let dir = tempdir().unwrap();
        let light_path = dir.path().join("l.png");
        let dark_path = dir.path().join("d.png");
        xray_io::png::write(&light_path, &ImageData::from_u8(1, 1, 3, vec![255, 0, 0])).unwrap();
        xray_io::png::write(&dark_path, &ImageData::from_u8(1, 1, 3, vec![100, 0, 0])).unwrap();

        let banner = xray_ops::generate(
            &xray_io::read_source(&light_path).unwrap(),
            &xray_io::read_source(&dark_path).unwrap(),
            &ProcessOptions::banner(),
        )
        .unwrap();
        assert_eq!(banner.dimensions(), (1500, 500));
        assert!(banner.pixels().all(|p| p == [154, 0, 0, 165]));
    }

    #[test]
    fn test_blended_gray_reads_correctly_on_both_themes() {
        let dir = tempdir().unwrap();
        let light_path = dir.path().join("light.png");
        let dark_path = dir.path().join("dark.png");
        write_gray_ramp(&light_path, 64, 8, 120, 255);
        write_gray_ramp(&dark_path, 64, 8, 0, 200);

        let light = xray_io::read_source(&light_path).unwrap();
        let dark = xray_io::read_source(&dark_path).unwrap();
        let job = Compositor::new(ProcessOptions::banner().with_size(64, 8)).unwrap();
        let (light_canvas, dark_canvas) = job.normalize_pair(&light, &dark).unwrap();
        let banner = job.composite(&light_canvas, &dark_canvas).unwrap();

        let on_white = preview(&banner, PreviewTheme::Light).unwrap();
        let on_black = preview(&banner, PreviewTheme::Dark).unwrap();

        for y in 0..8 {
            for x in 0..64 {
                let l = light_canvas.get(x, y)[0].max(dark_canvas.get(x, y)[0]);
                let d = dark_canvas.get(x, y)[0];
                assert_abs_diff_eq!(on_white.get(x, y)[0] as f32, l as f32, epsilon = 2.0);
                assert_abs_diff_eq!(on_black.get(x, y)[0] as f32, d as f32, epsilon = 2.0);
            }
        }
    }

    #[test]
    fn test_grayscale_scanlines_hide_each_theme() {
        let dir = tempdir().unwrap();
        let light_path = dir.path().join("light.png");
        let dark_path = dir.path().join("dark.png");
        write_gray_ramp(&light_path, 40, 10, 0, 255);
        write_gray_ramp(&dark_path, 40, 10, 255, 255);

        let opts = ProcessOptions::banner()
            .with_size(40, 10)
            .with_mode(GenerationMode::Scanlines);
        let banner = xray_ops::generate(
            &xray_io::read_source(&light_path).unwrap(),
            &xray_io::read_source(&dark_path).unwrap(),
            &opts,
        )
        .unwrap();

        let on_black = preview(&banner, PreviewTheme::Dark).unwrap();
        for x in 0..40 {
            // Light rows vanish on black.
            assert_eq!(on_black.get(x, 0), [0, 0, 0, 255]);
            // Dark rows show the (white) dark image, capped by alpha 254.
            assert_eq!(on_black.get(x, 1), [254, 254, 254, 255]);
        }
    }

    #[test]
    fn test_data_url_roundtrip() {
        let mut buf = RgbaBuffer::allocate(5, 3).unwrap();
        buf.put(4, 2, [10, 20, 30, 1]);
        buf.put(0, 0, [200, 100, 50, 254]);

        let encoded = GeneratedImage::encode(&buf).unwrap();
        let url = encoded.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let decoded = xray_io::read_data_url(&url).unwrap();
        assert_eq!(decoded.to_rgba_buffer().unwrap(), buf);
    }

    #[test]
    fn test_truncated_jpeg_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        let err = xray_io::read_source(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_unknown_format_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not an image").unwrap();
        let err = xray_io::read_source(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);

        let err = xray_io::read_source(dir.path().join("missing.png")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_oversized_banner_reports_unavailable_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("src.png");
        write_card(&path, 8, 8);
        let src = xray_io::read_source(&path).unwrap();

        for (w, h) in [(u32::MAX, u32::MAX), (200_000, 200_000)] {
            let opts = ProcessOptions::banner().with_size(w, h);
            let err = xray_ops::generate(&src, &src, &opts).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ContextUnavailable);
            assert_eq!(err.kind().user_message(), "Not enough memory to build the banner.");
        }
    }

    #[test]
    fn test_repeated_jobs_are_identical() {
        let dir = tempdir().unwrap();
        let light_path = dir.path().join("light.png");
        let dark_path = dir.path().join("dark.png");
        write_card(&light_path, 50, 50);
        write_card(&dark_path, 20, 60);
        let light = xray_io::read_source(&light_path).unwrap();
        let dark = xray_io::read_source(&dark_path).unwrap();

        let opts = ProcessOptions::banner()
            .with_size(150, 50)
            .with_mode(GenerationMode::Interlaced)
            .with_preserve_color(true);
        let a = GeneratedImage::encode(&xray_ops::generate(&light, &dark, &opts).unwrap()).unwrap();
        let b = GeneratedImage::encode(&xray_ops::generate(&light, &dark, &opts).unwrap()).unwrap();
        assert_eq!(a.png_bytes(), b.png_bytes());
    }
}
