use std::path::{Path, PathBuf};

use image::{GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use shelf_ngin::{
    data_structures::texture::{PixelLayout, expand_to_rgba, mip_chain, mip_level_count},
    resources::image::{DecodeError, ImageCrateDecoder, ImageDecoder},
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shelf-ngin-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn should_decode_rgb_images_bottom_row_first() {
    let root = scratch_dir("rgb");
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 0, 0]));
    img.put_pixel(0, 1, Rgb([0, 0, 255]));
    img.put_pixel(1, 1, Rgb([0, 0, 255]));
    img.save(root.join("flag.png")).unwrap();

    let decoded = ImageCrateDecoder::new(&root)
        .decode(Path::new("flag.png"))
        .unwrap();

    assert_eq!((decoded.width, decoded.height, decoded.channels), (2, 2, 3));
    // the blue bottom row of the file comes first
    assert_eq!(&decoded.pixels[..3], &[0u8, 0, 255]);
    assert_eq!(&decoded.pixels[6..9], &[255u8, 0, 0]);
}

#[test]
fn should_keep_the_alpha_channel() {
    let root = scratch_dir("rgba");
    RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 40]))
        .save(root.join("lid.png"))
        .unwrap();

    let decoded = ImageCrateDecoder::new(&root)
        .decode(Path::new("lid.png"))
        .unwrap();

    assert_eq!(decoded.channels, 4);
    assert_eq!(decoded.pixels, [10u8, 20, 30, 40].repeat(3));
}

#[test]
fn should_report_the_channel_count_of_grey_images() {
    let root = scratch_dir("grey");
    GrayAlphaImage::from_pixel(2, 2, LumaA([100, 255]))
        .save(root.join("grey.png"))
        .unwrap();

    let decoded = ImageCrateDecoder::new(&root)
        .decode(Path::new("grey.png"))
        .unwrap();

    assert_eq!(decoded.channels, 2);
    assert_eq!(PixelLayout::from_channels(decoded.channels), None);
}

#[test]
fn should_report_missing_files() {
    let decoder = ImageCrateDecoder::new(scratch_dir("missing"));

    let result = decoder.decode(Path::new("textures/nope.jpg"));

    assert!(matches!(
        result,
        Err(DecodeError::NotFound(path)) if path.ends_with("textures/nope.jpg")
    ));
}

#[test]
fn should_report_files_that_are_not_images() {
    let root = scratch_dir("garbage");
    std::fs::write(root.join("wood.jpg"), b"definitely not a jpeg").unwrap();

    let result = ImageCrateDecoder::new(&root).decode(Path::new("wood.jpg"));

    assert!(matches!(result, Err(DecodeError::Image { .. })));
}

#[test]
fn should_resolve_relative_paths_against_the_root() {
    let decoder = ImageCrateDecoder::new("/srv/assets");

    assert_eq!(
        decoder.resolve(Path::new("textures/wood.jpg")),
        PathBuf::from("/srv/assets/textures/wood.jpg")
    );
    assert_eq!(
        decoder.resolve(Path::new("/tmp/wood.jpg")),
        PathBuf::from("/tmp/wood.jpg")
    );
}

#[test]
fn should_count_mip_levels_down_to_one_pixel() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 2), 2);
    assert_eq!(mip_level_count(256, 256), 9);
    assert_eq!(mip_level_count(1024, 512), 11);
    assert_eq!(mip_level_count(300, 7), 9);
}

#[test]
fn should_halve_every_mip_level() {
    let levels = mip_chain(RgbaImage::from_pixel(8, 2, Rgba([200, 100, 50, 255])));

    let sizes: Vec<_> = levels.iter().map(|level| level.dimensions()).collect();
    assert_eq!(sizes, [(8, 2), (4, 1), (2, 1), (1, 1)]);
    // a flat colour stays flat
    assert_eq!(*levels[3].get_pixel(0, 0), Rgba([200, 100, 50, 255]));
}

#[test]
fn should_expand_rgb_to_opaque_rgba() {
    let rgb = [1, 2, 3, 4, 5, 6];

    assert_eq!(
        expand_to_rgba(&rgb, PixelLayout::Rgb8),
        [1, 2, 3, 255, 4, 5, 6, 255]
    );
    assert_eq!(expand_to_rgba(&[9, 8, 7, 6], PixelLayout::Rgba8), [9, 8, 7, 6]);
    assert_eq!(PixelLayout::Rgb8.channels(), 3);
    assert_eq!(PixelLayout::from_channels(4), Some(PixelLayout::Rgba8));
}
