use super::*;

use image::Rgba;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn solid(w: u32, h: u32, px: Rgba<u8>) -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(w, h, px))
}

#[test]
fn composite_places_foreground_at_offset() {
    let tool = RasterTool::default();
    let out = tool
        .composite(&solid(2, 2, RED), &solid(6, 6, BLACK), Offset::new(3, 1), None)
        .unwrap();

    assert_eq!(out.dimensions(), (6, 6));
    assert_eq!(*out.get_pixel(3, 1), RED);
    assert_eq!(*out.get_pixel(4, 2), RED);
    assert_eq!(*out.get_pixel(2, 1), BLACK);
    assert_eq!(*out.get_pixel(5, 3), BLACK);
}

#[test]
fn composite_clips_negative_offsets_and_leaves_inputs_alone() {
    let tool = RasterTool::default();
    let bg = solid(4, 4, BLACK);
    let out = tool
        .composite(&solid(3, 3, RED), &bg, Offset::new(-2, -2), None)
        .unwrap();

    assert_eq!(*out.get_pixel(0, 0), RED);
    assert_eq!(*out.get_pixel(1, 1), BLACK);
    assert_eq!(*bg.get_pixel(0, 0), BLACK);
}

#[test]
fn composite_scales_to_requested_size() {
    let tool = RasterTool::default();
    let out = tool
        .composite(
            &solid(1, 1, RED),
            &solid(8, 8, BLACK),
            Offset::default(),
            Some(Geometry {
                width: 4,
                height: 4,
            }),
        )
        .unwrap();

    assert_eq!(*out.get_pixel(3, 3), RED);
    assert_eq!(*out.get_pixel(4, 4), BLACK);
}

#[test]
fn write_then_load_relative_to_root() {
    let dir = PathBuf::from("target").join("raster_unit");
    let tool = RasterTool::new(&dir);
    let dest = dir.join("tile.png");
    let _ = std::fs::remove_file(&dest);

    tool.write(&solid(3, 2, RED), &dest).unwrap();
    let loaded = tool.load("tile.png").unwrap();
    assert_eq!(loaded.dimensions(), (3, 2));
    assert_eq!(*loaded.get_pixel(2, 1), RED);
}

#[test]
fn load_missing_file_fails() {
    let tool = RasterTool::new(PathBuf::from("target").join("raster_unit_missing"));
    let err = tool.load("nope.png").unwrap_err();
    assert!(err.to_string().contains("nope.png"));
}
