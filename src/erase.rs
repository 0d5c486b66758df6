use image::RgbaImage;

use crate::typeset::{Color, Region};

/// Pixels added around each region so glyph outlines are covered too.
pub const ERASE_PADDING: i32 = 2;

/// Paints every region, grown by [`ERASE_PADDING`] and clipped to the image,
/// with a solid color. Returns how many regions touched the image.
pub fn erase_regions(image: &mut RgbaImage, regions: &[Region], fill: Color) -> usize {
    let (width, height) = image.dimensions();
    let pixel = fill.to_rgba();
    let mut painted = 0;
    for region in regions {
        let Some(area) = region.inflate_within(ERASE_PADDING, width, height) else {
            continue;
        };
        for y in area.y1..area.y2 {
            for x in area.x1..area.x2 {
                image.put_pixel(x as u32, y as u32, pixel);
            }
        }
        painted += 1;
    }
    painted
}
