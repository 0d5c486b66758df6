use serde::{Deserialize, Serialize};

/// Axis-aligned target rectangle `(x1, y1, x2, y2)` in pixels.
///
/// Degenerate rectangles are accepted; every derived dimension is floored at
/// one pixel instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Drawable area left inside a region once the margin is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Available {
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        span(self.x1, self.x2)
    }

    pub fn height(&self) -> u32 {
        span(self.y1, self.y2)
    }

    pub fn available(&self, margin: u32) -> Available {
        let inset = 2 * margin as i64;
        Available {
            width: clamp_px(self.width() as i64 - inset),
            height: clamp_px(self.height() as i64 - inset),
        }
    }

    /// Grows the region by `pad` on every side, clipped to `[0, width) x [0, height)`.
    pub fn inflate_within(&self, pad: i32, width: u32, height: u32) -> Option<Region> {
        let max_x = width.min(i32::MAX as u32) as i32;
        let max_y = height.min(i32::MAX as u32) as i32;
        let x1 = self.x1.saturating_sub(pad).clamp(0, max_x);
        let y1 = self.y1.saturating_sub(pad).clamp(0, max_y);
        let x2 = self.x2.saturating_add(pad).clamp(0, max_x);
        let y2 = self.y2.saturating_add(pad).clamp(0, max_y);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Region { x1, y1, x2, y2 })
    }
}

impl From<[i32; 4]> for Region {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<Region> for [i32; 4] {
    fn from(region: Region) -> Self {
        [region.x1, region.y1, region.x2, region.y2]
    }
}

fn span(start: i32, end: i32) -> u32 {
    clamp_px(end as i64 - start as i64)
}

fn clamp_px(value: i64) -> u32 {
    value.clamp(1, u32::MAX as i64) as u32
}
