//! Banner safe zones.
//!
//! Profile pages cover parts of a header banner: desktop layouts may crop
//! the top and bottom, and the profile avatar overlaps the lower left. Zones
//! are stored as fractions of the banner so they apply at any output size.

use tracing::trace;
use xray_core::{Rgb8, RgbaBuffer};

/// What a zone means for banner content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeZoneKind {
    /// May be cropped away on desktop layouts.
    CropRisk,
    /// Covered by the profile avatar.
    AvatarObstruction,
    /// Always visible.
    SafeCenter,
}

impl SafeZoneKind {
    /// Whether content placed here may be hidden.
    #[inline]
    pub fn is_risk(self) -> bool {
        !matches!(self, Self::SafeCenter)
    }
}

/// A rectangular region in banner fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    /// Zone meaning.
    pub kind: SafeZoneKind,
    /// Left edge, fraction of width.
    pub left: f64,
    /// Top edge, fraction of height.
    pub top: f64,
    /// Width, fraction of banner width.
    pub width: f64,
    /// Height, fraction of banner height.
    pub height: f64,
}

/// Pixel rectangle, half-open: `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x0: u32,
    /// Top row.
    pub y0: u32,
    /// One past the right column.
    pub x1: u32,
    /// One past the bottom row.
    pub y1: u32,
}

impl PixelRect {
    /// Whether (x, y) lies inside.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Whether (x, y) lies on the one-pixel border.
    #[inline]
    pub fn on_border(&self, x: u32, y: u32) -> bool {
        self.contains(x, y)
            && (x == self.x0 || y == self.y0 || x + 1 == self.x1 || y + 1 == self.y1)
    }
}

impl SafeZone {
    /// Converts the zone to pixels on a `width`x`height` banner.
    pub fn rect(&self, width: u32, height: u32) -> PixelRect {
        let px = |frac: f64, total: u32| ((frac * total as f64).round().max(0.0) as u32).min(total);
        PixelRect {
            x0: px(self.left, width),
            y0: px(self.top, height),
            x1: px(self.left + self.width, width),
            y1: px(self.top + self.height, height),
        }
    }
}

/// Header banner zones of the target platform.
pub const BANNER_SAFE_ZONES: [SafeZone; 4] = [
    SafeZone {
        kind: SafeZoneKind::CropRisk,
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 0.15,
    },
    SafeZone {
        kind: SafeZoneKind::CropRisk,
        left: 0.0,
        top: 0.85,
        width: 1.0,
        height: 0.15,
    },
    SafeZone {
        kind: SafeZoneKind::AvatarObstruction,
        left: 0.02,
        top: 0.40,
        width: 0.24,
        height: 0.60,
    },
    SafeZone {
        kind: SafeZoneKind::SafeCenter,
        left: 0.26,
        top: 0.15,
        width: 0.69,
        height: 0.70,
    },
];

const RISK_TINT: Rgb8 = [0xEF, 0x44, 0x44];
const SAFE_OUTLINE: Rgb8 = [0x10, 0xB9, 0x81];

/// Tint strength per zone kind.
fn tint_strength(kind: SafeZoneKind) -> f64 {
    match kind {
        SafeZoneKind::CropRisk => 0.10,
        SafeZoneKind::AvatarObstruction => 0.20,
        SafeZoneKind::SafeCenter => 0.30,
    }
}

fn mix(px: [u8; 4], tint: Rgb8, strength: f64) -> [u8; 4] {
    let m = |c: usize| xray_core::to_byte(px[c] as f64 * (1.0 - strength) + tint[c] as f64 * strength);
    [m(0), m(1), m(2), px[3]]
}

/// Marks `zones` on a preview buffer in place.
///
/// Risk zones are tinted red; the safe center gets a green outline.
pub fn overlay_safe_zones(buffer: &mut RgbaBuffer, zones: &[SafeZone]) {
    let (width, height) = buffer.dimensions();
    trace!(width, height, zones = zones.len(), "overlay_safe_zones");

    for zone in zones {
        let rect = zone.rect(width, height);
        let strength = tint_strength(zone.kind);
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                if zone.kind.is_risk() {
                    buffer.put(x, y, mix(buffer.get(x, y), RISK_TINT, strength));
                } else if rect.on_border(x, y) {
                    buffer.put(x, y, mix(buffer.get(x, y), SAFE_OUTLINE, strength));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_rects() {
        let [top, bottom, avatar, center] = BANNER_SAFE_ZONES.map(|z| z.rect(1500, 500));
        assert_eq!(top, PixelRect { x0: 0, y0: 0, x1: 1500, y1: 75 });
        assert_eq!(bottom, PixelRect { x0: 0, y0: 425, x1: 1500, y1: 500 });
        assert_eq!(avatar, PixelRect { x0: 30, y0: 200, x1: 390, y1: 500 });
        assert_eq!(center, PixelRect { x0: 390, y0: 75, x1: 1425, y1: 425 });
    }

    #[test]
    fn test_overlay_tints_risk_only() {
        let mut buf = RgbaBuffer::filled(100, 100, [0, 0, 0, 255]).unwrap();
        overlay_safe_zones(&mut buf, &BANNER_SAFE_ZONES);
        // Top crop band is red-tinted.
        assert!(buf.get(50, 5)[0] > 0);
        // Interior of the safe center is untouched.
        assert_eq!(buf.get(60, 50), [0, 0, 0, 255]);
        // Alpha is never altered.
        assert!(buf.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_rect_clamps_to_banner() {
        let z = SafeZone {
            kind: SafeZoneKind::CropRisk,
            left: 0.9,
            top: -0.1,
            width: 0.5,
            height: 0.2,
        };
        assert_eq!(z.rect(10, 10), PixelRect { x0: 9, y0: 0, x1: 10, y1: 1 });
    }
}
