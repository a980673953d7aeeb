//! Desktop and mobile rendering profiles.

use crate::palette::Palette;

/// Viewport width, in logical pixels, at or below which a device is
/// treated as constrained.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Device classification, derived from the viewport width by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Wider than the breakpoint.
    Desktop,
    /// At or below the breakpoint.
    Mobile,
}

impl DeviceClass {
    /// Classifies a viewport against `breakpoint`.
    #[must_use]
    pub fn from_viewport_width(width: f64, breakpoint: f64) -> Self {
        if width <= breakpoint { Self::Mobile } else { Self::Desktop }
    }

    /// Returns true for [`DeviceClass::Mobile`].
    #[must_use]
    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

/// Device-dependent rendering parameters, selected once per engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProfile {
    device: DeviceClass,
    cell_width: f64,
    cell_height: f64,
    palette: Palette,
    frame_skip: u32,
}

impl RenderProfile {
    /// 12x20 px cells, the full glyph ramp and every frame drawn.
    #[must_use]
    pub fn desktop() -> Self {
        Self {
            device: DeviceClass::Desktop,
            cell_width: 12.0,
            cell_height: 20.0,
            palette: Palette::full(),
            frame_skip: 1,
        }
    }

    /// 10x16 px cells, the reduced glyph ramp and every second frame drawn.
    #[must_use]
    pub fn mobile() -> Self {
        Self {
            device: DeviceClass::Mobile,
            cell_width: 10.0,
            cell_height: 16.0,
            palette: Palette::reduced(),
            frame_skip: 2,
        }
    }

    /// Profile for a device class.
    #[must_use]
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Desktop => Self::desktop(),
            DeviceClass::Mobile => Self::mobile(),
        }
    }

    /// Overrides the cell size in logical pixels.
    #[must_use]
    pub fn with_cell_size(mut self, width: f64, height: f64) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Overrides the frame-skip factor. Zero is treated as one.
    #[must_use]
    pub fn with_frame_skip(mut self, frame_skip: u32) -> Self {
        self.frame_skip = frame_skip.max(1);
        self
    }

    /// Overrides the glyph ramp.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Device class the profile was made for.
    #[must_use]
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Returns true for the mobile profile.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.device.is_mobile()
    }

    /// Cell size in logical pixels as `(width, height)`.
    #[must_use]
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    /// Glyph ramp for the wave field.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Only every `frame_skip`-th frame is drawn on mobile devices.
    #[must_use]
    pub fn frame_skip(&self) -> u32 {
        self.frame_skip
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::desktop()
    }
}
