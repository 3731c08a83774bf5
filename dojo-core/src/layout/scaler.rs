use std::str::FromStr;

use crate::foundation::error::{DojoError, DojoResult};

const REF_WIDTH: f64 = 160.0;
const REF_HEIGHT: f64 = 320.0;

/// Device frames used by the scaling previews.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Device {
    /// 16:9 phone.
    IphoneSe,
    /// 19.5:9 phone.
    Iphone14,
    /// 4:3 tablet.
    Ipad,
    /// 21:9 phone.
    AndroidTall,
}

/// Frame size and labels of a [`Device`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    /// Frame width in preview pixels.
    pub width: f64,
    /// Frame height in preview pixels.
    pub height: f64,
    /// Display label.
    pub label: &'static str,
    /// Aspect ratio label.
    pub ratio: &'static str,
    /// Native resolution label.
    pub resolution: &'static str,
}

impl Device {
    /// Every device, in preview order.
    pub const ALL: [Device; 4] = [
        Device::IphoneSe,
        Device::Iphone14,
        Device::Ipad,
        Device::AndroidTall,
    ];

    /// Kebab-case identifier.
    pub fn id(self) -> &'static str {
        match self {
            Device::IphoneSe => "iphone-se",
            Device::Iphone14 => "iphone-14",
            Device::Ipad => "ipad",
            Device::AndroidTall => "android-tall",
        }
    }

    /// Frame metrics.
    pub fn profile(self) -> DeviceProfile {
        match self {
            Device::IphoneSe => DeviceProfile {
                width: 180.0,
                height: 320.0,
                label: "iPhone SE",
                ratio: "16:9",
                resolution: "750×1334",
            },
            Device::Iphone14 => DeviceProfile {
                width: 180.0,
                height: 390.0,
                label: "iPhone 14 Pro",
                ratio: "19.5:9",
                resolution: "1179×2556",
            },
            Device::Ipad => DeviceProfile {
                width: 240.0,
                height: 320.0,
                label: "iPad",
                ratio: "4:3",
                resolution: "2048×2732",
            },
            Device::AndroidTall => DeviceProfile {
                width: 160.0,
                height: 370.0,
                label: "Android",
                ratio: "21:9",
                resolution: "1080×2340",
            },
        }
    }

    /// Parse a device id, falling back to [`Device::IphoneSe`] for unknown ids.
    pub fn parse_lenient(id: &str) -> Device {
        id.parse().unwrap_or(Device::IphoneSe)
    }

    /// Resolve a requested device list: at most four, unknown ids dropped, and the
    /// three default phones/tablet when nothing usable remains.
    pub fn select<S: AsRef<str>>(ids: &[S]) -> Vec<Device> {
        let picked: Vec<Device> = ids
            .iter()
            .take(4)
            .filter_map(|id| id.as_ref().parse().ok())
            .collect();
        if picked.is_empty() {
            if ids.is_empty() {
                return Self::ALL.to_vec();
            }
            return vec![Device::IphoneSe, Device::Iphone14, Device::Ipad];
        }
        picked
    }
}

impl FromStr for Device {
    type Err = DojoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.id() == s.trim())
            .ok_or_else(|| DojoError::validation(format!("unknown device '{s}'")))
    }
}

/// Canvas scaler UI scale modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleMode {
    /// Same pixel size everywhere.
    ConstantPixel,
    /// Proportional to the screen, fitting the reference resolution.
    #[default]
    ScaleWithScreen,
    /// Same physical size, approximated by screen area.
    ConstantPhysical,
}

impl ScaleMode {
    /// Every mode, in picker order.
    pub const ALL: [ScaleMode; 3] = [
        ScaleMode::ConstantPixel,
        ScaleMode::ScaleWithScreen,
        ScaleMode::ConstantPhysical,
    ];

    /// Inspector enum value.
    pub fn inspector_name(self) -> &'static str {
        match self {
            ScaleMode::ConstantPixel => "ConstantPixelSize",
            ScaleMode::ScaleWithScreen => "ScaleWithScreenSize",
            ScaleMode::ConstantPhysical => "ConstantPhysicalSize",
        }
    }

    /// UI scale factor for a `width x height` screen against the 160x320 reference.
    pub fn ui_scale(self, width: f64, height: f64) -> f64 {
        match self {
            ScaleMode::ConstantPixel => 1.0,
            ScaleMode::ScaleWithScreen => (width / REF_WIDTH).min(height / REF_HEIGHT),
            ScaleMode::ConstantPhysical => ((width * height) / (REF_WIDTH * REF_HEIGHT)).sqrt(),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = DojoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "constantPixel" | "constant-pixel" => Ok(ScaleMode::ConstantPixel),
            "scaleWithScreen" | "scale-with-screen" => Ok(ScaleMode::ScaleWithScreen),
            "constantPhysical" | "constant-physical" => Ok(ScaleMode::ConstantPhysical),
            other => Err(DojoError::validation(format!("unknown scale mode '{other}'"))),
        }
    }
}

/// Control sizes in the device-frame mock after scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ScaledControls {
    /// Button width.
    pub button_width: u32,
    /// Button height.
    pub button_height: u32,
    /// Label font size.
    pub font_size: u32,
    /// Input field height.
    pub input_height: u32,
}

impl ScaledControls {
    /// Scale the 40x14 button, 11px font and 14px input by `scale`, with minimums.
    pub fn for_scale(scale: f64) -> Self {
        let px = |base: f64, floor: u32| ((base * scale).round().max(0.0) as u32).max(floor);
        Self {
            button_width: px(40.0, 20),
            button_height: px(14.0, 8),
            font_size: px(11.0, 6),
            input_height: px(14.0, 8),
        }
    }
}

/// Side of the reference square under "Match Width Or Height".
///
/// `0` follows the width, `1` follows the height.
pub fn match_square_side(width: f64, height: f64, match_factor: f64) -> DojoResult<f64> {
    if !match_factor.is_finite() {
        return Err(DojoError::validation("match factor must be finite"));
    }
    let m = match_factor.clamp(0.0, 1.0);
    Ok((1.0 - m) * width + m * height)
}

/// Slider track color: red at 0, yellow at 0.5, green at 1.
pub fn match_slider_rgb(match_factor: f64) -> [u8; 3] {
    let m = if match_factor.is_finite() {
        match_factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if m <= 0.5 {
        let t = m * 2.0;
        [255, (255.0 * t).round() as u8, 0]
    } else {
        let t = (m - 0.5) * 2.0;
        [(255.0 * (1.0 - t)).round() as u8, 255, 0]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scaler.rs"]
mod tests;
