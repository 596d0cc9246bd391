use std::fmt;
use std::str::FromStr;

/// Width breakpoints for derivatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    #[default]
    Display,
}

impl Breakpoint {
    pub fn width(&self) -> u32 {
        match self {
            Breakpoint::Mobile => 640,
            Breakpoint::Tablet => 1280,
            Breakpoint::Display => 1920,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breakpoint::Mobile => write!(f, "mobile"),
            Breakpoint::Tablet => write!(f, "tablet"),
            Breakpoint::Display => write!(f, "display"),
        }
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Breakpoint::Mobile),
            "tablet" => Ok(Breakpoint::Tablet),
            "display" => Ok(Breakpoint::Display),
            other => Err(format!("Unknown breakpoint: {}", other)),
        }
    }
}

/// Derivative dimensions for an original of `width` x `height`.
///
/// Never upscales: an original no wider than `target_width` keeps its size.
/// Otherwise the height is `round(height * target_width / width)`, at least 1.
pub fn target_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 || width <= target_width {
        return (width, height);
    }

    let (w, h, tw) = (u64::from(width), u64::from(height), u64::from(target_width));
    let scaled = (h * tw * 2 + w) / (w * 2);
    let target_height = u32::try_from(scaled).unwrap_or(u32::MAX).max(1);

    (target_width, target_height)
}
