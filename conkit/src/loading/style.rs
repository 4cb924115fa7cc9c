use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Styles for loading animations.
///
/// Every style is a fixed cycle of frames of the same width. A frame is the
/// whole visible field: moving to the next frame erases the previous one with
/// exactly as many backspaces as it has characters.
///
/// | Style        | Frames                         | Width |
/// |--------------|--------------------------------|-------|
/// | `Periods`    | `"   "` `".  "` `".. "` `"..."` | 3     |
/// | `Lines`      | `"___"` `"-__"` `"_-_"` `"__-"` | 3     |
/// | `RotaryLine` | `"─"` `"\"` `"\|"` `"/"`       | 1     |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadingStyle {
    #[default]
    Periods,
    Lines,
    RotaryLine,
}

struct FrameTable {
    frames: &'static [&'static str],
    /// Whether a space goes between the message and the first frame.
    separated: bool,
}

const PERIODS: FrameTable = FrameTable {
    frames: &["   ", ".  ", ".. ", "..."],
    separated: false,
};

const LINES: FrameTable = FrameTable {
    frames: &["___", "-__", "_-_", "__-"],
    separated: true,
};

const ROTARY_LINE: FrameTable = FrameTable {
    frames: &["\u{2500}", "\\", "|", "/"],
    separated: true,
};

impl LoadingStyle {
    pub const ALL: [LoadingStyle; 3] = [Self::Periods, Self::Lines, Self::RotaryLine];

    fn table(self) -> &'static FrameTable {
        match self {
            Self::Periods => &PERIODS,
            Self::Lines => &LINES,
            Self::RotaryLine => &ROTARY_LINE,
        }
    }

    /// The frames of one animation cycle, in order.
    pub fn frames(self) -> &'static [&'static str] {
        self.table().frames
    }

    /// Width of every frame, in characters.
    pub fn width(self) -> usize {
        self.frames()[0].chars().count()
    }

    /// Text printed between the message and the animation.
    pub(crate) fn separator(self, has_message: bool) -> &'static str {
        if has_message && self.table().separated {
            " "
        } else {
            ""
        }
    }

    /// Endless iterator over the text written at each step of the animation.
    pub fn steps(self) -> FrameSteps {
        FrameSteps {
            frames: self.frames(),
            next: 0,
            previous: None,
        }
    }
}

/// The writes making up an animation: the first frame as is, then for every
/// following frame the backspaces erasing its predecessor followed by the frame.
#[derive(Clone, Debug)]
pub struct FrameSteps {
    frames: &'static [&'static str],
    next: usize,
    previous: Option<&'static str>,
}

impl Iterator for FrameSteps {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let frame = self.frames[self.next];
        self.next = (self.next + 1) % self.frames.len();

        let mut step = match self.previous {
            Some(previous) => "\u{8}".repeat(previous.chars().count()),
            None => String::new(),
        };
        step.push_str(frame);
        self.previous = Some(frame);

        Some(step)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown loading style {0}, expected periods, lines or rotary-line")]
pub struct UnknownStyle(String);

impl FromStr for LoadingStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "periods" => Ok(Self::Periods),
            "lines" => Ok(Self::Lines),
            "rotary-line" | "rotary_line" | "rotary" => Ok(Self::RotaryLine),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

impl Display for LoadingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Periods => write!(f, "periods"),
            Self::Lines => write!(f, "lines"),
            Self::RotaryLine => write!(f, "rotary-line"),
        }
    }
}
