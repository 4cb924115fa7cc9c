use std::{io::Write, sync::Arc};

use parking_lot::Mutex;

use crate::loading::LoadingStyle;

/// In-memory writer whose clones all append to the same buffer.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Splits captured animation output into `(backspaces, frame)` steps.
pub(crate) fn split_steps(animation: &str) -> Vec<(usize, String)> {
    let mut steps = Vec::new();
    let mut erase = 0;
    let mut frame = String::new();

    for c in animation.chars() {
        if c == '\u{8}' {
            if !frame.is_empty() {
                steps.push((erase, std::mem::take(&mut frame)));
                erase = 0;
            }
            erase += 1;
        } else {
            frame.push(c);
        }
    }
    if !frame.is_empty() || erase > 0 {
        steps.push((erase, frame));
    }

    steps
}

/// Checks that `animation` is a prefix of the style's cycle in which every
/// erase is exactly as wide as the frame before it.
pub(crate) fn assert_animation(style: LoadingStyle, animation: &str) {
    let steps = split_steps(animation);
    let frames = style.frames();

    assert!(!steps.is_empty(), "no frame was printed");
    assert_eq!(steps[0].0, 0, "first frame must not erase anything");

    for (i, (erase, frame)) in steps.iter().enumerate() {
        assert_eq!(frame, frames[i % frames.len()], "frame {} out of order", i);
        if i > 0 {
            assert_eq!(
                *erase,
                steps[i - 1].1.chars().count(),
                "erase before frame {} does not match the previous width",
                i
            );
        }
    }
}
