//! Pure computation of the drag preview.

mod preview;

pub use preview::{
    build_preview, duration_caption, highlight_rows, label_text, FloatingLabel, Preview,
    PreviewInput,
};
