//! Logic behind the unity-dojo lesson widgets.
//!
//! The lesson pages teach UI layout in a 3D editor and carry a few interactive
//! widgets. This crate holds everything those widgets compute, independent of any
//! renderer:
//!
//! - **Anchors**: [`resolve_preview_rect`] maps a normalized [`AnchorRect`] to the
//!   [`PreviewRect`] an element occupies in a preview container. Every anchor and
//!   layout visualization goes through it, including nested [`LayoutNode`] trees.
//! - **Scaling**: canvas scaler modes ([`ScaleMode`]) and the "match width or height"
//!   slider ([`match_square_side`]) over a fixed set of [`Device`] frames.
//! - **Progress**: a best-effort [`ProgressStore`] over any [`KvBackend`], the
//!   resumable [`QuizSession`] state machine, and the per-lesson [`StepTracker`].
//! - **Hierarchy**: expand/collapse and search over editor-style item trees.
//!
//! Nothing here blocks or fails on storage: progress persistence is an
//! enhancement, and every storage fault degrades to "nothing saved".
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;
mod progress;

/// Editor-style item trees (scene hierarchy, project folders).
pub mod hierarchy;

pub use foundation::core::{Point, Rect, Size, Viewport};
pub use foundation::error::{DojoError, DojoResult};
pub use layout::anchor::{
    AnchorMetrics, AnchorPreset, AnchorRect, PreviewRect, resolve_preview_rect,
};
pub use layout::scaler::{
    Device, DeviceProfile, ScaleMode, ScaledControls, match_slider_rgb, match_square_side,
};
pub use layout::tree::{
    LayoutNode, LayoutRow, RectTransform, ResolvedNode, layout_2048, toggle_expanded,
};
pub use progress::quiz::{
    QUIZ_KEY_PREFIX, Quiz, QuizOption, QuizPhase, QuizQuestion, QuizSession, QuizState,
    QuizSummary, Verdict, quiz_storage_key,
};
pub use progress::steps::{STEP_KEY_PREFIX, StepTracker};
pub use progress::store::{
    FileBackend, KvBackend, MemoryBackend, ProgressStore, UnavailableBackend,
};
