//! TUI widgets for imgnav
//!
//! Reusable UI components for the terminal interface.

pub mod group_list;
pub mod image_view;

pub use group_list::{GroupList, ListRow};
pub use image_view::{HalfBlockImage, ScaledFrameCache};
