//! View state of the interactive widgets, independent of any rendering.

pub mod dropdown;
pub mod format;
pub mod search_box;
