//! File system implementations

mod home;
mod local;

pub use home::{
    contextmark_home_dir, display_with_tilde, library_root_override, CONTEXTMARK_HOME_VAR,
    CONTEXTMARK_LIBRARY_VAR,
};
pub use local::LocalFs;
