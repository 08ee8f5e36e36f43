//! Version control implementations

mod git;

pub use git::{GitCli, FETCH_TIMEOUT};
