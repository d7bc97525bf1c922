pub mod logging;
pub mod video;
pub mod wizard;
