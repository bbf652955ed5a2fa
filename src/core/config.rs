use std::time::Duration;
use log::LevelFilter;
use url::Url;

pub trait Config: Send + Sync {
    fn endpoint(&self) -> &Url;
    fn request_timeout(&self) -> Duration;

    fn log_level(&self) -> LevelFilter;
    fn log_file(&self) -> Option<&str>;

    #[cfg(feature = "inspect")]
    fn dump(&self);
}
