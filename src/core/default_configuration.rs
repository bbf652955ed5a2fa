use std::fmt;
use std::fs;
use std::time::Duration;
use serde::Deserialize;
use log::LevelFilter;
use url::Url;

use crate::{
    Error,
    core::{
        config::Config,
        Result
    },
};

pub const DEFAULT_ENDPOINT: &str = "https://wpe-hiring.tokopedia.net/graphql";
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : String,
    #[serde(rename = "logFile")]
    file    : Option<String>,

    #[serde(skip)]
    deserde_level: Option<LevelFilter>,
}

#[derive(Clone, Deserialize)]
struct FileCfg {
    #[serde(rename = "endpoint")]
    endpoint    : Option<String>,
    #[serde(rename = "requestTimeout")]
    timeout     : Option<u64>,

    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,
}

struct Configuration {
    endpoint    : Url,
    timeout     : u64,
    logger      : LogCfg,
}

pub struct Builder<'a> {
    endpoint    : Option<&'a str>,
    timeout     : Option<u64>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<FileCfg>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            endpoint    : None,
            timeout     : None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_endpoint(&mut self, endpoint: &'a str) -> &mut Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn with_request_timeout(&mut self, secs: u64) -> &mut Self {
        self.timeout = Some(secs);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        let cfg = serde_json::from_str::<FileCfg>(&data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let cfg = b.cfg.clone().unwrap_or(FileCfg {
            endpoint    : None,
            timeout     : None,
            logger      : None,
        });

        let endpoint = b.endpoint
            .or(cfg.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT);
        let url = Url::parse(endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Argument(format!("Unsupported endpoint scheme: {}", url.scheme())));
        }

        let timeout = b.timeout
            .or(cfg.timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if timeout == 0 {
            return Err(Error::Argument("Request timeout must be positive".into()));
        }

        // Explicit builder settings win over the file.
        let logger = match (b.log_level, cfg.logger) {
            (Some(level), _) => LogCfg {
                level: level.to_string(),
                file: b.log_file.map(|f| f.to_string()),
                deserde_level: Some(level),
            },
            (None, Some(mut logger)) => {
                logger.deserde_level = Some(logger.level.parse::<LevelFilter>()
                    .unwrap_or(LevelFilter::Info));
                logger
            },
            (None, None) => LogCfg {
                level: LevelFilter::Info.to_string(),
                file: b.log_file.map(|f| f.to_string()),
                deserde_level: Some(LevelFilter::Info),
            },
        };

        Ok(Self {
            endpoint: url,
            timeout,
            logger,
        })
    }
}

impl Config for Configuration {
    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn log_level(&self) -> LevelFilter {
        self.logger.deserde_level.unwrap_or(LevelFilter::Info)
    }

    fn log_file(&self) -> Option<&str> {
        self.logger.file.as_deref()
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint:{},", self.endpoint)?;
        write!(f, "\ttimeout:{}s,", self.timeout)?;
        write!(f, "\tlog:{}", self.log_level())?;
        if let Some(file) = self.log_file() {
            write!(f, "({})", file)?;
        }
        Ok(())
    }
}
