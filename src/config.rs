use anyhow::Context;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Agent options, parsed once from a `key=value` option string.
///
/// Well-known keys get typed fields. Anything else is kept verbatim in
/// an overflow map, so agents can read options the framework does not
/// know about. Missing keys are simply absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    name: Option<String>,
    role: Option<String>,
    seed: Option<u64>,
    alpha: Option<f32>,
    init: Option<String>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
    extra: BTreeMap<String, String>,
}

impl Config {
    /// Parse `defaults` then `options`, so that user options win.
    pub fn with_defaults(defaults: &str, options: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();
        for token in defaults.split_whitespace().chain(options.split_whitespace()) {
            config.notify(token)?;
        }
        Ok(config)
    }

    /// Apply one `key=value` (or bare `key`, meaning `true`) token.
    pub fn notify(&mut self, token: &str) -> anyhow::Result<()> {
        let (key, value) = token.split_once('=').unwrap_or((token, "true"));
        match key {
            "name" => self.name = Some(value.to_string()),
            "role" => self.role = Some(value.to_string()),
            "init" => self.init = Some(value.to_string()),
            "load" => self.load = Some(PathBuf::from(value)),
            "save" => self.save = Some(PathBuf::from(value)),
            "seed" => {
                self.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed option: {}", value))?,
                )
            }
            "alpha" => {
                self.alpha = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid alpha option: {}", value))?,
                )
            }
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or("unknown")
    }
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }
    pub fn init(&self) -> Option<&str> {
        self.init.as_deref()
    }
    pub fn load(&self) -> Option<&std::path::Path> {
        self.load.as_deref()
    }
    pub fn save(&self) -> Option<&std::path::Path> {
        self.save.as_deref()
    }
    /// Look up an option the typed fields do not cover.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::with_defaults("", s)
    }
}
