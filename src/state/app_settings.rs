use aotui_core::loader::DatasetSources;
use log::LevelFilter;
use std::str::FromStr;

pub const DEFAULT_MATCHES: &str = "10yearAUSOpenMatches.csv";
pub const DEFAULT_WORLD: &str = "world.geojson";

const ENV_MATCHES: &str = "AOTUI_MATCHES";
const ENV_WORLD: &str = "AOTUI_WORLD";
const ENV_LOG: &str = "AOTUI_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub sources: DatasetSources,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Error,
            sources: DatasetSources {
                matches: DEFAULT_MATCHES.to_string(),
                world: DEFAULT_WORLD.to_string(),
            },
        }
    }
}

impl AppSettings {
    /// Defaults overridden by `AOTUI_*` environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(matches) = non_empty(ENV_MATCHES) {
            settings.sources.matches = matches;
        }
        if let Some(world) = non_empty(ENV_WORLD) {
            settings.sources.world = world;
        }
        if let Some(level) = non_empty(ENV_LOG) {
            match LevelFilter::from_str(level.trim()) {
                Ok(level) => settings.log_level = level,
                Err(_) => eprintln!("ignoring {ENV_LOG}={level}: not a log level"),
            }
        }
        settings
    }

    pub fn apply(&mut self, overrides: CliOverrides) {
        if let Some(matches) = overrides.matches {
            self.sources.matches = matches;
        }
        if let Some(world) = overrides.world {
            self.sources.world = world;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub matches: Option<String>,
    pub world: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(CliOverrides),
    Help,
    Version,
}

/// Parse command-line arguments (program name already skipped).
pub fn parse_args<I>(args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--matches" => {
                let value = args.next().ok_or("--matches needs a path or URL")?;
                overrides.matches = Some(value);
            }
            "--world" => {
                let value = args.next().ok_or("--world needs a path or URL")?;
                overrides.world = Some(value);
            }
            other => {
                if let Some(value) = other.strip_prefix("--matches=") {
                    overrides.matches = Some(value.to_string());
                } else if let Some(value) = other.strip_prefix("--world=") {
                    overrides.world = Some(value.to_string());
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(CliAction::Run(overrides))
}
