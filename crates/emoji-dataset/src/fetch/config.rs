use super::sources::{CldrSource, EmojiTestSource, GithubSource, Location};
use miette::{IntoDiagnostic, Result, miette};
use std::path::{Path, PathBuf};

pub const DEFAULT_CLDR_URL: &str = "https://github.com/unicode-org/cldr/archive/latest.tar.gz";
pub const DEFAULT_EMOJI_TEST_URL: &str = "https://unicode.org/Public/emoji/13.1/emoji-test.txt";
pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com/emojis";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_OUTPUT: &str = "out.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output: OutputConfig,
    pub cldr: CldrSource,
    pub emoji_test: EmojiTestSource,
    pub github: GithubSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: OutputConfig {
                path: PathBuf::from(DEFAULT_OUTPUT),
                pretty: false,
            },
            cldr: CldrSource {
                location: Location::Http(DEFAULT_CLDR_URL.to_string()),
                locale: DEFAULT_LOCALE.to_string(),
            },
            emoji_test: EmojiTestSource {
                location: Location::Http(DEFAULT_EMOJI_TEST_URL.to_string()),
            },
            github: GithubSource {
                location: Location::Http(DEFAULT_GITHUB_URL.to_string()),
            },
        }
    }
}

impl Config {
    /// Read the config at `path`, or fall back to the defaults if there is none
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path).into_diagnostic()?;
        Config::from_kdl(&text)
    }

    /// Parse a KDL config. Anything not mentioned keeps its default.
    pub fn from_kdl(text: &str) -> Result<Self> {
        let doc = text
            .parse::<kdl::KdlDocument>()
            .map_err(|e| miette!("Failed to parse KDL: {}", e))?;

        let mut config = Config::default();
        let mut seen_output = false;

        for node in doc.nodes() {
            match node.name().value() {
                "output" => {
                    if seen_output {
                        return Err(miette!("Multiple output blocks found"));
                    }
                    seen_output = true;
                    config.output = parse_output(node)?;
                }
                "source" => parse_source(node, &mut config)?,
                other => {
                    return Err(miette!("Unknown config node: {}", other));
                }
            }
        }

        Ok(config)
    }
}

/// First positional string argument of `node`
fn string_arg<'a>(node: &'a kdl::KdlNode) -> Result<&'a str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| miette!("{} expects a string value", node.name().value()))
}

fn parse_output(node: &kdl::KdlNode) -> Result<OutputConfig> {
    let path = PathBuf::from(string_arg(node)?);
    let pretty = match node.get("pretty") {
        Some(value) => value
            .as_bool()
            .ok_or_else(|| miette!("pretty expects a boolean"))?,
        None => false,
    };
    Ok(OutputConfig { path, pretty })
}

fn parse_source(node: &kdl::KdlNode, config: &mut Config) -> Result<()> {
    let name = string_arg(node)?;

    let children = node
        .children()
        .ok_or_else(|| miette!("source {} has no children", name))?;

    match name {
        "cldr" => {
            let mut location: Option<Location> = None;
            let mut locale: Option<String> = None;
            for child in children.nodes() {
                match child.name().value() {
                    "url" | "path" => location = Some(parse_location(child)?),
                    "locale" => locale = Some(string_arg(child)?.to_string()),
                    other => return Err(miette!("Unknown cldr source field: {}", other)),
                }
            }
            if let Some(location) = location {
                config.cldr.location = location;
            }
            if let Some(locale) = locale {
                config.cldr.locale = locale;
            }
        }
        "emoji-test" => {
            config.emoji_test.location = parse_single_location(name, children)?;
        }
        "github" => {
            config.github.location = parse_single_location(name, children)?;
        }
        other => return Err(miette!("Unknown source: {}", other)),
    }

    Ok(())
}

fn parse_single_location(name: &str, children: &kdl::KdlDocument) -> Result<Location> {
    let mut location: Option<Location> = None;
    for child in children.nodes() {
        match child.name().value() {
            "url" | "path" => location = Some(parse_location(child)?),
            other => return Err(miette!("Unknown {} source field: {}", name, other)),
        }
    }
    location.ok_or_else(|| miette!("source {} needs a url or a path", name))
}

fn parse_location(node: &kdl::KdlNode) -> Result<Location> {
    let val = string_arg(node)?;
    match node.name().value() {
        "url" => Ok(Location::Http(val.to_string())),
        _ => Ok(Location::Local(PathBuf::from(val))),
    }
}
