use anyhow::{Context, Result, bail};
use std::env;
use std::fmt::{Debug, Display};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const USAGE: &str = "Usage: participant-registry [--bind <addr:port>] [--data-file <path>] \
[--public-dir <path>] [--max-upload-bytes <n>]";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub public_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: PathBuf::from("data/participants.json"),
            public_dir: PathBuf::from("public"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Environment first, then command-line flags on top.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_env()?;
        config.apply_args(env::args().skip(1))?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: try_load("BIND_ADDR", defaults.bind_addr)?,
            data_file: try_load("DATA_FILE", defaults.data_file)?,
            public_dir: try_load("PUBLIC_DIR", defaults.public_dir)?,
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }

    pub fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("{} requires a value\n{}", flag, USAGE))
            };
            match flag.as_str() {
                "--bind" => self.bind_addr = parse_flag(&flag, &value()?)?,
                "--data-file" => self.data_file = PathBuf::from(value()?),
                "--public-dir" => self.public_dir = PathBuf::from(value()?),
                "--max-upload-bytes" => self.max_upload_bytes = parse_flag(&flag, &value()?)?,
                _ => bail!("Unknown argument {}\n{}", flag, USAGE),
            }
        }
        Ok(())
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Debug,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} value '{}': {}", key, raw, e)),
        Err(_) => {
            tracing::debug!("{} not set, using default: {:?}", key, default);
            Ok(default)
        }
    }
}

fn parse_flag<T>(flag: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid value '{}' for {}: {}", raw, flag, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut config = Config::default();
        config
            .apply_args(args(&[
                "--bind",
                "0.0.0.0:8080",
                "--data-file",
                "/tmp/p.json",
                "--max-upload-bytes",
                "2048",
            ]))
            .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_file, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_missing_flag_value_is_error() {
        let mut config = Config::default();
        assert!(config.apply_args(args(&["--bind"])).is_err());
    }

    #[test]
    fn test_invalid_flag_value_is_error() {
        let mut config = Config::default();
        let err = config.apply_args(args(&["--bind", "not-an-address"])).unwrap_err();
        assert!(err.to_string().contains("--bind"));
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let mut config = Config::default();
        assert!(config.apply_args(args(&["--verbose"])).is_err());
    }
}
