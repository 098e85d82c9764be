//! Convert legacy HKSCS text to preferred Unicode
//!
//! Converts each argument, or each line of stdin when no text is given.
//!
//! Usage:
//!   cargo run --release --bin hkscs_convert -- [--data-dir DIR] [--tables MANIFEST] [--sequential] [--trace] [TEXT...]

use hkscs_convert::tables::parse_manifest;
use hkscs_convert::{ConverterConfig, MappingRegistry, Resolver};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use unicode_segmentation::UnicodeSegmentation;

const USAGE: &str =
    "Usage: hkscs_convert [--data-dir DIR] [--tables MANIFEST] [--sequential] [--trace] [TEXT...]";

fn usage_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", USAGE);
    std::process::exit(1);
}

struct CliConfig {
    data_dir: PathBuf,
    manifest: Option<PathBuf>,
    sequential: bool,
    trace: bool,
    texts: Vec<String>,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args).unwrap_or_else(|message| usage_error(&message))
    }

    fn parse(args: &[String]) -> Result<Self, String> {
        let mut data_dir = PathBuf::from(hkscs_convert::config::DEFAULT_DATA_DIR);
        let mut manifest = None;
        let mut sequential = false;
        let mut trace = false;
        let mut texts = Vec::new();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                flag @ ("--data-dir" | "--tables") => {
                    i += 1;
                    let value = args.get(i).ok_or_else(|| format!("{} requires a value", flag))?;
                    if flag == "--data-dir" {
                        data_dir = PathBuf::from(value);
                    } else {
                        manifest = Some(PathBuf::from(value));
                    }
                },
                "--sequential" => {
                    sequential = true;
                },
                "--trace" | "-t" => {
                    trace = true;
                },
                text => texts.push(text.to_string()),
            }
            i += 1;
        }

        Ok(Self {
            data_dir,
            manifest,
            sequential,
            trace,
            texts,
        })
    }

    fn converter_config(&self) -> hkscs_convert::Result<ConverterConfig> {
        let mut config = ConverterConfig::new()
            .with_data_dir(&self.data_dir)
            .with_parallel_load(!self.sequential);

        if let Some(path) = &self.manifest {
            let text = std::fs::read_to_string(path).map_err(|source| hkscs_convert::Error::Io {
                path: path.clone(),
                source,
            })?;
            config = config.with_tables(parse_manifest(&text)?);
        }

        Ok(config)
    }
}

fn print_trace(resolver: &Resolver, text: &str) {
    for grapheme in text.graphemes(true) {
        let mut chars = grapheme.chars();
        let (Some(character), None) = (chars.next(), chars.next()) else {
            continue;
        };

        let steps = resolver.trace(character);
        if steps.is_empty() {
            continue;
        }

        let chain: Vec<String> = steps
            .iter()
            .map(|step| format!("{} ({})", step.value, step.table))
            .collect();
        eprintln!("U+{:04X} -> {}", character as u32, chain.join(" -> "));
    }
}

fn convert(resolver: &Resolver, text: &str, trace: bool, out: &mut impl Write) -> io::Result<()> {
    if trace {
        print_trace(resolver, text);
    }
    writeln!(out, "{}", resolver.resolve_string(text))
}

fn main() {
    env_logger::init();

    let cli = CliConfig::from_args();

    let registry = match cli.converter_config().and_then(|config| MappingRegistry::load(&config)) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    };
    let resolver = Resolver::new(&registry);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if cli.texts.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .try_for_each(|line| convert(&resolver, &line?, cli.trace, &mut out))
    } else {
        cli.texts
            .iter()
            .try_for_each(|text| convert(&resolver, text, cli.trace, &mut out))
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_and_texts() {
        let cli = CliConfig::parse(&args(&["--data-dir", "/tmp/hkscs", "--sequential", "-t", "\u{E2A3}"])).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/hkscs"));
        assert!(cli.sequential);
        assert!(cli.trace);
        assert!(cli.manifest.is_none());
        assert_eq!(cli.texts, vec!["\u{E2A3}"]);
    }

    #[test]
    fn test_parse_defaults() {
        let cli = CliConfig::parse(&[]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from(hkscs_convert::config::DEFAULT_DATA_DIR));
        assert!(!cli.sequential);
        assert!(cli.texts.is_empty());
    }

    #[test]
    fn test_parse_missing_flag_value() {
        let err = CliConfig::parse(&args(&["--data-dir"])).err().unwrap();
        assert!(err.contains("--data-dir requires a value"));

        let err = CliConfig::parse(&args(&["abc", "--tables"])).err().unwrap();
        assert!(err.contains("--tables requires a value"));
    }
}
