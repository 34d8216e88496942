//! Generate command: write a tag cloud for a text file.

use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use tagcloud_core::{CloudOptions, Config, FontScale, RenderEntry, generate_file};

/// Arguments for the `generate` subcommand.
///
/// Any positional argument left out is prompted for on stdin.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Text file to read words from.
    pub input: Option<Utf8PathBuf>,

    /// HTML file to write (overwritten).
    pub output: Option<Utf8PathBuf>,

    /// Number of words to include in the tag cloud.
    #[arg(allow_negative_numbers = true)]
    pub count: Option<String>,

    /// Stylesheet URL to link instead of the configured one.
    #[arg(long, value_name = "URL")]
    pub stylesheet: Option<String>,

    /// Smallest font size.
    #[arg(long, value_name = "SIZE")]
    pub min_font: Option<u32>,

    /// Largest font size.
    #[arg(long, value_name = "SIZE")]
    pub max_font: Option<u32>,
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    input: &'a str,
    output: &'a str,
    requested: i64,
    effective: usize,
    distinct_words: usize,
    max_count: usize,
    truncated: bool,
    words: &'a [RenderEntry],
}

/// Build a tag cloud from `args` and write it to the output file.
#[instrument(name = "cmd_generate", skip_all)]
pub fn cmd_generate(args: GenerateArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let options = cloud_options(&args, config)?;

    let (input, output, count) = {
        let stdin = io::stdin();
        let mut stdin = stdin.lock();
        // Keep stdout clean for the JSON report.
        if global_json {
            resolve_targets(&args, &mut stdin, &mut io::stderr())?
        } else {
            resolve_targets(&args, &mut stdin, &mut io::stdout())?
        }
    };
    debug!(%input, %output, count, "executing generate command");

    let cloud = generate_file(&input, &output, count, &options, config.input_limit())?;

    if global_json {
        let report = GenerateReport {
            input: input.as_str(),
            output: output.as_str(),
            requested: count,
            effective: cloud.effective_count(),
            distinct_words: cloud.distinct_words,
            max_count: cloud.max_count,
            truncated: cloud.is_truncated(),
            words: &cloud.words,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cloud.is_truncated() {
        println!(
            "{} {count} exceeds the number of distinct words ({}) in {input}; \
             {output} shows a tag cloud with {} words.",
            "NOTE:".yellow(),
            cloud.distinct_words,
            cloud.effective_count(),
        );
    }
    println!(
        "{} {output}: top {} of {} distinct words",
        "Wrote".green(),
        cloud.effective_count(),
        cloud.distinct_words,
    );

    Ok(())
}

/// Configured cloud options with command-line overrides applied.
fn cloud_options(args: &GenerateArgs, config: &Config) -> anyhow::Result<CloudOptions> {
    let mut options = CloudOptions::try_from(config).context("invalid configuration")?;
    if let Some(ref stylesheet) = args.stylesheet {
        options.stylesheet.clone_from(stylesheet);
    }
    if args.min_font.is_some() || args.max_font.is_some() {
        options.scale = FontScale::new(
            args.min_font.unwrap_or(options.scale.min()),
            args.max_font.unwrap_or(options.scale.max()),
        )?;
    }
    Ok(options)
}

/// Input path, output path and word count, prompting for any not given.
fn resolve_targets<R: BufRead, W: Write>(
    args: &GenerateArgs,
    stdin: &mut R,
    prompt_out: &mut W,
) -> anyhow::Result<(Utf8PathBuf, Utf8PathBuf, i64)> {
    let input = match args.input {
        Some(ref path) => path.clone(),
        None => prompt(stdin, prompt_out, "Enter an input file name: ")?.into(),
    };
    let output = match args.output {
        Some(ref path) => path.clone(),
        None => prompt(stdin, prompt_out, "Enter an output file name: ")?.into(),
    };
    let count = match args.count {
        Some(ref count) => count.clone(),
        None => prompt(
            stdin,
            prompt_out,
            "Enter the number of words to be included in the tag cloud: ",
        )?,
    };
    Ok((input, output, parse_count(&count)?))
}

fn prompt<R: BufRead, W: Write>(
    stdin: &mut R,
    prompt_out: &mut W,
    message: &str,
) -> anyhow::Result<String> {
    write!(prompt_out, "{message}")?;
    prompt_out.flush()?;

    let mut line = String::new();
    if stdin
        .read_line(&mut line)
        .context("failed to read from stdin")?
        == 0
    {
        bail!("no answer given to prompt: {}", message.trim_end_matches([':', ' ']));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn parse_count(raw: &str) -> anyhow::Result<i64> {
    raw.trim().parse().map_err(|_| {
        anyhow!("number of words to be included in the tag cloud must be an integer, got {raw:?}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_counts() {
        assert_eq!(parse_count("5").unwrap(), 5);
        assert_eq!(parse_count(" 12 ").unwrap(), 12);
        assert_eq!(parse_count("-2").unwrap(), -2);
    }

    #[test]
    fn rejects_non_integer_count() {
        for raw in ["five", "2.5", "", "3x"] {
            let err = parse_count(raw).unwrap_err();
            assert!(err.to_string().contains("must be an integer"), "{raw}");
        }
    }

    #[test]
    fn prompts_for_missing_values_in_order() {
        let mut stdin = Cursor::new("words.txt\ncloud.html\n7\n");
        let mut out = Vec::new();
        let (input, output, count) =
            resolve_targets(&GenerateArgs::default(), &mut stdin, &mut out).unwrap();

        assert_eq!(input.as_str(), "words.txt");
        assert_eq!(output.as_str(), "cloud.html");
        assert_eq!(count, 7);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Enter an input file name: Enter an output file name: \
             Enter the number of words to be included in the tag cloud: "
        );
    }

    #[test]
    fn prompts_only_for_missing_values() {
        let args = GenerateArgs {
            input: Some("a.txt".into()),
            output: Some("a.html".into()),
            ..GenerateArgs::default()
        };
        let mut stdin = Cursor::new("3\r\n");
        let mut out = Vec::new();
        let (_, _, count) = resolve_targets(&args, &mut stdin, &mut out).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Enter the number of words to be included in the tag cloud: "
        );
    }

    #[test]
    fn closed_stdin_is_an_error() {
        let mut stdin = Cursor::new("");
        let err = resolve_targets(&GenerateArgs::default(), &mut stdin, &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("Enter an input file name"));
    }

    #[test]
    fn font_overrides_apply() {
        let args = GenerateArgs {
            max_font: Some(30),
            stylesheet: Some("mine.css".to_string()),
            ..GenerateArgs::default()
        };
        let options = cloud_options(&args, &Config::default()).unwrap();
        assert_eq!(options.scale, FontScale::new(11, 30).unwrap());
        assert_eq!(options.stylesheet, "mine.css");
    }

    #[test]
    fn inverted_font_override_fails() {
        let args = GenerateArgs {
            max_font: Some(5),
            ..GenerateArgs::default()
        };
        assert!(cloud_options(&args, &Config::default()).is_err());
    }
}
