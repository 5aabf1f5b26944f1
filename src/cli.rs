use std::ffi::OsString;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::fetch::{HttpFetcher, PageFetcher};
use crate::scrape;
use crate::settings::Settings;

pub const USAGE: &str = "
You must provide a URL as the single command line argument, for example,
ripe_scraper http://hiring-tests.s3-website-eu-west-1.amazonaws.com/2015_Developer_Scrape/5_products.html

The results will be printed to stdout so you can pipe them to a file
or another programme.

Options:
  -j, --concurrency <N>   product pages fetched at once (default 1, env RIPE_CONCURRENCY)
      --timeout <SECS>    per-request timeout (env RIPE_TIMEOUT_SECS)
";

#[derive(Parser, Debug)]
#[command(name = "ripe_scraper", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Category listing page to scrape
    url: Option<String>,
    /// Product pages fetched at once
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

/// What the arguments ask for.
#[derive(Debug, PartialEq)]
enum Invocation {
    Usage,
    Scrape {
        url: String,
        concurrency: Option<usize>,
        timeout: Option<u64>,
    },
}

fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Ok(cli) = Cli::try_parse_from(args) else {
        return Invocation::Usage;
    };
    match cli.url {
        Some(url) if !url.contains("help") && url.contains("http") => Invocation::Scrape {
            url,
            concurrency: cli.concurrency,
            timeout: cli.timeout,
        },
        _ => Invocation::Usage,
    }
}

/// Entry point. Returns the text it printed: either the usage message
/// (on stderr) or the JSON report (on stdout).
pub async fn run<I, T>(args: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let (url, concurrency, timeout) = match parse_args(args) {
        Invocation::Usage => {
            eprintln!("{USAGE}");
            return Ok(USAGE.to_string());
        }
        Invocation::Scrape {
            url,
            concurrency,
            timeout,
        } => (url, concurrency, timeout),
    };

    let settings = Settings::load()?.with_overrides(concurrency, timeout);
    let fetcher = HttpFetcher::new(&settings)?;
    execute(Arc::new(fetcher), &url, &settings).await
}

async fn execute(fetcher: Arc<dyn PageFetcher>, url: &str, settings: &Settings) -> Result<String> {
    let result = scrape::scrape_url(fetcher, url, settings.concurrency).await?;
    let json = result.to_json().context("Failed to encode results")?;
    println!("{json}");
    Ok(json)
}

// ── Tests ──
