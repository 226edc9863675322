//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use crate::config::{BodySource, Config};
use crate::error::{HttpClientError, Result};
use crate::exit_code::exit_code_for_error;
use crate::http::{Cookie, RequestBuilder};
use crate::logging;
use crate::utils::{FileUtils, StringUtils, UrlUtils};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Write};
use std::path::PathBuf;

/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();

    if let Err(e) = run_with_args(&matches) {
        eprintln!("httpclient: error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run httpclient with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let config = build_config_from_args(matches)?;
    logging::init(log_filter(config.verbose));

    let output = config.output.clone();
    let builder = config.into_builder()?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| HttpClientError::Config(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(send(builder, output))
}

/// Default log filter; `-v` raises it to debug
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Execute the request, saving the body to `output` or printing it to stdout
async fn send(builder: RequestBuilder, output: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output {
        return builder.download_file(&path).await;
    }

    let body = builder.execute().await?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&body)?;
    stdout.flush()?;
    Ok(())
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("httpclient")
        .version(crate::VERSION)
        .about("Send a single HTTP request and print or save the response body")
        .arg(Arg::new("url")
            .help("The URL to request")
            .required(true)
            .index(1))
        .arg(Arg::new("request")
            .short('X')
            .long("request")
            .value_name("METHOD")
            .help("HTTP request method")
            .default_value("GET"))
        .arg(Arg::new("header")
            .short('H')
            .long("header")
            .value_name("HEADER")
            .help("Add custom HTTP header ('Name: value')")
            .action(ArgAction::Append))
        .arg(Arg::new("cookie")
            .short('b')
            .long("cookie")
            .value_name("NAME=VALUE")
            .help("Send a cookie")
            .action(ArgAction::Append))
        .arg(Arg::new("query")
            .short('q')
            .long("query")
            .value_name("KEY=VALUE")
            .help("Append a query parameter")
            .action(ArgAction::Append))
        .arg(Arg::new("data")
            .short('d')
            .long("data")
            .value_name("DATA")
            .help("Send raw request body")
            .conflicts_with_all(["form", "file"]))
        .arg(Arg::new("form")
            .long("form")
            .value_name("KEY=VALUE")
            .help("Send a URL-encoded form field (implies POST)")
            .action(ArgAction::Append)
            .conflicts_with("file"))
        .arg(Arg::new("file")
            .short('F')
            .long("file")
            .value_name("FIELD=PATH")
            .help("Upload a file as multipart/form-data (implies POST)"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .help("Maximum time for the whole request")
            .default_value("10"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write the response body to FILE, creating directories as needed"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Verbose output")
            .action(ArgAction::SetTrue))
}

/// Build configuration from command line arguments
pub fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(url_str) = matches.get_one::<String>("url") {
        config.url = UrlUtils::validate_url(url_str)?.to_string();
    }

    if let Some(method) = matches.get_one::<String>("request") {
        config.method = method.to_uppercase();
    }

    if let Some(headers) = matches.get_many::<String>("header") {
        for header_str in headers {
            let (key, value) = StringUtils::parse_header(header_str)?;
            config.headers.insert(key, value);
        }
    }

    if let Some(cookies) = matches.get_many::<String>("cookie") {
        for cookie_str in cookies {
            let cookie = Cookie::parse(cookie_str).ok_or_else(|| {
                HttpClientError::Config(format!(
                    "Invalid cookie format: '{}'. Expected 'NAME=VALUE'",
                    cookie_str
                ))
            })?;
            config.cookies.push(cookie);
        }
    }

    if let Some(params) = matches.get_many::<String>("query") {
        for param in params {
            config.query.push(StringUtils::parse_pair(param)?);
        }
    }

    if let Some(data) = matches.get_one::<String>("data") {
        config.body = BodySource::Raw(data.clone());
    } else if let Some(fields) = matches.get_many::<String>("form") {
        let pairs = fields
            .map(|field| StringUtils::parse_pair(field))
            .collect::<Result<Vec<_>>>()?;
        config.body = BodySource::Form(pairs);
    } else if let Some(file) = matches.get_one::<String>("file") {
        let (field, path) = StringUtils::parse_pair(file)?;
        config.body = BodySource::File {
            path: FileUtils::expand_path(&path)?,
            field,
        };
    }

    if let Some(timeout_str) = matches.get_one::<String>("timeout") {
        config.timeout = StringUtils::parse_timeout(timeout_str)?;
    }

    if let Some(output_file) = matches.get_one::<String>("output") {
        config.output = Some(FileUtils::expand_path(output_file)?);
    }

    config.verbose = matches.get_flag("verbose");

    Ok(config)
}
