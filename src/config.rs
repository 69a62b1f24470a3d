//! Command line configuration for the server.

use std::{net::IpAddr, path::PathBuf};

use clap::Parser;

use crate::{
    local_storage::DEFAULT_STORAGE_QUOTA,
    offline_cache::{DEFAULT_CACHE_NAME, DEFAULT_PRECACHE_PATHS},
};

/// A web app for tracking income and expenses.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "CASHBOOK_DB_PATH")]
    pub db_path: PathBuf,

    /// The address to listen on.
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: IpAddr,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The directory containing the web app manifest and static files.
    #[arg(long, default_value = "static/")]
    pub asset_dir: PathBuf,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    #[arg(long, env = "CASHBOOK_TIMEZONE", default_value = "Etc/UTC", value_parser = parse_timezone)]
    pub timezone: String,

    /// The symbol shown in front of amounts.
    #[arg(long, default_value = "₹")]
    pub currency_symbol: String,

    /// The name of the offline cache.
    #[arg(long, default_value = DEFAULT_CACHE_NAME)]
    pub cache_name: String,

    /// The maximum number of bytes that local storage may hold.
    #[arg(long, default_value_t = DEFAULT_STORAGE_QUOTA)]
    pub storage_quota: usize,

    /// A request path to store in the offline cache at startup. May be repeated.
    #[arg(long = "precache", default_values_t = DEFAULT_PRECACHE_PATHS.map(String::from))]
    pub precache_paths: Vec<String>,
}

fn parse_timezone(timezone: &str) -> Result<String, String> {
    match time_tz::timezones::get_by_name(timezone) {
        Some(_) => Ok(timezone.to_owned()),
        None => Err(format!(
            "\"{timezone}\" is not a canonical timezone name, e.g. \"Asia/Kolkata\""
        )),
    }
}
