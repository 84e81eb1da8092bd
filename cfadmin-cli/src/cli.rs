use std::path::PathBuf;

use cfadmin_lib::model::Value;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "cfadmin")]
#[command(about = "Search, filter, sort and page a JSON export of an admin table", long_about = None)]
pub struct Cli {
    /// JSON file holding an array of row objects
    pub file: PathBuf,

    /// Table preset: stores, oscs, partnerships, campaigns, external_stores
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Free-text search, case-insensitive
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Column filter as KEY=VALUE (repeatable); the value is read as JSON when possible
    #[arg(long = "filter", short = 'f', value_parser = parse_filter)]
    pub filters: Vec<FilterArg>,

    /// Column to sort by
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides the config file)
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<usize>,

    /// Convert snake_case keys to camelCase before building rows
    #[arg(long)]
    pub camel_case: bool,

    /// Engine configuration file (JSON)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// One `--filter KEY=VALUE` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub key: String,
    pub value: Value,
}

fn parse_filter(raw: &str) -> Result<FilterArg, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in '{}'", raw));
    }
    Ok(FilterArg {
        key: key.to_string(),
        value: parse_filter_value(value),
    })
}

/// JSON scalars keep their type (`true`, `3`, `null`); anything else is a
/// string, promoted the same way row values are.
fn parse_filter_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) if !json.is_object() && !json.is_array() => Value::from_json(json),
        _ => Value::from_json(serde_json::Value::String(raw.to_string())),
    }
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("page size must be greater than zero".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_values_keep_json_types() {
        assert_eq!(parse_filter("featured=true").unwrap().value, Value::Bool(true));
        assert_eq!(parse_filter("goal=800").unwrap().value, Value::Int(800));
        assert_eq!(parse_filter("uf=SP").unwrap().value, Value::from("SP"));
        assert_eq!(parse_filter("uf=\"SP\"").unwrap().value, Value::from("SP"));
        assert_eq!(parse_filter("note=a=b").unwrap().value, Value::from("a=b"));
        assert_eq!(parse_filter("tags=[1]").unwrap().value, Value::from("[1]"));
        assert!(matches!(
            parse_filter("startDate=2024-03-01").unwrap().value,
            Value::DateTime(_)
        ));
    }

    #[test]
    fn test_filter_requires_key() {
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=active").is_err());
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "cfadmin",
            "stores.json",
            "--preset",
            "stores",
            "-f",
            "uf=SP",
            "-f",
            "status=active",
            "--sort",
            "name",
            "--desc",
            "--page-size",
            "25",
        ])
        .unwrap();

        assert_eq!(cli.preset.as_deref(), Some("stores"));
        assert_eq!(cli.filters.len(), 2);
        assert_eq!(cli.filters[1].key, "status");
        assert!(cli.desc);
        assert_eq!(cli.page, 1);
        assert_eq!(cli.page_size, Some(25));
    }

    #[test]
    fn test_rejects_zero_page_size_and_lone_desc() {
        assert!(Cli::try_parse_from(["cfadmin", "x.json", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["cfadmin", "x.json", "--desc"]).is_err());
    }
}
