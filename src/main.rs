use log::error;
use reqwest::Url;
use std::env;
use std::process::ExitCode;

use recipe_site::store::source_for;
use recipe_site::{detail_page, listing_page, FilterState, Site, SiteConfig};

const USAGE: &str = "Usage: recipe-site [<data-source>] [--url <page-url>] [--search <term>] \
[--category <name>]... [--difficulty <level>]... [--id <recipe-id>]";

#[derive(Debug, Default)]
struct Args {
    source: Option<String>,
    url: Option<String>,
    id: Option<String>,
    state: FilterState,
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--url" => args.url = Some(value("--url")?),
            "--search" => args.state.search_term = value("--search")?,
            "--category" => {
                args.state.active_categories.insert(value("--category")?);
            }
            "--difficulty" => {
                args.state.active_difficulties.insert(value("--difficulty")?);
            }
            "--id" => args.id = Some(value("--id")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option {}\n{}", flag, USAGE)),
            source if args.source.is_none() => args.source = Some(source.to_string()),
            extra => return Err(format!("Unexpected argument {}\n{}", extra, USAGE)),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(html) => {
            println!("{}", html);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    let config = SiteConfig::load()?;
    let timeout = Some(config.request_timeout());

    let default_url = if args.id.is_some() {
        "http://localhost/recipe.html"
    } else {
        "http://localhost/recipes.html"
    };
    let mut page_url = Url::parse(args.url.as_deref().unwrap_or(default_url))?;
    if let Some(id) = &args.id {
        page_url.query_pairs_mut().append_pair("id", id);
    }
    let site = Site::new(config, page_url.as_str())?;

    let location = match args.source {
        Some(source) => source,
        None => site.data_url()?,
    };
    let source = source_for(&location, timeout)?;

    let document = if args.id.is_some() || is_detail_path(site.url().path()) {
        detail_page(&site, source.as_ref()).await
    } else {
        listing_page(site, source.as_ref(), args.state).await
    };
    Ok(document.to_html())
}

/// True for `/recipe`, `/recipe.html` and their sub-path variants.
fn is_detail_path(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or("");
    last.strip_suffix(".html").unwrap_or(last) == "recipe"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&strings(&[
            "data/recipes.json",
            "--search",
            "egg",
            "--difficulty",
            "Easy",
            "--category",
            "Indian",
            "--category",
            "Breakfast",
        ]))
        .unwrap();
        assert_eq!(args.source.as_deref(), Some("data/recipes.json"));
        assert_eq!(args.state.search_term, "egg");
        assert_eq!(args.state.active_categories.len(), 2);
        assert!(args.state.active_difficulties.contains("Easy"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&strings(&["--search"])).is_err());
        assert!(parse_args(&strings(&["--bogus"])).is_err());
        assert!(parse_args(&strings(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_is_detail_path() {
        assert!(is_detail_path("/recipe.html"));
        assert!(is_detail_path("/my-site/recipe"));
        assert!(!is_detail_path("/recipes.html"));
        assert!(!is_detail_path("/"));
    }
}
