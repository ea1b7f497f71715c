//! `pages` subcommand handler.

use serde_json::json;

use untick_config::Config;

use crate::browser::Browser;

/// List the regular pages the endpoint exposes.
pub(crate) async fn handle_pages(config: &Config, as_json: bool) -> anyhow::Result<()> {
    let browser = Browser::connect(&config.browser).await?;
    let result = browser.pages().await;
    browser.shutdown().await;

    let pages: Vec<_> = result?.into_iter().filter(|p| p.is_page()).collect();

    if as_json {
        let list: Vec<_> = pages
            .iter()
            .map(|p| json!({"id": p.id, "title": p.title, "url": p.url}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if pages.is_empty() {
        println!("No pages found.");
        return Ok(());
    }

    println!("{:<34} {:<30} {}", "ID", "TITLE", "URL");
    println!("{}", "-".repeat(100));
    for page in &pages {
        let title: String = page.title.chars().take(29).collect();
        println!("{:<34} {:<30} {}", page.id, title, page.url);
    }
    Ok(())
}
