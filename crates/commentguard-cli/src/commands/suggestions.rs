use super::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use commentguard_application::keys;
use commentguard_core::page::{Page, PageRequest};
use commentguard_core::suggestion::{Suggestion, SuggestionStatus};
use commentguard_services::suggestions::SuggestionService;

fn print_suggestion_line(suggestion: &Suggestion) {
    println!(
        "  [{}] {} ({})",
        suggestion.suggestion_id,
        suggestion.title.bold(),
        suggestion.status
    );
}

pub async fn list(ctx: &AppContext, page: u32, all: bool) -> Result<()> {
    let gateway = ctx.api.clone();
    let request = PageRequest::new(page, PageRequest::DEFAULT_SUGGESTION_SIZE);

    let (key, label) = if all {
        (keys::suggestions_all(page), "all users")
    } else {
        (keys::suggestions_mine(page), "mine")
    };
    let listing: Page<Suggestion> = ctx
        .cache
        .fetch_as(key, move || async move {
            let service = SuggestionService::new(gateway);
            if all {
                service.list_all(request).await
            } else {
                service.list_mine(request).await
            }
        })
        .await?;

    println!(
        "💡 Suggestions ({label}), page {}/{} ({} total)",
        listing.number + 1,
        listing.total_pages,
        listing.total_elements
    );
    for suggestion in &listing.content {
        print_suggestion_line(suggestion);
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, id: i64) -> Result<()> {
    let service = SuggestionService::new(ctx.api.clone());
    let suggestion = service.get(id).await?;

    println!("{} ({})", suggestion.title.bold(), suggestion.status);
    println!("\n{}", suggestion.content);
    if let Some(response) = &suggestion.admin_response {
        println!("\n{}", "Admin response:".bold());
        println!("{response}");
    }
    Ok(())
}

pub async fn create(ctx: &AppContext, title: &str, content: &str) -> Result<()> {
    let service = SuggestionService::new(ctx.api.clone());
    let suggestion = ctx
        .cache
        .mutate(keys::SUGGESTIONS, async {
            service.create(title, content).await
        })
        .await?;

    println!("✅ Submitted suggestion {}", suggestion.suggestion_id);
    Ok(())
}

pub async fn respond(
    ctx: &AppContext,
    id: i64,
    response: &str,
    status: SuggestionStatus,
) -> Result<()> {
    let service = SuggestionService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::SUGGESTIONS, async {
            service.respond(id, response, status).await
        })
        .await?;

    println!("✅ Responded to suggestion {id} ({status})");
    Ok(())
}

pub async fn update_status(ctx: &AppContext, id: i64, status: SuggestionStatus) -> Result<()> {
    let service = SuggestionService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::SUGGESTIONS, async {
            service.update_status(id, status).await
        })
        .await?;

    println!("✅ Suggestion {id} is now {status}");
    Ok(())
}
