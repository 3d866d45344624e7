use super::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use commentguard_application::keys;
use commentguard_core::template::{Template, TemplateDraft};
use commentguard_services::templates::TemplateService;

fn service(ctx: &AppContext) -> TemplateService {
    TemplateService::new(ctx.api.clone(), ctx.local_store.clone())
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    let api = ctx.api.clone();
    let store = ctx.local_store.clone();
    let templates: Vec<Template> = ctx
        .cache
        .fetch_as(keys::templates(), move || async move {
            TemplateService::new(api, store).list().await
        })
        .await?;

    println!("📝 Templates ({})", templates.len());
    for template in &templates {
        let category = template.category.as_deref().unwrap_or("general");
        println!("  [{}] {} ({category})", template.id, template.title.bold());
    }
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    title: &str,
    content: &str,
    category: Option<String>,
) -> Result<()> {
    let service = service(ctx);
    let draft = TemplateDraft {
        title: title.to_string(),
        content: content.to_string(),
        category,
    };

    let template = ctx
        .cache
        .mutate(keys::TEMPLATES, async { service.create(&draft).await })
        .await?;

    println!("✅ Saved template {}", template.id);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let service = service(ctx);
    ctx.cache
        .mutate(keys::TEMPLATES, async { service.delete(id).await })
        .await?;

    println!("🗑️  Deleted template {id}");
    Ok(())
}
