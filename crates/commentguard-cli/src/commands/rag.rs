use super::context::AppContext;
use anyhow::Result;
use commentguard_services::rag::RagService;

pub async fn load(ctx: &AppContext, directory_path: &str) -> Result<()> {
    let service = RagService::new(ctx.ai.clone());
    service.load_documents(directory_path).await?;

    println!("📚 Indexed documents from {directory_path}");
    Ok(())
}

pub async fn chat(ctx: &AppContext, question: &str) -> Result<()> {
    let service = RagService::new(ctx.ai.clone());
    let answer = service.chat(question).await?;

    println!("{}", answer.answer.as_deref().unwrap_or("(no answer)"));
    if !answer.sources.is_empty() {
        println!("\nSources:");
        for source in &answer.sources {
            println!("  - {source}");
        }
    }
    Ok(())
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    let service = RagService::new(ctx.ai.clone());
    service.clear().await?;

    println!("🗑️  Cleared the document index");
    Ok(())
}
