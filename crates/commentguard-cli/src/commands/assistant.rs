use super::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use commentguard_services::assistant::{AssistantResponse, AssistantService};

fn render(response: &AssistantResponse) {
    for suggestion in &response.suggestions {
        let tone = suggestion.tone.as_deref().unwrap_or("neutral");
        println!(
            "{} ({tone}, confidence {:.2})",
            format!("Version {}", suggestion.version).bold(),
            suggestion.confidence
        );
        println!("  {}", suggestion.text);
        if let Some(reasoning) = &suggestion.reasoning {
            println!("  💭 {reasoning}");
        }
    }
    if let Some(model) = &response.model_used {
        println!("\n({model}, {:.0} ms)", response.processing_time_ms);
    }
}

pub async fn improve(
    ctx: &AppContext,
    text: &str,
    tone: &str,
    language: &str,
    instruction: Option<&str>,
) -> Result<()> {
    let service = AssistantService::new(ctx.ai.clone());
    let response = service.improve(text, tone, language, instruction).await?;
    render(&response);
    Ok(())
}

pub async fn reply(
    ctx: &AppContext,
    comment: &str,
    context: Option<&str>,
    reply_type: &str,
    language: &str,
) -> Result<()> {
    let service = AssistantService::new(ctx.ai.clone());
    let response = service.reply(comment, context, reply_type, language).await?;
    render(&response);
    Ok(())
}

pub async fn template(
    ctx: &AppContext,
    situation: &str,
    topic: &str,
    tone: &str,
    language: &str,
) -> Result<()> {
    let service = AssistantService::new(ctx.ai.clone());
    let response = service.template(situation, topic, tone, language).await?;
    render(&response);
    Ok(())
}
