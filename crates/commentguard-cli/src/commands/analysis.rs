use super::context::AppContext;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use commentguard_core::analysis::{AnalysisWindow, CommentFilter, TextAnalysis};
use commentguard_services::analysis::AnalysisService;

fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(value.parse::<NaiveDate>()?)
}

/// Resolves the analysis window from the optional CLI dates, trimming it
/// to the configured maximum the same way the dashboard does.
fn resolve_window(
    ctx: &AppContext,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<AnalysisWindow> {
    let policy = ctx.config.analysis.window_policy();
    let today = Utc::now().date_naive();

    let window = match (start, end) {
        (Some(start), Some(end)) => AnalysisWindow::new(parse_date(start)?, parse_date(end)?),
        (Some(start), None) => {
            let start = parse_date(start)?;
            AnalysisWindow::new(start, today)
        }
        (None, Some(end)) => {
            let end = parse_date(end)?;
            AnalysisWindow::latest(end, policy)
        }
        (None, None) => AnalysisWindow::latest(today, policy),
    };

    let clamped = window.clamped(policy);
    if clamped != window {
        println!(
            "⚠️  Window trimmed to the {}-day maximum: {} to {}",
            policy.max_days, clamped.start, clamped.end
        );
    }
    Ok(clamped)
}

pub async fn comments(
    ctx: &AppContext,
    video_url: &str,
    start: Option<&str>,
    end: Option<&str>,
    filter: CommentFilter,
) -> Result<()> {
    let window = resolve_window(ctx, start, end)?;
    let service = AnalysisService::new(ctx.api.clone(), ctx.ai.clone());
    let comments = service.get_comments(video_url, window, filter).await?;

    println!(
        "💬 Comments for {video_url} ({} to {}): {}",
        window.start,
        window.end,
        comments.len()
    );
    for comment in &comments {
        let verdict = if comment.is_malicious {
            "malicious".red().to_string()
        } else {
            "clean".green().to_string()
        };
        let author = comment.author_identifier.as_deref().unwrap_or("unknown");
        println!("  [{verdict}] {author}: {}", comment.comment_text);
    }
    Ok(())
}

pub async fn crawl(ctx: &AppContext, video_url: &str) -> Result<()> {
    let service = AnalysisService::new(ctx.api.clone(), ctx.ai.clone());
    let result = service.request_crawl(video_url).await?;

    println!("🕷️  Crawl requested for {video_url}");
    if let Some(status) = result.status {
        println!("  Status: {status}");
    }
    if let Some(count) = result.comment_count {
        println!("  Comments collected: {count}");
    }
    Ok(())
}

fn print_text_analysis(analysis: &TextAnalysis) {
    let verdict = if analysis.is_malicious {
        "MALICIOUS".red().bold().to_string()
    } else {
        "CLEAN".green().bold().to_string()
    };
    println!("{verdict} (toxicity {:.2})", analysis.toxicity_score);
    if let Some(category) = &analysis.category {
        println!("Category: {category}");
    }
    if let Some(reasoning) = &analysis.llama_reasoning {
        println!("Reasoning: {reasoning}");
    }
    if !analysis.detected_keywords.is_empty() {
        println!("Keywords: {}", analysis.detected_keywords.join(", "));
    }
}

pub async fn text(ctx: &AppContext, text: &str) -> Result<()> {
    let service = AnalysisService::new(ctx.api.clone(), ctx.ai.clone());
    let analysis = service.analyze_text(text).await?;
    print_text_analysis(&analysis);
    Ok(())
}

pub async fn comment(ctx: &AppContext, id: i64) -> Result<()> {
    let service = AnalysisService::new(ctx.api.clone(), ctx.ai.clone());
    let record = service.analyze_comment(id).await?;

    println!("✅ Re-scored comment {id}");
    let verdict = if record.is_malicious {
        "malicious".red().to_string()
    } else {
        "clean".green().to_string()
    };
    println!("  Verdict: {verdict}");
    Ok(())
}

pub async fn history(ctx: &AppContext) -> Result<()> {
    let api = ctx.api.clone();
    let ai = ctx.ai.clone();
    let records = ctx
        .cache
        .fetch_as(
            commentguard_application::keys::analysis_history(),
            move || async move { AnalysisService::new(api, ai).history().await },
        )
        .await?;

    println!("📜 Analysis history ({} records)", records.len());
    for record in &records {
        let verdict = if record.is_malicious {
            "malicious".red().to_string()
        } else {
            "clean".green().to_string()
        };
        println!(
            "  [{}] {verdict} (toxicity {:.2}): {}",
            record.analysis_id, record.toxicity_score, record.comment_text
        );
    }
    Ok(())
}

pub async fn stats(ctx: &AppContext) -> Result<()> {
    let service = AnalysisService::new(ctx.api.clone(), ctx.ai.clone());
    let stats = service.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
