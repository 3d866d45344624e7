use super::context::AppContext;
use anyhow::Result;
use commentguard_application::keys;
use commentguard_core::moderation::{BlacklistDraft, BlacklistEntry, BlockedWord};
use commentguard_services::blacklist::BlacklistService;
use commentguard_services::blocked_words::BlockedWordService;

pub async fn blacklist_list(ctx: &AppContext) -> Result<()> {
    let gateway = ctx.api.clone();
    let entries: Vec<BlacklistEntry> = ctx
        .cache
        .fetch_as(keys::blacklist(), move || async move {
            BlacklistService::new(gateway).list().await
        })
        .await?;

    println!("⛔ Blacklisted channels ({})", entries.len());
    for entry in &entries {
        println!(
            "  [{}] {} ({}) - {} detections",
            entry.entry_id, entry.channel_name, entry.channel_identifier, entry.detection_count
        );
    }
    Ok(())
}

pub async fn blacklist_add(
    ctx: &AppContext,
    channel_name: &str,
    channel_identifier: &str,
    reason: Option<String>,
) -> Result<()> {
    let service = BlacklistService::new(ctx.api.clone());
    let draft = BlacklistDraft {
        channel_name: channel_name.to_string(),
        channel_identifier: channel_identifier.to_string(),
        reason,
    };

    let entry = ctx
        .cache
        .mutate(keys::BLACKLIST, async { service.add(&draft).await })
        .await?;

    println!("⛔ Blacklisted {} (entry {})", channel_name, entry.entry_id);
    Ok(())
}

pub async fn blacklist_remove(ctx: &AppContext, id: i64) -> Result<()> {
    let service = BlacklistService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::BLACKLIST, async { service.remove(id).await })
        .await?;

    println!("✅ Removed blacklist entry {id}");
    Ok(())
}

pub async fn words_list(ctx: &AppContext) -> Result<()> {
    let gateway = ctx.api.clone();
    let words: Vec<BlockedWord> = ctx
        .cache
        .fetch_as(keys::blocked_words(), move || async move {
            BlockedWordService::new(gateway).list().await
        })
        .await?;

    println!("🔇 Blocked words ({})", words.len());
    for word in &words {
        println!("  [{}] {}", word.word_id, word.word);
    }
    Ok(())
}

pub async fn words_add(ctx: &AppContext, word: &str) -> Result<()> {
    let service = BlockedWordService::new(ctx.api.clone());
    let blocked = ctx
        .cache
        .mutate(keys::BLOCKED_WORDS, async { service.add(word).await })
        .await?;

    println!("🔇 Blocked '{}' (id {})", blocked.word, blocked.word_id);
    Ok(())
}

pub async fn words_remove(ctx: &AppContext, id: i64) -> Result<()> {
    let service = BlockedWordService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::BLOCKED_WORDS, async { service.remove(id).await })
        .await?;

    println!("✅ Unblocked word {id}");
    Ok(())
}
