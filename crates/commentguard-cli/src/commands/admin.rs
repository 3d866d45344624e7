use super::context::AppContext;
use anyhow::{Result, bail};
use colored::Colorize;
use commentguard_application::keys;
use commentguard_core::moderation::AdminUser;
use commentguard_services::admin::AdminService;

async fn fetch_users(ctx: &AppContext) -> Result<Vec<AdminUser>> {
    let gateway = ctx.api.clone();
    let users = ctx
        .cache
        .fetch_as(keys::admin_users(), move || async move {
            AdminService::new(gateway).list_users().await
        })
        .await?;
    Ok(users)
}

pub async fn users(ctx: &AppContext) -> Result<()> {
    let users = fetch_users(ctx).await?;

    println!("👥 Accounts ({})", users.len());
    for user in &users {
        let mut marks = Vec::new();
        if user.is_admin() {
            marks.push("admin".cyan().to_string());
        }
        if user.suspended {
            marks.push("suspended".red().to_string());
        }
        if user.flagged {
            marks.push("flagged".yellow().to_string());
        }
        let suffix = if marks.is_empty() {
            String::new()
        } else {
            format!(" [{}]", marks.join(", "))
        };
        println!("  [{}] {} <{}>{}", user.user_id, user.username, user.email, suffix);
    }
    Ok(())
}

pub async fn suspend(ctx: &AppContext, user_id: i64, reason: &str, days: u32) -> Result<()> {
    let users = fetch_users(ctx).await?;
    let Some(user) = users.iter().find(|u| u.user_id == user_id) else {
        bail!("no account with id {user_id}");
    };

    let service = AdminService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::ADMIN_USERS, async {
            service.suspend(user, reason, days).await
        })
        .await?;

    println!("🚫 Suspended {} for {days} days", user.username);
    Ok(())
}

pub async fn unsuspend(ctx: &AppContext, user_id: i64) -> Result<()> {
    let service = AdminService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::ADMIN_USERS, async { service.unsuspend(user_id).await })
        .await?;

    println!("✅ Lifted suspension for user {user_id}");
    Ok(())
}

pub async fn flag(ctx: &AppContext, user_id: i64, reason: &str) -> Result<()> {
    let service = AdminService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::ADMIN_USERS, async {
            service.flag(user_id, reason).await
        })
        .await?;

    println!("🚩 Flagged user {user_id}");
    Ok(())
}

pub async fn unflag(ctx: &AppContext, user_id: i64) -> Result<()> {
    let service = AdminService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::ADMIN_USERS, async { service.unflag(user_id).await })
        .await?;

    println!("✅ Removed flag from user {user_id}");
    Ok(())
}
