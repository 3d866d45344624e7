use super::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use commentguard_application::keys;
use commentguard_core::notice::{Notice, NoticeDraft, NoticeType};
use commentguard_core::page::{Page, PageRequest};
use commentguard_services::notices::NoticeService;

fn print_notice_line(notice: &Notice) {
    let pin = if notice.is_pinned { "📌 " } else { "" };
    println!(
        "  [{}] {}{} ({}, {} views)",
        notice.notice_id,
        pin,
        notice.title.bold(),
        notice.notice_type,
        notice.view_count
    );
}

pub async fn list(ctx: &AppContext, page: u32, all: bool) -> Result<()> {
    if all {
        let gateway = ctx.api.clone();
        let notices: Vec<Notice> = ctx
            .cache
            .fetch_as(keys::notices_all(), move || async move {
                NoticeService::new(gateway).list_all().await
            })
            .await?;

        println!("📋 Notices ({})", notices.len());
        for notice in &notices {
            print_notice_line(notice);
        }
        return Ok(());
    }

    let gateway = ctx.api.clone();
    let request = PageRequest::new(page, PageRequest::DEFAULT_NOTICE_SIZE);
    let listing: Page<Notice> = ctx
        .cache
        .fetch_as(keys::notices_page(page), move || async move {
            NoticeService::new(gateway).list(request).await
        })
        .await?;

    println!(
        "📋 Notices, page {}/{} ({} total)",
        listing.number + 1,
        listing.total_pages,
        listing.total_elements
    );
    for notice in &listing.content {
        print_notice_line(notice);
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, id: i64) -> Result<()> {
    let gateway = ctx.api.clone();
    let notice: Notice = ctx
        .cache
        .fetch_as(keys::notice(id), move || async move {
            NoticeService::new(gateway).get(id).await
        })
        .await?;

    println!("{}", notice.title.bold());
    if let Some(created) = notice.created_at {
        println!("{} | {} views | {}", notice.notice_type, notice.view_count, created);
    }
    println!("\n{}", notice.content);
    Ok(())
}

pub async fn create(ctx: &AppContext, title: &str, content: &str, kind: NoticeType) -> Result<()> {
    let service = NoticeService::new(ctx.api.clone());
    let draft = NoticeDraft {
        title: title.to_string(),
        content: content.to_string(),
        notice_type: kind,
    };

    let notice = ctx
        .cache
        .mutate(keys::NOTICES, async { service.create(&draft).await })
        .await?;

    println!("✅ Published notice {}", notice.notice_id);
    Ok(())
}

pub async fn update(
    ctx: &AppContext,
    id: i64,
    title: &str,
    content: &str,
    kind: NoticeType,
) -> Result<()> {
    let service = NoticeService::new(ctx.api.clone());
    let draft = NoticeDraft {
        title: title.to_string(),
        content: content.to_string(),
        notice_type: kind,
    };

    ctx.cache
        .mutate(keys::NOTICES, async { service.update(id, &draft).await })
        .await?;
    ctx.cache.invalidate(keys::NOTICE).await;

    println!("✅ Updated notice {id}");
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<()> {
    let service = NoticeService::new(ctx.api.clone());
    ctx.cache
        .mutate(keys::NOTICES, async { service.delete(id).await })
        .await?;
    ctx.cache.invalidate(keys::NOTICE).await;

    println!("🗑️  Deleted notice {id}");
    Ok(())
}

pub async fn toggle_pin(ctx: &AppContext, id: i64) -> Result<()> {
    let service = NoticeService::new(ctx.api.clone());
    let notice = ctx
        .cache
        .mutate(keys::NOTICES, async { service.toggle_pin(id).await })
        .await?;
    ctx.cache.invalidate(keys::NOTICE).await;

    if notice.is_pinned {
        println!("📌 Pinned notice {id}");
    } else {
        println!("✅ Unpinned notice {id}");
    }
    Ok(())
}
