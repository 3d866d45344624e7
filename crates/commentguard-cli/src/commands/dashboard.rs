use super::context::AppContext;
use anyhow::Result;
use colored::Colorize;
use commentguard_application::keys;
use commentguard_core::dashboard::DashboardStats;
use commentguard_services::dashboard::DashboardService;
use std::time::Duration;

fn render(stats: &DashboardStats) {
    println!("📊 {}", "System overview".bold());
    println!(
        "  Analyzed: {} | {}: {} | {}: {} | Detection rate: {}",
        stats.total,
        "malicious".red(),
        stats.malicious,
        "clean".green(),
        stats.clean,
        stats.detection_rate
    );

    if !stats.weekly_activity.is_empty() {
        let chart: Vec<String> = stats
            .weekly_activity
            .iter()
            .map(|point| format!("{} {}", point.name, point.count))
            .collect();
        println!("  Weekly: {}", chart.join(" | "));
    }

    for notification in &stats.notifications {
        let mark = if notification.is_malicious {
            "🚨"
        } else {
            "✅"
        };
        let category = notification.category.as_deref().unwrap_or("uncategorized");
        println!("  {mark} #{} {category}", notification.id);
    }
}

async fn fetch_stats(ctx: &AppContext) -> Result<DashboardStats> {
    let gateway = ctx.api.clone();
    let stats = ctx
        .cache
        .fetch_as(keys::dashboard(), move || async move {
            DashboardService::new(gateway).stats().await
        })
        .await?;
    Ok(stats)
}

pub async fn show(ctx: &AppContext, watch: bool) -> Result<()> {
    render(&fetch_stats(ctx).await?);
    if !watch {
        return Ok(());
    }

    let interval = Duration::from_secs(ctx.config.cache.poll_interval_secs);
    let gateway = ctx.api.clone();
    let poll = ctx.cache.spawn_poll(keys::dashboard(), interval, move || {
        let gateway = gateway.clone();
        async move {
            let stats = DashboardService::new(gateway).stats().await?;
            Ok(serde_json::to_value(stats)?)
        }
    });

    println!(
        "\n🔄 Refreshing every {}s. Ctrl-C to stop.",
        interval.as_secs()
    );
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(interval) => {
                // The poll task keeps the cache fresh; this read normally
                // returns the cached value without a second request.
                render(&fetch_stats(ctx).await?);
            }
        }
    }
    poll.stop();

    Ok(())
}
