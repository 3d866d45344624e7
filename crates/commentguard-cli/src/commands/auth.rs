use super::context::AppContext;
use anyhow::Result;
use commentguard_services::auth::AuthService;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let service = AuthService::new(ctx.api.clone(), ctx.session.clone());
    let response = service.login(email, password).await?;

    println!("✅ Logged in as {} ({})", response.username, response.role);
    Ok(())
}

pub async fn signup(ctx: &AppContext, username: &str, email: &str, password: &str) -> Result<()> {
    let service = AuthService::new(ctx.api.clone(), ctx.session.clone());
    service.signup(username, email, password).await?;

    println!("✅ Account created for {email}. Log in with 'commentguard login'.");
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    let service = AuthService::new(ctx.api.clone(), ctx.session.clone());
    service.logout()?;

    println!("👋 Logged out.");
    Ok(())
}

pub fn whoami(ctx: &AppContext) {
    match ctx.session.current() {
        Some(session) => {
            println!("{} <{}>", session.username, session.email);
            println!("Role: {}", session.role);
        }
        None => println!("Not logged in."),
    }
}
