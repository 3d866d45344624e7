use anyhow::Result;
use clap::{Parser, Subcommand};
use commentguard_core::notice::NoticeType;
use commentguard_core::suggestion::SuggestionStatus;

mod commands;

#[derive(Parser)]
#[command(name = "commentguard")]
#[command(about = "CommentGuard CLI - comment moderation dashboard client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        email: String,
        password: String,
    },
    /// Register a new account
    Signup {
        username: String,
        email: String,
        password: String,
    },
    /// End the stored session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Notices: read and author announcements
    Notice {
        #[command(subcommand)]
        action: NoticeAction,
    },
    /// Suggestions: submit ideas and manage responses
    Suggest {
        #[command(subcommand)]
        action: SuggestAction,
    },
    /// Admin user management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Channel blacklist
    Blacklist {
        #[command(subcommand)]
        action: BlacklistAction,
    },
    /// Blocked words
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },
    /// Comment crawling and toxicity analysis
    Analyze {
        #[command(subcommand)]
        action: AnalyzeAction,
    },
    /// System-overview statistics
    Dashboard {
        /// Keep the view on screen and refetch on an interval
        #[arg(long)]
        watch: bool,
    },
    /// Writing templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// AI writing assistant
    Assist {
        #[command(subcommand)]
        action: AssistAction,
    },
    /// Document Q&A over the AI origin
    Rag {
        #[command(subcommand)]
        action: RagAction,
    },
}

#[derive(Subcommand)]
enum NoticeAction {
    /// List notices
    List {
        /// 0-based page of the paged manager view
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Unpaged board listing instead of the paged one
        #[arg(long)]
        all: bool,
    },
    /// Show one notice
    Show { id: i64 },
    /// Publish a notice
    Create {
        title: String,
        content: String,
        #[arg(long, value_enum, default_value_t = NoticeTypeArg::General)]
        r#type: NoticeTypeArg,
    },
    /// Edit a notice
    Update {
        id: i64,
        title: String,
        content: String,
        #[arg(long, value_enum, default_value_t = NoticeTypeArg::General)]
        r#type: NoticeTypeArg,
    },
    /// Delete a notice
    Delete { id: i64 },
    /// Flip a notice's pinned flag
    Pin { id: i64 },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum NoticeTypeArg {
    General,
    Maintenance,
    Update,
    Event,
}

impl From<NoticeTypeArg> for NoticeType {
    fn from(arg: NoticeTypeArg) -> Self {
        match arg {
            NoticeTypeArg::General => NoticeType::General,
            NoticeTypeArg::Maintenance => NoticeType::Maintenance,
            NoticeTypeArg::Update => NoticeType::Update,
            NoticeTypeArg::Event => NoticeType::Event,
        }
    }
}

#[derive(Subcommand)]
enum SuggestAction {
    /// List suggestions
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Every user's suggestions (admin) instead of your own
        #[arg(long)]
        all: bool,
    },
    /// Show one suggestion
    Show { id: i64 },
    /// Submit a suggestion
    Create { title: String, content: String },
    /// Answer a suggestion and move its status (admin)
    Respond {
        id: i64,
        response: String,
        #[arg(long, value_enum, default_value_t = StatusArg::Completed)]
        status: StatusArg,
    },
    /// Change a suggestion's status without a response (admin)
    Status {
        id: i64,
        #[arg(value_enum)]
        status: StatusArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StatusArg {
    Submitted,
    InProgress,
    Completed,
    Rejected,
}

impl From<StatusArg> for SuggestionStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Submitted => SuggestionStatus::Submitted,
            StatusArg::InProgress => SuggestionStatus::InProgress,
            StatusArg::Completed => SuggestionStatus::Completed,
            StatusArg::Rejected => SuggestionStatus::Rejected,
        }
    }
}

#[derive(Subcommand)]
enum AdminAction {
    /// List all accounts
    Users,
    /// Suspend a user for a number of days
    Suspend {
        user_id: i64,
        #[arg(long)]
        reason: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Lift a suspension
    Unsuspend { user_id: i64 },
    /// Flag an account for review
    Flag {
        user_id: i64,
        #[arg(long)]
        reason: String,
    },
    /// Remove an account's flag
    Unflag { user_id: i64 },
}

#[derive(Subcommand)]
enum BlacklistAction {
    /// List blacklisted channels
    List,
    /// Blacklist a channel
    Add {
        channel_name: String,
        channel_identifier: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Remove a blacklist entry
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum WordsAction {
    /// List blocked words
    List,
    /// Block a word
    Add { word: String },
    /// Unblock a word
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum AnalyzeAction {
    /// List crawled comments for a video
    Comments {
        video_url: String,
        /// Window start date (YYYY-MM-DD); defaults to the latest window
        #[arg(long)]
        start: Option<String>,
        /// Window end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Show only malicious or only clean comments
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Ask the AI origin to crawl a video's comments
    Crawl { video_url: String },
    /// Score a text for toxicity
    Text { text: String },
    /// Re-score one stored comment
    Comment { id: i64 },
    /// Stored analysis history
    History,
    /// Aggregate analysis counters
    Stats,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FilterArg {
    All,
    Clean,
    Malicious,
}

impl From<FilterArg> for commentguard_core::analysis::CommentFilter {
    fn from(arg: FilterArg) -> Self {
        use commentguard_core::analysis::CommentFilter;
        match arg {
            FilterArg::All => CommentFilter::All,
            FilterArg::Clean => CommentFilter::Clean,
            FilterArg::Malicious => CommentFilter::Malicious,
        }
    }
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List saved templates
    List,
    /// Save a template
    Create {
        title: String,
        content: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a template
    Delete { id: String },
}

#[derive(Subcommand)]
enum AssistAction {
    /// Rewrite a text in a given tone
    Improve {
        text: String,
        #[arg(long, default_value = "polite")]
        tone: String,
        #[arg(long, default_value = "auto")]
        language: String,
        #[arg(long)]
        instruction: Option<String>,
    },
    /// Draft a reply to a comment
    Reply {
        comment: String,
        #[arg(long)]
        context: Option<String>,
        #[arg(long, default_value = "constructive")]
        reply_type: String,
        #[arg(long, default_value = "auto")]
        language: String,
    },
    /// Generate a reusable template for a situation
    Template {
        situation: String,
        topic: String,
        #[arg(long, default_value = "polite")]
        tone: String,
        #[arg(long, default_value = "auto")]
        language: String,
    },
}

#[derive(Subcommand)]
enum RagAction {
    /// Index a document directory on the server
    Load { directory_path: String },
    /// Ask a question against the loaded documents
    Chat { question: String },
    /// Drop the document index
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::context::AppContext::init()?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await?,
        Commands::Signup {
            username,
            email,
            password,
        } => commands::auth::signup(&ctx, &username, &email, &password).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Notice { action } => match action {
            NoticeAction::List { page, all } => commands::notices::list(&ctx, page, all).await?,
            NoticeAction::Show { id } => commands::notices::show(&ctx, id).await?,
            NoticeAction::Create {
                title,
                content,
                r#type,
            } => commands::notices::create(&ctx, &title, &content, r#type.into()).await?,
            NoticeAction::Update {
                id,
                title,
                content,
                r#type,
            } => commands::notices::update(&ctx, id, &title, &content, r#type.into()).await?,
            NoticeAction::Delete { id } => commands::notices::delete(&ctx, id).await?,
            NoticeAction::Pin { id } => commands::notices::toggle_pin(&ctx, id).await?,
        },
        Commands::Suggest { action } => match action {
            SuggestAction::List { page, all } => {
                commands::suggestions::list(&ctx, page, all).await?
            }
            SuggestAction::Show { id } => commands::suggestions::show(&ctx, id).await?,
            SuggestAction::Create { title, content } => {
                commands::suggestions::create(&ctx, &title, &content).await?
            }
            SuggestAction::Respond {
                id,
                response,
                status,
            } => commands::suggestions::respond(&ctx, id, &response, status.into()).await?,
            SuggestAction::Status { id, status } => {
                commands::suggestions::update_status(&ctx, id, status.into()).await?
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Users => commands::admin::users(&ctx).await?,
            AdminAction::Suspend {
                user_id,
                reason,
                days,
            } => commands::admin::suspend(&ctx, user_id, &reason, days).await?,
            AdminAction::Unsuspend { user_id } => commands::admin::unsuspend(&ctx, user_id).await?,
            AdminAction::Flag { user_id, reason } => {
                commands::admin::flag(&ctx, user_id, &reason).await?
            }
            AdminAction::Unflag { user_id } => commands::admin::unflag(&ctx, user_id).await?,
        },
        Commands::Blacklist { action } => match action {
            BlacklistAction::List => commands::moderation::blacklist_list(&ctx).await?,
            BlacklistAction::Add {
                channel_name,
                channel_identifier,
                reason,
            } => {
                commands::moderation::blacklist_add(&ctx, &channel_name, &channel_identifier, reason)
                    .await?
            }
            BlacklistAction::Remove { id } => {
                commands::moderation::blacklist_remove(&ctx, id).await?
            }
        },
        Commands::Words { action } => match action {
            WordsAction::List => commands::moderation::words_list(&ctx).await?,
            WordsAction::Add { word } => commands::moderation::words_add(&ctx, &word).await?,
            WordsAction::Remove { id } => commands::moderation::words_remove(&ctx, id).await?,
        },
        Commands::Analyze { action } => match action {
            AnalyzeAction::Comments {
                video_url,
                start,
                end,
                filter,
            } => {
                commands::analysis::comments(
                    &ctx,
                    &video_url,
                    start.as_deref(),
                    end.as_deref(),
                    filter.into(),
                )
                .await?
            }
            AnalyzeAction::Crawl { video_url } => {
                commands::analysis::crawl(&ctx, &video_url).await?
            }
            AnalyzeAction::Text { text } => commands::analysis::text(&ctx, &text).await?,
            AnalyzeAction::Comment { id } => commands::analysis::comment(&ctx, id).await?,
            AnalyzeAction::History => commands::analysis::history(&ctx).await?,
            AnalyzeAction::Stats => commands::analysis::stats(&ctx).await?,
        },
        Commands::Dashboard { watch } => commands::dashboard::show(&ctx, watch).await?,
        Commands::Template { action } => match action {
            TemplateAction::List => commands::templates::list(&ctx).await?,
            TemplateAction::Create {
                title,
                content,
                category,
            } => commands::templates::create(&ctx, &title, &content, category).await?,
            TemplateAction::Delete { id } => commands::templates::delete(&ctx, &id).await?,
        },
        Commands::Assist { action } => match action {
            AssistAction::Improve {
                text,
                tone,
                language,
                instruction,
            } => {
                commands::assistant::improve(&ctx, &text, &tone, &language, instruction.as_deref())
                    .await?
            }
            AssistAction::Reply {
                comment,
                context,
                reply_type,
                language,
            } => {
                commands::assistant::reply(
                    &ctx,
                    &comment,
                    context.as_deref(),
                    &reply_type,
                    &language,
                )
                .await?
            }
            AssistAction::Template {
                situation,
                topic,
                tone,
                language,
            } => commands::assistant::template(&ctx, &situation, &topic, &tone, &language).await?,
        },
        Commands::Rag { action } => match action {
            RagAction::Load { directory_path } => commands::rag::load(&ctx, &directory_path).await?,
            RagAction::Chat { question } => commands::rag::chat(&ctx, &question).await?,
            RagAction::Clear => commands::rag::clear(&ctx).await?,
        },
    }

    Ok(())
}
