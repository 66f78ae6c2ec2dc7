use tracing_subscriber::EnvFilter;

use stockpick_admin::api::client::AdminClient;
use stockpick_admin::api::types::{
    ApplicationStats, Customer, Holding, HoldingStats, ServiceApplication, Subscription,
    SubscriptionStats, Transfer, TransferStats,
};
use stockpick_admin::api::AdminApi;
use stockpick_admin::auth::TokenStore;
use stockpick_admin::core::{AppConfig, AppError, AppState};
use stockpick_admin::list::{
    AdminAction, Dispatcher, ListView, PageCount, PageFetcher, PageStats, TracingNotifier,
};
use stockpick_admin::notify::{NotificationBridge, PendingCountsWatcher};

fn usage() -> &'static str {
    r#"Usage:
    stockpick-admin customers     [--page N] [--limit N] [--search TEXT]
    stockpick-admin holdings      [--page N] [--limit N] [--customer ID]
    stockpick-admin subscriptions [--page N] [--limit N] [--status S]
    stockpick-admin transfers     [--page N] [--limit N] [--status S] [--customer ID]
    stockpick-admin applications  [--page N] [--limit N] [--status S]
    stockpick-admin approve <transfer|application> <ID>
    stockpick-admin reject  <transfer|application> <ID> <REASON...>
    stockpick-admin counts
    stockpick-admin listen

Env:
    ADMIN_API_BASE_URL (required)
    ADMIN_ACCESS_TOKEN or ADMIN_TOKEN_FILE (required)
    ADMIN_WS_URL (default: derived from the base URL)
    ADMIN_PAGE_LIMIT (default 10)
    ADMIN_SEARCH_DEBOUNCE_MS (default 300)
    RUST_LOG (default info)
"#
}

#[derive(Debug, Default)]
struct ListOpts {
    page: Option<u32>,
    limit: Option<u32>,
    filters: Vec<(String, String)>,
}

fn parse_list_opts(mut args: impl Iterator<Item = String>) -> Result<ListOpts, String> {
    let mut opts = ListOpts::default();
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("Missing value for {flag}"))
        };
        match flag.as_str() {
            "--page" => {
                opts.page = Some(
                    value()?
                        .parse()
                        .map_err(|_| "Invalid --page value".to_string())?,
                )
            }
            "--limit" => {
                opts.limit = Some(
                    value()?
                        .parse()
                        .map_err(|_| "Invalid --limit value".to_string())?,
                )
            }
            "--status" => opts.filters.push(("status".to_string(), value()?)),
            "--customer" => opts.filters.push(("customer_id".to_string(), value()?)),
            "--search" => opts.filters.push(("search".to_string(), value()?)),
            other => return Err(format!("Unknown flag: {other}")),
        }
    }
    Ok(opts)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "counts".to_string());

    let state = build_state()?;

    match cmd.as_str() {
        "customers" => run_list::<Customer, PageCount>(&state, parse_or_exit(args)).await?,
        "holdings" => run_list::<Holding, HoldingStats>(&state, parse_or_exit(args)).await?,
        "subscriptions" => {
            run_list::<Subscription, SubscriptionStats>(&state, parse_or_exit(args)).await?
        }
        "transfers" => run_list::<Transfer, TransferStats>(&state, parse_or_exit(args)).await?,
        "applications" => {
            run_list::<ServiceApplication, ApplicationStats>(&state, parse_or_exit(args)).await?
        }
        "approve" | "reject" => {
            let target = args.next().unwrap_or_default();
            let id = args.next().unwrap_or_default();
            if id.is_empty() {
                eprintln!("Missing ID\n\n{}", usage());
                std::process::exit(2);
            }
            let reason = args.collect::<Vec<_>>().join(" ");
            let action = match (cmd.as_str(), target.as_str()) {
                ("approve", "transfer") => AdminAction::ApproveTransfer { id },
                ("reject", "transfer") => AdminAction::RejectTransfer { id, reason },
                ("approve", "application") => AdminAction::ApproveApplication { id },
                ("reject", "application") => AdminAction::RejectApplication { id, reason },
                _ => {
                    eprintln!("Expected 'transfer' or 'application'\n\n{}", usage());
                    std::process::exit(2);
                }
            };
            run_action(&state, action).await?;
        }
        "counts" => {
            let counts = state.api.pending_counts().await?;
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        "listen" => run_listen(&state).await?,
        _ => {
            eprintln!("Unknown command: {}\n\n{}", cmd, usage());
            std::process::exit(2);
        }
    }

    Ok(())
}

fn parse_or_exit(args: impl Iterator<Item = String>) -> ListOpts {
    match parse_list_opts(args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{e}\n\n{}", usage());
            std::process::exit(2);
        }
    }
}

fn build_state() -> Result<AppState, AppError> {
    let config = AppConfig::from_env()?;
    let tokens = TokenStore::from_config(&config)?;
    let api = AdminClient::new(&config.api_base_url, tokens.bearer())?;
    Ok(AppState::new(config, api))
}

/// Fetch one page and print it with its page-local stats.
///
/// A `--page` beyond the first needs the server-reported page count before
/// it can be applied, so the view syncs once, moves, then syncs again --
/// the same order of events as a dashboard user clicking a page button.
async fn run_list<T, S>(state: &AppState, opts: ListOpts) -> Result<(), AppError>
where
    T: serde::Serialize + Send + Sync + 'static,
    S: PageStats<T> + std::fmt::Debug,
    AdminClient: PageFetcher<T>,
{
    let limit = opts.limit.unwrap_or(state.config.page_limit);
    let mut view: ListView<T, S> = ListView::new(limit);
    for (key, value) in &opts.filters {
        view.set_filter(key, value.clone());
    }

    view.sync(&*state.api).await;
    if let Some(page) = opts.page {
        if view.set_page(page) {
            view.sync(&*state.api).await;
        }
    }

    if let Some(error) = view.last_error() {
        return Err(AppError::Api(error.to_string()));
    }

    println!("{}", serde_json::to_string_pretty(view.items())?);
    println!("{}  (total {})", view.pager().label(), view.pager().total());
    println!("Page stats: {:?}", view.stats());
    Ok(())
}

async fn run_action(state: &AppState, action: AdminAction) -> Result<(), AppError> {
    let notifier = TracingNotifier;
    let mut dispatcher = Dispatcher::new();

    let is_transfer = matches!(
        action,
        AdminAction::ApproveTransfer { .. } | AdminAction::RejectTransfer { .. }
    );

    if is_transfer {
        let mut view: ListView<Transfer, TransferStats> = ListView::new(state.config.page_limit);
        view.set_filter("status", "pending");
        view.sync(&*state.api).await;
        dispatcher
            .execute(action, &*state.api, &mut view, &*state.api, &notifier)
            .await;
        println!("{}", serde_json::to_string_pretty(view.items())?);
        println!("{}", view.pager().label());
    } else {
        let mut view: ListView<ServiceApplication, ApplicationStats> =
            ListView::new(state.config.page_limit);
        view.set_filter("status", "pending");
        view.sync(&*state.api).await;
        dispatcher
            .execute(action, &*state.api, &mut view, &*state.api, &notifier)
            .await;
        println!("{}", serde_json::to_string_pretty(view.items())?);
        println!("{}", view.pager().label());
    }
    Ok(())
}

/// Run the notification bridge and the pending-counts watcher until Ctrl-C.
async fn run_listen(state: &AppState) -> Result<(), AppError> {
    let tokens = TokenStore::from_config(&state.config)?;

    let bridge = NotificationBridge::new(
        state.config.ws_url.clone(),
        tokens.bearer().to_string(),
        state.api.clone(),
        state.notifications.clone(),
    );
    let bridge_handle = bridge.spawn();

    let watcher = PendingCountsWatcher::new(
        state.api.clone(),
        state.pending.clone(),
        state.notifications.subscribe(),
    );
    let watcher_handle = watcher.spawn();

    println!("Listening for notifications; Ctrl-C to stop.");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::Ws(format!("signal handler failed: {e}")))?;

    bridge_handle.abort();
    watcher_handle.abort();

    println!(
        "{} notifications in log, {} unread",
        state.notifications.len(),
        state.notifications.unread_count()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&state.pending.get())?
    );
    Ok(())
}
