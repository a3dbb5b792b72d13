// bozor-cli: interactive demo driving a seeded marketplace session from
// stdin, one command per line.
use std::time::Duration;

use chrono::Utc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

use bozor::catalog::is_high_trust;
use bozor::chat::Conversation;
use bozor::config::AppConfig;
use bozor::data;
use bozor::format::{format_price, format_time_ago};
use bozor::models::{Condition, Language, Listing};
use bozor::services::upload::upload_images;
use bozor::services::MockIdentityProvider;
use bozor::session::{Page, PostAdOutcome, Session, SessionError};

const HELP: &str = "\
Commands:
  /login                 sign in with MYiD (simulated)
  /logout
  /lang <uz|ru|en>       switch UI language
  /home                  featured and recent listings
  /categories            list all categories
  /category <id>         listings in one category
  /view <listing-id>     open a product page
  /fav <listing-id>      toggle favorite
  /favorites             favorites resolved against the store
  /dashboard             my ads, favorites, chat counters
  /chats                 conversation list
  /chat <chat-id>        full thread
  /msg <listing-id> <text...>   message the seller
  /post <category-id>    start posting an ad
  /title <text...>  /desc <text...>  /price <n>
  /region <id>  /city <text...>  /photos <n>  /back
  /publish               attempt to publish the ad
  /verify                run MYiD verification when gated
  /export                dump listings as JSON
  /help  /quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    std::env::set_var("RUST_LOG", &log_level);
    env_logger::init();

    let config = AppConfig::from_env();
    let identity = MockIdentityProvider::new(
        Duration::from_millis(config.login_delay_ms),
        Duration::from_millis(config.verify_delay_ms),
    );
    let mut session = Session::seeded(&config)?;

    println!("bozor demo marketplace. Type /help for commands.");
    let mut input = BufReader::new(stdin());
    let mut line = String::new();
    loop {
        line.clear();
        print!("> ");
        use std::io::Write;
        std::io::stdout().flush()?;
        let n = input.read_line(&mut line).await?;
        if n == 0 {
            break;
        }
        let cmd_line = line.trim();
        if cmd_line.is_empty() {
            continue;
        }
        let mut parts = cmd_line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match command {
            "/quit" => break,
            "/help" => println!("{HELP}"),
            "/login" => {
                if session.current_user().is_some() {
                    println!("Already logged in.");
                    continue;
                }
                println!("Contacting MYiD...");
                match identity.authenticate(data::demo_user()).wait().await {
                    Some(user) => {
                        println!("Welcome, {}!", user.name);
                        session.login(user);
                    }
                    None => println!("Login cancelled."),
                }
            }
            "/logout" => {
                session.logout();
                println!("Logged out.");
            }
            "/lang" => match args.first().and_then(|a| Language::parse(a)) {
                Some(lang) => {
                    session.set_language(lang);
                    println!("Language set to {lang:?}.");
                }
                None => println!("Usage: /lang <uz|ru|en>"),
            },
            "/home" => {
                session.navigate(Page::Home);
                println!("-- Featured --");
                for l in session.featured() {
                    print_listing_line(&session, l);
                }
                println!("-- Recent --");
                for l in session.recent() {
                    print_listing_line(&session, l);
                }
            }
            "/categories" => {
                for cat in session.catalog().categories() {
                    let trust = if is_high_trust(&cat.id) { " [MYiD]" } else { "" };
                    println!("{:<12} {}{}", cat.id, cat.name(session.language()), trust);
                }
            }
            "/category" => match args.first() {
                Some(id) if session.catalog().category(id).is_some() => {
                    session.navigate(Page::Category { category_id: id.to_string() });
                    let listings = session.listings().filter_by_category(id);
                    if listings.is_empty() {
                        println!("No listings in this category.");
                    }
                    for l in listings {
                        print_listing_line(&session, l);
                    }
                }
                Some(id) => println!("Unknown category '{id}'."),
                None => println!("Usage: /category <id>"),
            },
            "/view" => match args.first() {
                Some(id) => {
                    session.navigate(Page::Product { listing_id: id.to_string() });
                    match session.listings().get(id) {
                        Some(listing) => print_product(&session, listing),
                        None => println!("Listing not found."),
                    }
                }
                None => println!("Usage: /view <listing-id>"),
            },
            "/fav" => match args.first() {
                Some(id) => {
                    if session.toggle_favorite(id) {
                        println!("Added to favorites.");
                    } else {
                        println!("Removed from favorites.");
                    }
                }
                None => println!("Usage: /fav <listing-id>"),
            },
            "/favorites" => {
                let favorites = session.favorite_listings();
                if favorites.is_empty() {
                    println!("No favorites yet.");
                }
                for l in favorites {
                    print_listing_line(&session, l);
                }
            }
            "/dashboard" => {
                session.navigate(Page::Dashboard);
                match session.dashboard() {
                    Ok(d) => {
                        let badge = if d.user.myid_verified { " [MYiD verified]" } else { "" };
                        println!(
                            "{}{} — member since {}",
                            d.user.name,
                            badge,
                            d.user.member_since.format("%d.%m.%Y")
                        );
                        println!(
                            "my ads: {}  favorites: {}  chats: {} ({} unread)",
                            d.my_ads.len(),
                            d.favorites.len(),
                            d.chat_count,
                            d.unread_count
                        );
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "/chats" => {
                session.navigate(Page::Chat { chat_id: None });
                let convs = session.conversations();
                if convs.is_empty() {
                    println!("No messages.");
                }
                for conv in &convs {
                    print_conversation_line(&session, conv);
                }
            }
            "/chat" => match args.first() {
                Some(id) => {
                    session.navigate(Page::Chat { chat_id: Some(id.to_string()) });
                    let convs = session.conversations();
                    match bozor::chat::select(&convs, Some(*id)) {
                        Some(conv) => {
                            for m in conv.messages() {
                                let name = session
                                    .user(&m.sender_id)
                                    .map(|u| u.name.as_str())
                                    .unwrap_or(&m.sender_id);
                                println!("[{}] {}: {}", m.timestamp.format("%H:%M"), name, m.text);
                            }
                        }
                        None => println!("No such conversation."),
                    }
                }
                None => println!("Usage: /chat <chat-id>"),
            },
            "/msg" => {
                if args.len() < 2 {
                    println!("Usage: /msg <listing-id> <text...>");
                    continue;
                }
                let text = args[1..].join(" ");
                match session.send_message(args[0], &text) {
                    Ok(Some(m)) => println!("Sent in {}.", m.chat_id),
                    Ok(None) => println!("Empty message, nothing sent."),
                    Err(e) => println!("{e}"),
                }
            }
            "/post" => {
                if session.current_user().is_none() {
                    println!("Login to post an ad.");
                    continue;
                }
                match args.first() {
                    Some(id) => {
                        session.navigate(Page::PostAd);
                        let catalog = session.catalog().clone();
                        match session.post_ad_flow() {
                            Some(flow) => match flow.select_category(&catalog, id) {
                                Ok(()) => println!(
                                    "Category '{id}' selected. Fill /title /desc /price, then /publish."
                                ),
                                Err(e) => println!("{e}"),
                            },
                            None => println!("No active flow."),
                        }
                    }
                    None => println!("Usage: /post <category-id>"),
                }
            }
            "/title" | "/desc" | "/city" => {
                let value = args.join(" ");
                match session.post_ad_flow() {
                    Some(flow) => {
                        match command {
                            "/title" => flow.title = value,
                            "/desc" => flow.description = value,
                            _ => flow.city = value,
                        }
                        println!("Ok.");
                    }
                    None => println!("Start with /post <category-id> first."),
                }
            }
            "/price" => match (session.post_ad_flow(), args.first().and_then(|a| a.parse::<u64>().ok())) {
                (Some(flow), Some(price)) => {
                    flow.price = Some(price);
                    println!("Ok.");
                }
                (Some(_), None) => println!("Usage: /price <positive integer>"),
                (None, _) => println!("Start with /post <category-id> first."),
            },
            "/region" => {
                let region = args.first().map(|s| s.to_string());
                let known = region.as_deref().map(|id| session.catalog().region(id).is_some());
                match (session.post_ad_flow(), region, known) {
                    (Some(flow), Some(id), Some(true)) => {
                        flow.region = Some(id);
                        println!("Ok.");
                    }
                    (Some(_), Some(id), _) => println!("Unknown region '{id}'."),
                    (Some(_), None, _) => println!("Usage: /region <id>"),
                    (None, _, _) => println!("Start with /post <category-id> first."),
                }
            }
            "/photos" => match (args.first().and_then(|a| a.parse::<usize>().ok()), session.post_ad_flow()) {
                (Some(count), Some(flow)) => {
                    let mut added = 0;
                    for url in upload_images(count) {
                        if flow.add_image(url) {
                            added += 1;
                        }
                    }
                    println!("Uploaded {added} photo(s), {} total.", flow.images().len());
                }
                (None, Some(_)) => println!("Usage: /photos <count>"),
                (_, None) => println!("Start with /post <category-id> first."),
            },
            "/back" => match session.post_ad_flow() {
                Some(flow) => {
                    flow.back();
                    println!("Step: {:?}", flow.step());
                }
                None => println!("No active flow."),
            },
            "/publish" => match session.submit_post_ad() {
                Ok(PostAdOutcome::Posted { listing_id }) => println!("Published: {listing_id}"),
                Ok(PostAdOutcome::VerificationRequired) => {
                    println!("This category requires MYiD verification. Run /verify.")
                }
                Ok(PostAdOutcome::Invalid) => println!("Fill title, description and a positive price first."),
                Err(e) => println!("{e}"),
            },
            "/verify" => {
                let user = match session.current_user() {
                    Some(u) => u.clone(),
                    None => {
                        println!("Login first.");
                        continue;
                    }
                };
                println!("Verifying with MYiD...");
                match identity.verify(user).wait().await {
                    Some(verified) => match session.complete_post_ad_verification(verified) {
                        Ok(PostAdOutcome::Posted { listing_id }) => {
                            println!("Verified and published: {listing_id}")
                        }
                        Ok(other) => println!("Verification done, but publish state is {other:?}."),
                        Err(SessionError::NoActiveFlow) => println!("Verified, but there is no pending ad."),
                        Err(e) => println!("{e}"),
                    },
                    None => println!("Verification cancelled."),
                }
            }
            "/export" => {
                let listings: Vec<&Listing> = session.listings().iter().collect();
                println!("{}", serde_json::to_string_pretty(&listings)?);
            }
            other => println!("Unknown command '{other}'. Type /help."),
        }
    }
    println!("Bye.");
    Ok(())
}

fn print_listing_line(session: &Session, listing: &Listing) {
    let lang = session.language();
    let star = if listing.featured { "*" } else { " " };
    let fav = if session.favorites().contains(&listing.id) { "♥" } else { " " };
    println!(
        "{star}{fav} {:<12} {:<32} {:>18}  {} · {}",
        listing.id,
        listing.title,
        format_price(listing.price, lang),
        listing.location.region,
        format_time_ago(listing.posted_at, Utc::now(), lang),
    );
}

fn print_product(session: &Session, listing: &Listing) {
    let lang = session.language();
    println!("{} — {}", listing.title, format_price(listing.price, lang));
    println!("{}", listing.description);
    let condition = match listing.condition {
        Some(Condition::New) => "new",
        Some(Condition::Used) => "used",
        Some(Condition::Refurbished) => "refurbished",
        None => "n/a",
    };
    println!(
        "category: {}  condition: {}  views: {}  posted: {}",
        listing.category,
        condition,
        listing.views,
        format_time_ago(listing.posted_at, Utc::now(), lang),
    );
    println!("location: {}, {}", listing.location.region, listing.location.city);
    println!("photos: {}", listing.images.len());
    // seller panel is omitted when the user record is absent
    if let Some(seller) = session.seller_of(listing) {
        let badge = if seller.myid_verified { " [MYiD verified]" } else { "" };
        println!("seller: {}{} · {}", seller.name, badge, seller.phone);
    }
}

fn print_conversation_line(session: &Session, conv: &Conversation<'_>) {
    let viewer = session.current_user().map(|u| u.id.clone()).unwrap_or_default();
    let peer_id = conv.peer_id(&viewer);
    let peer = session.user(peer_id).map(|u| u.name.as_str()).unwrap_or(peer_id);
    let dot = if conv.unread(&viewer) { "●" } else { " " };
    let about = conv
        .listing_id()
        .and_then(|id| session.listings().get(id))
        .map(|l| format!(" · {}", l.title))
        .unwrap_or_default();
    println!("{dot} {:<20} {:<24} {}{about}", conv.chat_id, peer, conv.last_message().text);
}
