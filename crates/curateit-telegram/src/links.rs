//! Link capture and gem search workflows.

use curateit_api::types::NewGem;
use curateit_api::{OpenGraph, SearchResults, fetch_open_graph};
use teloxide::prelude::*;
use tracing::{debug, info, warn};
use url::Url;

use crate::handler::BotState;

/// The curation service's own domain. Links into it are never saved.
const SELF_DOMAIN: &str = "curateit.com";

/// Whether a link points back into the curation service itself
/// (`curateit.com` or any subdomain, e.g. `app.curateit.com`).
pub(crate) fn is_self_referential(link: &str) -> bool {
    let Ok(url) = Url::parse(link) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    host == SELF_DOMAIN || host.ends_with(&format!(".{SELF_DOMAIN}"))
}

/// Save a link as a gem in the user's collection.
///
/// Self-referential links are a silent no-op. Metadata extraction and
/// collection lookup failures degrade to an unenriched save; only a
/// missing credential or a failed gem POST surface to the user.
pub(crate) async fn save_link(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    link: &str,
) -> anyhow::Result<()> {
    if is_self_referential(link) {
        debug!(link, "ignoring self-referential link");
        return Ok(());
    }

    let Some(credential) = state.sessions.credential(chat_id).await else {
        let _ = bot.send_message(chat_id, "Invalid User, Please relogin").await;
        return Ok(());
    };

    let og = match fetch_open_graph(state.api.http(), link).await {
        Ok(og) => og,
        Err(e) => {
            warn!(error = %e, link, "Open Graph fetch failed, saving without metadata");
            OpenGraph::default()
        },
    };

    let collection_id = match state.config.collection_id {
        Some(id) => Some(id),
        None => match state.api.first_collection_id(&credential.jwt).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "collection lookup failed, saving unfiled");
                None
            },
        },
    };

    let gem = NewGem {
        title: og.title,
        description: og.description,
        url: link.to_string(),
        cover: og.image,
        author: credential.user_id,
        collection_id,
    };

    match state.api.create_gem(&credential.jwt, &gem).await {
        Ok(()) => {
            info!(link, "saved link for chat {chat_id}");
            let _ = bot.send_message(chat_id, "Successfully saved the link").await;
        },
        Err(e) => {
            warn!(error = %e, link, "failed to save link for chat {chat_id}");
            let _ = bot
                .send_message(chat_id, "Could not save the link, please try again")
                .await;
        },
    }

    Ok(())
}

/// Search saved gems by title and report the first hit.
pub(crate) async fn search_gem(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    query: &str,
) -> anyhow::Result<()> {
    let Some(credential) = state.sessions.credential(chat_id).await else {
        let _ = bot.send_message(chat_id, "Invalid User, Please relogin").await;
        return Ok(());
    };

    match state.api.search_gems(&credential.jwt, query).await {
        Ok(results) => {
            let _ = bot.send_message(chat_id, search_reply(&results)).await;
        },
        Err(e) => {
            warn!(error = %e, query, "gem search failed for chat {chat_id}");
            let _ = bot
                .send_message(chat_id, "Could not search right now, please try again")
                .await;
        },
    }

    Ok(())
}

/// Message reporting search results: the first hit, or "No Gem Found".
pub(crate) fn search_reply(results: &SearchResults) -> String {
    match results.final_res.first() {
        Some(hit) if results.total_count > 0 => {
            format!("Found a Gem called {}, url : {}", hit.title, hit.url)
        },
        _ => "No Gem Found".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use curateit_api::types::GemHit;

    use super::*;

    #[test]
    fn curateit_hosts_are_self_referential() {
        assert!(is_self_referential("https://curateit.com/some/page"));
        assert!(is_self_referential("https://app.curateit.com/u/me"));
        assert!(is_self_referential("http://api.curateit.com/api/gems"));
    }

    #[test]
    fn other_hosts_are_not_self_referential() {
        assert!(!is_self_referential("https://example.com"));
        assert!(!is_self_referential("https://notcurateit.com/page"));
        assert!(!is_self_referential("https://curateit.com.evil.org"));
    }

    #[test]
    fn unparseable_links_are_not_self_referential() {
        assert!(!is_self_referential("not a url"));
        assert!(!is_self_referential(""));
    }

    #[test]
    fn search_reply_reports_first_hit() {
        let results = SearchResults {
            total_count: 2,
            final_res: vec![
                GemHit {
                    title: "X".to_string(),
                    url: "http://y".to_string(),
                },
                GemHit {
                    title: "Other".to_string(),
                    url: "http://z".to_string(),
                },
            ],
        };
        let reply = search_reply(&results);
        assert!(reply.contains("X"));
        assert!(reply.contains("http://y"));
        assert!(!reply.contains("Other"));
    }

    #[test]
    fn search_reply_empty_results() {
        let results = SearchResults {
            total_count: 0,
            final_res: vec![],
        };
        assert_eq!(search_reply(&results), "No Gem Found");
    }

    #[test]
    fn search_reply_zero_count_with_entries_is_not_found() {
        // totalCount is authoritative; a page with entries but zero count
        // is treated as empty.
        let results = SearchResults {
            total_count: 0,
            final_res: vec![GemHit {
                title: "stale".to_string(),
                url: "http://stale".to_string(),
            }],
        };
        assert_eq!(search_reply(&results), "No Gem Found");
    }
}
