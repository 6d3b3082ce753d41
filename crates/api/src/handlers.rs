//! Route handlers: parameter resolution, orchestration, response shaping.
//!
//! Card endpoints always answer with an image, even on failure, so README
//! embeds never show a broken icon. The profile endpoint defaults to JSON.

use crate::error::ErrorKind;
use crate::http::{json_response, no_store_json, svg_response, CachePolicy};
use crate::orchestrator::{self, Outcome};
use crate::params::{
    resolve_border, resolve_color, resolve_details, resolve_flag, resolve_theme, CardQuery,
};
use crate::render::{
    activity_bins, placeholder_svg, render_classic_board, render_maturity_card,
    render_profile_card, CardKind, ClassicBoard, MaturityCard, ProfileCard,
};
use crate::SharedState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use chrono::Utc;
use repocards_store::Snapshot;
use serde_json::json;
use tracing::debug;

const CARD_ACCENT: &str = "#22C55E";
const PROFILE_ACCENT: &str = "#6366F1";
const BG_LIGHT: &str = "#FFFFFF";
const BG_DARK: &str = "#0B1220";

/// First address in `x-forwarded-for`, which is what the edge proxy sets.
/// Absent header means a direct local call.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "0.0.0.0".to_string())
}

fn maturity_score(snapshot: &Snapshot) -> u8 {
    snapshot.unique.maturity.as_ref().map_or(0, |m| m.score)
}

fn updated_date(snapshot: &Snapshot) -> String {
    snapshot.generated_at.format("%Y-%m-%d").to_string()
}

pub async fn health(State(state): State<SharedState>) -> Response {
    no_store_json(
        StatusCode::OK,
        json!({
            "ok": true,
            "version": state.config.schema_version,
            "now": Utc::now().to_rfc3339(),
        }),
    )
}

pub async fn classic_card(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<CardQuery>,
    headers: HeaderMap,
) -> Response {
    let ip = client_ip(&headers);
    match orchestrator::run(&state, &username, &ip).await {
        Outcome::Served { snapshot, rate, .. } => {
            let theme = resolve_theme(query.theme.as_deref());
            let bg_default = match theme {
                crate::params::Theme::Dark => BG_DARK,
                crate::params::Theme::Light => BG_LIGHT,
            };
            let svg = render_classic_board(&ClassicBoard {
                username: &username,
                repo_count: snapshot.repo_count,
                stars: snapshot.aggregates.stars_total,
                forks: snapshot.aggregates.forks_total,
                maturity_score: maturity_score(&snapshot),
                top_languages: &snapshot.aggregates.languages,
                activity: activity_bins(&snapshot.repos),
                updated_at: &updated_date(&snapshot),
                theme,
                accent: &resolve_color(query.accent.as_deref(), CARD_ACCENT),
                bg: &resolve_color(query.bg.as_deref(), bg_default),
                border: resolve_border(query.border.as_deref()),
            });
            svg_response(StatusCode::OK, CachePolicy::FRESH, Some(rate), svg)
        }
        other => card_error(CardKind::Classic, &username, outcome_error(&other)),
    }
}

pub async fn maturity_card(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<CardQuery>,
    headers: HeaderMap,
) -> Response {
    let ip = client_ip(&headers);
    match orchestrator::run(&state, &username, &ip).await {
        Outcome::Served { snapshot, rate, .. } => {
            let theme = resolve_theme(query.theme.as_deref());
            let bg_default = match theme {
                crate::params::Theme::Dark => BG_DARK,
                crate::params::Theme::Light => BG_LIGHT,
            };
            let maturity = snapshot.unique.maturity.clone().unwrap_or_else(|| {
                // Upgraded snapshots always carry a maturity report; this
                // branch only renders for an all-defaults empty one.
                repocards_store::MaturityReport {
                    version: state.config.schema_version.clone(),
                    score: 0,
                    subscores: repocards_store::MaturitySubscores {
                        docs: 0,
                        maintenance: 0,
                        repo_hygiene: 0,
                    },
                }
            });
            let svg = render_maturity_card(&MaturityCard {
                username: &username,
                score: maturity.score,
                subscores: maturity.subscores,
                updated_at: &updated_date(&snapshot),
                theme,
                accent: &resolve_color(query.accent.as_deref(), CARD_ACCENT),
                bg: &resolve_color(query.bg.as_deref(), bg_default),
                border: resolve_border(query.border.as_deref()),
                details: resolve_details(query.details.as_deref()),
            });
            svg_response(StatusCode::OK, CachePolicy::FRESH, Some(rate), svg)
        }
        other => card_error(CardKind::Maturity, &username, outcome_error(&other)),
    }
}

pub async fn profile(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<CardQuery>,
    headers: HeaderMap,
) -> Response {
    let as_svg = query.format.as_deref() == Some("svg");

    let ip = client_ip(&headers);
    match orchestrator::run(&state, &username, &ip).await {
        Outcome::Served {
            snapshot,
            from_cache,
            rate,
        } => {
            debug!(username = username, from_cache = from_cache, "profile served");
            if as_svg {
                let theme = resolve_theme(query.theme.as_deref());
                let bg_default = match theme {
                    crate::params::Theme::Dark => BG_DARK,
                    crate::params::Theme::Light => BG_LIGHT,
                };
                let svg = render_profile_card(&ProfileCard {
                    username: &username,
                    repo_count: snapshot.repo_count,
                    stars: snapshot.aggregates.stars_total,
                    forks: snapshot.aggregates.forks_total,
                    top_languages: &snapshot.aggregates.languages,
                    archived_count: snapshot.aggregates.archived_count,
                    forked_count: snapshot.aggregates.forked_count,
                    maturity_score: maturity_score(&snapshot),
                    updated_at: &updated_date(&snapshot),
                    theme,
                    accent: &resolve_color(query.accent.as_deref(), PROFILE_ACCENT),
                    bg: &resolve_color(query.bg.as_deref(), bg_default),
                    border: resolve_border(query.border.as_deref()),
                });
                svg_response(StatusCode::OK, CachePolicy::FRESH, Some(rate), svg)
            } else {
                let body = profile_body(
                    &snapshot,
                    resolve_flag(query.include_repos.as_deref()),
                    resolve_flag(query.include_debug.as_deref()),
                );
                json_response(StatusCode::OK, CachePolicy::JSON_FRESH, Some(rate), body)
            }
        }
        other => {
            let kind = outcome_error(&other);
            if as_svg {
                card_error(CardKind::Profile, &username, kind)
            } else {
                json_error(kind)
            }
        }
    }
}

/// Snapshot serialization for the profile endpoint. The full repo list and
/// raw debug block are large and opt-in; the default body stays embed-sized.
fn profile_body(snapshot: &Snapshot, include_repos: bool, include_debug: bool) -> serde_json::Value {
    let mut body = match serde_json::to_value(snapshot) {
        Ok(v) => v,
        Err(_) => return json!({}),
    };
    if let Some(map) = body.as_object_mut() {
        if !include_repos {
            map.insert("repos".to_string(), json!([]));
        }
        if !include_debug {
            map.insert(
                "debug".to_string(),
                json!({ "githubApiCalls": snapshot.debug.github_api_calls }),
            );
        }
        map.insert("updatedAt".to_string(), json!(updated_date(snapshot)));
    }
    body
}

fn outcome_error(outcome: &Outcome) -> ErrorKind {
    match outcome {
        Outcome::Served { .. } => ErrorKind::UpstreamError,
        Outcome::BadInput => ErrorKind::BadInput,
        Outcome::Analyzing => ErrorKind::Analyzing,
        Outcome::RateLimited => ErrorKind::RateLimited,
        Outcome::NotFound => ErrorKind::NotFound,
        Outcome::UpstreamError => ErrorKind::UpstreamError,
    }
}

fn card_error(kind: CardKind, username: &str, error: ErrorKind) -> Response {
    svg_response(
        error.status(),
        error.cache(),
        None,
        placeholder_svg(kind, username, error.message()),
    )
}

fn json_error(error: ErrorKind) -> Response {
    json_response(
        error.status(),
        error.cache(),
        None,
        json!({ "error": error.tag(), "message": error.message() }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;
    use repocards_store::{AggregateReport, DebugInfo, UniqueReports};

    #[test]
    fn client_ip_takes_the_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn client_ip_defaults_when_header_is_missing_or_empty() {
        assert_eq!(client_ip(&HeaderMap::new()), "0.0.0.0");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_ip(&headers), "0.0.0.0");
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            version: "v1".to_string(),
            username: "octocat".to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 8, 25, 12, 30, 0).unwrap(),
            ttl_seconds: 43_200,
            repo_count: 1,
            repos: vec![serde_json::from_value(json!({
                "id": 1,
                "name": "r",
                "fullName": "octocat/r",
                "htmlUrl": "https://github.com/octocat/r",
                "isFork": false,
                "isArchived": false,
                "isTemplate": false,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2026-08-01T00:00:00Z",
                "pushedAt": "2026-08-20T00:00:00Z",
                "topics": [],
                "stargazersCount": 5,
                "forksCount": 1,
                "openIssuesCount": 0,
                "sizeKB": 10,
                "defaultBranch": "main",
                "hasWiki": false,
                "hasPages": false,
                "activity": { "daysSincePush": 5, "ageDays": 900 }
            }))
            .unwrap()],
            aggregates: AggregateReport::default(),
            unique: UniqueReports::default(),
            debug: DebugInfo {
                github_api_calls: 2,
                rate_limit: None,
            },
        }
    }

    #[test]
    fn profile_body_hides_repos_and_debug_by_default() {
        let body = profile_body(&snapshot(), false, false);
        assert_eq!(body["repos"], json!([]));
        assert_eq!(body["debug"], json!({ "githubApiCalls": 2 }));
        assert_eq!(body["updatedAt"], json!("2026-08-25"));
        assert_eq!(body["repoCount"], json!(1));
    }

    #[test]
    fn profile_body_opt_in_flags_expose_full_detail() {
        let body = profile_body(&snapshot(), true, true);
        assert_eq!(body["repos"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["debug"]["githubApiCalls"], json!(2));
    }
}
