//! Integration tests for the crawl pipeline
//!
//! The full-crawl tests drive the real HTTP fetcher against wiremock
//! fixtures; the resume tests use a counting stub fetcher to prove that
//! completed keys never reach the page-rendering layer again.

use careermap::config::{Config, LeagueEntry};
use careermap::crawler::{Coordinator, HttpFetcher, PageFetcher, Stage};
use careermap::status::StatusHandle;
use careermap::storage::{Checkpoint, ClubsStore, PlayersStore};
use careermap::{ScrapeError, WorkKey};
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawl configuration pointed at a test server, with pacing and backoff
/// collapsed to keep the tests fast.
fn test_config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.trim_end_matches('/').to_string();
    config.crawl.start_year = 2021;
    config.crawl.end_year = 2021;
    config.crawl.retry_attempts = 2;
    config.crawl.retry_base_delay_ms = 1;
    config.crawl.retry_delay_cap_ms = 2;
    config.crawl.page_delay_min_ms = 0;
    config.crawl.page_delay_max_ms = 0;
    config.crawl.batch_size = 1_000;
    config.crawl.batch_cooldown_ms = 0;
    config.crawl.fetch_timeout_ms = 5_000;
    config.output.clubs_path = dir.join("clubs.json");
    config.output.players_path = dir.join("players.json");
    config.output.error_log_path = dir.join("errors.jsonl");
    config.leagues = vec![LeagueEntry {
        code: "GB1".to_string(),
        slug: "premier-league".to_string(),
    }];
    config
}

fn league_page() -> String {
    r#"<html><body><table class="items"><tbody>
        <tr><td class="hauptlink">
            <a class="vereinprofil_tooltip" href="/fc-test/startseite/verein/11">FC Test</a>
        </td></tr>
    </tbody></table></body></html>"#
        .to_string()
}

fn squad_page() -> String {
    r#"<html><body><table class="items"><tbody>
        <tr><td class="hauptlink"><a href="/anna-keller/profil/spieler/1">Anna Keller</a></td></tr>
        <tr><td class="hauptlink"><a href="/bob-junior/profil/spieler/2">Bob Junior</a></td></tr>
    </tbody></table></body></html>"#
        .to_string()
}

fn transfer_row(date: &str, from: &str, to: &str, fee: &str) -> String {
    format!(
        r#"<div class="tm-player-transfer-history-grid">
            <div class="tm-player-transfer-history-grid__season">-</div>
            <div class="tm-player-transfer-history-grid__date">{date}</div>
            <div class="tm-player-transfer-history-grid__old-club">{from}</div>
            <div class="tm-player-transfer-history-grid__new-club">{to}</div>
            <div class="tm-player-transfer-history-grid__fee">{fee}</div>
        </div>"#
    )
}

fn player_page(name: &str, born: &str, nationality: &str, position: &str, rows: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="data-header__headline-wrapper"><span>#9</span> {name}</h1>
        <span itemprop="birthDate">{born}</span>
        <span itemprop="nationality">{nationality}</span>
        <dd class="detail-position__position">{position}</dd>
        {rows}
        </body></html>"#
    )
}

fn anna_page() -> String {
    let rows = [
        transfer_row("07/01/2019", "Hometown U19", "Provincial FC", "-"),
        transfer_row("Aug 10, 2020", "Provincial FC", "Metro FC", "Loan fee: €1m"),
    ]
    .join("\n");
    player_page(
        "Anna Keller",
        "Mar 1, 1995 (26)",
        "Germany",
        "Centre-Forward",
        &rows,
    )
}

fn bob_page() -> String {
    let rows = transfer_row("07/01/2020", "Somewhere", "Academy Youth", "-");
    player_page("Bob Junior", "Jan 2, 2004 (17)", "England", "Centre-Back", &rows)
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/premier-league/startseite/wettbewerb/GB1/saison_id/2021",
        league_page(),
    )
    .await;
    mount_page(server, "/fc-test/startseite/verein/11", squad_page()).await;
    mount_page(server, "/anna-keller/profil/spieler/1", anna_page()).await;
    mount_page(server, "/bob-junior/profil/spieler/2", bob_page()).await;
}

#[tokio::test]
async fn test_full_crawl_both_stages() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server.uri(), dir.path());

    let fetcher = HttpFetcher::new(&config).unwrap();
    let mut coordinator =
        Coordinator::new(config.clone(), fetcher, StatusHandle::new(), false).unwrap();
    coordinator.run(Stage::All).await.unwrap();

    // Clubs stage: one completed league-season key with the discovered club.
    let clubs = ClubsStore::open(&config.output.clubs_path).unwrap();
    let season_key = WorkKey::league_season(2021, "GB1");
    assert!(clubs.is_complete(&season_key));
    assert_eq!(
        clubs.get(&season_key).unwrap(),
        &vec![format!("{}/fc-test/startseite/verein/11", server.uri())]
    );

    // Players stage: Anna recorded, Bob rejected but complete.
    let players = PlayersStore::open(&config.output.players_path).unwrap();
    assert_eq!(players.player_count(), 1);
    assert!(players.is_complete(&WorkKey::url(&format!(
        "{}/anna-keller/profil/spieler/1",
        server.uri()
    ))));
    assert!(players.is_complete(&WorkKey::url(&format!(
        "{}/bob-junior/profil/spieler/2",
        server.uri()
    ))));

    let record = players.player("keller_1995-03-01_GER").unwrap();
    assert_eq!(record.first_name, "Anna");
    assert_eq!(record.last_name, "Keller");
    assert_eq!(record.country_code, "GER");

    let seasons: Vec<(&str, Vec<&str>)> = record
        .seasons
        .iter()
        .map(|(label, clubs)| (label.as_str(), clubs.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(
        seasons,
        vec![
            ("19/20", vec!["Provincial FC"]),
            ("20/21", vec!["Metro FC", "Provincial FC"]),
        ]
    );
}

/// In-memory fetcher that counts how often each URL is requested.
#[derive(Clone)]
struct StubFetcher {
    pages: Arc<HashMap<String, String>>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl StubFetcher {
    fn new(pages: HashMap<String, String>) -> Self {
        Self {
            pages: Arc::new(pages),
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = careermap::Result<String>> + Send {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;
        let page = self.pages.get(url).cloned();
        let url = url.to_string();
        async move { page.ok_or(ScrapeError::Status { url, status: 404 }) }
    }
}

const STUB_BASE: &str = "https://stub.example.com";

fn stub_pages() -> HashMap<String, String> {
    HashMap::from([
        (
            format!("{STUB_BASE}/premier-league/startseite/wettbewerb/GB1/saison_id/2021"),
            league_page(),
        ),
        (
            format!("{STUB_BASE}/fc-test/startseite/verein/11"),
            squad_page(),
        ),
        (
            format!("{STUB_BASE}/anna-keller/profil/spieler/1"),
            anna_page(),
        ),
        (
            format!("{STUB_BASE}/bob-junior/profil/spieler/2"),
            bob_page(),
        ),
    ])
}

#[tokio::test]
async fn test_resume_never_refetches_completed_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(STUB_BASE, dir.path());
    let fetcher = StubFetcher::new(stub_pages());

    let mut first =
        Coordinator::new(config.clone(), fetcher.clone(), StatusHandle::new(), false).unwrap();
    first.run(Stage::All).await.unwrap();

    let calls_after_first = fetcher.total_calls();
    assert!(calls_after_first > 0);

    // Everything is checkpointed: a second run makes zero fetches. This
    // covers the rejected player too — rejection is terminal, not retryable.
    let mut second =
        Coordinator::new(config.clone(), fetcher.clone(), StatusHandle::new(), false).unwrap();
    second.run(Stage::All).await.unwrap();

    assert_eq!(fetcher.total_calls(), calls_after_first);
}

#[tokio::test]
async fn test_fresh_run_overwrites_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(STUB_BASE, dir.path());
    let fetcher = StubFetcher::new(stub_pages());

    let mut first =
        Coordinator::new(config.clone(), fetcher.clone(), StatusHandle::new(), false).unwrap();
    first.run(Stage::All).await.unwrap();

    // A fresh run refetches everything, but the stable identity key makes the
    // re-scrape overwrite the record rather than duplicate it.
    let mut fresh =
        Coordinator::new(config.clone(), fetcher.clone(), StatusHandle::new(), true).unwrap();
    fresh.run(Stage::All).await.unwrap();

    let players = PlayersStore::open(&config.output.players_path).unwrap();
    assert_eq!(players.player_count(), 1);
    assert!(players.player("keller_1995-03-01_GER").is_some());
}

#[tokio::test]
async fn test_failed_key_is_left_incomplete_and_logged() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(STUB_BASE, dir.path());
    config.leagues = vec![
        LeagueEntry {
            code: "XX1".to_string(),
            slug: "missing-league".to_string(),
        },
        LeagueEntry {
            code: "GB1".to_string(),
            slug: "premier-league".to_string(),
        },
    ];

    // The stub has no page for XX1, so every attempt 404s.
    let fetcher = StubFetcher::new(stub_pages());
    let mut coordinator =
        Coordinator::new(config.clone(), fetcher, StatusHandle::new(), false).unwrap();
    coordinator.run(Stage::Clubs).await.unwrap();

    let clubs = ClubsStore::open(&config.output.clubs_path).unwrap();
    assert!(!clubs.is_complete(&WorkKey::league_season(2021, "XX1")));
    assert!(clubs.is_complete(&WorkKey::league_season(2021, "GB1")));

    let log = std::fs::read_to_string(&config.output.error_log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("2021_XX1"));
    assert!(lines[0].contains("league-season"));
}

#[tokio::test]
async fn test_status_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(STUB_BASE, dir.path());

    // Only the clubs document exists yet.
    let mut clubs = ClubsStore::open(&config.output.clubs_path).unwrap();
    clubs
        .mark_complete(
            &WorkKey::league_season(2021, "GB1"),
            vec!["https://stub.example.com/fc-test/startseite/verein/11".to_string()],
        )
        .unwrap();

    let status = StatusHandle::new();
    status.set_stage("clubs");
    status.record_processed();

    let app = careermap::status::router(status, &config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = format!("http://{}", addr);

    let status_body: serde_json::Value = reqwest::get(format!("{base}/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status_body["stage"], "clubs");
    assert_eq!(status_body["processed"], 1);
    assert_eq!(status_body["clubs"]["exists"], true);
    assert_eq!(status_body["players"]["exists"], false);

    // The clubs document downloads; the players document does not exist yet.
    let clubs_download = reqwest::get(format!("{base}/download?doc=clubs")).await.unwrap();
    assert_eq!(clubs_download.status(), 200);
    assert!(clubs_download.text().await.unwrap().contains("2021_GB1"));

    let players_download = reqwest::get(format!("{base}/download")).await.unwrap();
    assert_eq!(players_download.status(), 404);

    let errors = reqwest::get(format!("{base}/errors")).await.unwrap();
    assert_eq!(errors.status(), 404);
}
