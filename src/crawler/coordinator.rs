//! Crawl coordination
//!
//! Drives the nested iteration over the hierarchy (years × leagues → clubs →
//! players): every unit of work is addressed by a [`WorkKey`], checked
//! against its checkpoint store before any network traffic, fetched through
//! the retry policy, transformed, persisted, and only then marked complete.
//! Failures that survive the retry policy are appended to the error log and
//! the key is left incomplete for a future run; the loop itself never aborts.

use crate::config::{Config, LeagueEntry};
use crate::crawler::extract;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pacing::Pacer;
use crate::crawler::retry::RetryPolicy;
use crate::identity;
use crate::model::{parse_date_text, PlayerRecord, Position, RawTransferEvent, WorkKey};
use crate::reduce::{reduce_transfers, Rejection};
use crate::status::StatusHandle;
use crate::storage::{Checkpoint, ClubsStore, ErrorLog, PlayersStore};
use crate::{Result, ScrapeError};
use chrono::NaiveDate;

/// Which part of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Stage {
    Clubs,
    Players,
    All,
}

/// Terminal outcome of processing one player URL.
#[derive(Debug)]
pub enum PlayerOutcome {
    /// A record was written (or overwritten) under this identity key.
    Recorded(String),
    /// The ledger held no professional transfers; nothing was recorded, but
    /// the key is done.
    Rejected(Rejection),
}

/// Main crawl coordinator: single worker, strictly sequential keys.
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    fetcher: F,
    retry: RetryPolicy,
    pacer: Pacer,
    clubs: ClubsStore,
    players: PlayersStore,
    errors: ErrorLog,
    status: StatusHandle,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator, loading both checkpoint documents.
    ///
    /// With `fresh` set, previously persisted checkpoints are discarded;
    /// otherwise the run resumes at the first incomplete key.
    pub fn new(config: Config, fetcher: F, status: StatusHandle, fresh: bool) -> Result<Self> {
        let mut clubs = ClubsStore::open(&config.output.clubs_path)?;
        let mut players = PlayersStore::open(&config.output.players_path)?;

        if fresh {
            tracing::info!("Starting fresh: clearing checkpoint documents");
            clubs.clear()?;
            players.clear()?;
        } else if !clubs.is_empty() || players.completed_count() > 0 {
            tracing::info!(
                "Resuming: {} league seasons and {} players already complete",
                clubs.len(),
                players.completed_count()
            );
        }

        let retry = RetryPolicy::from_config(&config.crawl);
        let pacer = Pacer::from_config(&config.crawl);
        let errors = ErrorLog::new(&config.output.error_log_path);

        Ok(Self {
            config,
            fetcher,
            retry,
            pacer,
            clubs,
            players,
            errors,
            status,
        })
    }

    /// Runs the selected stage(s) to the end of their key space.
    pub async fn run(&mut self, stage: Stage) -> Result<()> {
        match stage {
            Stage::Clubs => self.run_clubs_stage().await?,
            Stage::Players => self.run_players_stage().await?,
            Stage::All => {
                self.run_clubs_stage().await?;
                self.run_players_stage().await?;
            }
        }
        Ok(())
    }

    /// Stage one: for every year × league, collect the club URLs of that
    /// league season.
    async fn run_clubs_stage(&mut self) -> Result<()> {
        self.status.set_stage("clubs");
        let years = self.config.crawl.start_year..=self.config.crawl.end_year;
        let leagues = self.config.leagues.clone();

        for year in years {
            for league in &leagues {
                let key = WorkKey::league_season(year, &league.code);
                if self.clubs.is_complete(&key) {
                    tracing::debug!("Skipping {} (already done)", key);
                    continue;
                }
                self.status.set_last_key(&key);

                let url = league_season_url(&self.config.site.base_url, league, year);
                tracing::info!("Scraping {}: {}", key, url);

                match self.fetch_club_urls(&key, &url).await {
                    Ok(club_urls) => {
                        tracing::info!("Saved {} clubs for {}", club_urls.len(), key);
                        self.clubs.mark_complete(&key, club_urls)?;
                        self.status.set_saved(self.clubs.len() as u64);
                    }
                    Err(err) => {
                        tracing::error!("Error on {}: {}", key, err);
                        self.errors
                            .record("league-season", &url, &err.to_string(), key.as_str())?;
                    }
                }

                self.status.record_processed();
                self.pacer.pause().await;
            }
        }
        Ok(())
    }

    /// Stage two: visit every discovered club once, then every player on its
    /// squad page.
    async fn run_players_stage(&mut self) -> Result<()> {
        self.status.set_stage("players");

        let club_urls = self.clubs.club_urls();
        if club_urls.is_empty() {
            tracing::warn!("No club URLs discovered yet; run the clubs stage first");
            return Ok(());
        }
        tracing::info!("Players stage: {} clubs to visit", club_urls.len());

        for club_url in club_urls {
            let club_key = WorkKey::url(&club_url);

            let player_urls = if self.players.is_club_complete(&club_key) {
                self.players.club_player_urls(&club_key)
            } else {
                self.status.set_last_key(&club_key);
                match self.fetch_player_urls(&club_key, &club_url).await {
                    Ok(player_urls) => {
                        tracing::info!("Found {} players at {}", player_urls.len(), club_url);
                        self.players
                            .mark_club_complete(&club_key, player_urls.clone())?;
                        self.status.record_processed();
                        self.pacer.pause().await;
                        player_urls
                    }
                    Err(err) => {
                        tracing::error!("Error on club {}: {}", club_url, err);
                        self.errors
                            .record("club", &club_url, &err.to_string(), club_key.as_str())?;
                        self.status.record_processed();
                        self.pacer.pause().await;
                        continue;
                    }
                }
            };

            for player_url in player_urls {
                let key = WorkKey::url(&player_url);
                if self.players.is_complete(&key) {
                    tracing::debug!("Skipping {} (already done)", key);
                    continue;
                }
                self.status.set_last_key(&key);

                match self.process_player(&key, &player_url).await {
                    Ok(PlayerOutcome::Recorded(identity_key)) => {
                        tracing::info!("Recorded {} from {}", identity_key, player_url);
                    }
                    Ok(PlayerOutcome::Rejected(rejection)) => {
                        tracing::debug!("Rejected {}: {}", player_url, rejection);
                    }
                    Err(err) => {
                        tracing::error!("Error on player {}: {}", player_url, err);
                        self.errors
                            .record("player", &player_url, &err.to_string(), club_key.as_str())?;
                    }
                }

                self.status.record_processed();
                self.status.set_saved(self.players.player_count() as u64);
                self.pacer.pause().await;
            }
        }
        Ok(())
    }

    /// Fetches one league-season page and extracts its club URLs.
    ///
    /// An empty result after all fallback strategies is a structural failure
    /// and goes through the retry policy like a network error.
    async fn fetch_club_urls(&self, key: &WorkKey, url: &str) -> Result<Vec<String>> {
        let fetcher = &self.fetcher;
        let base_url = &self.config.site.base_url;

        self.retry
            .execute(key.as_str(), move || async move {
                let html = fetcher.fetch(url).await?;
                let links = extract::extract_links(&html, base_url, extract::CLUB_LINK_STRATEGIES);
                if links.is_empty() {
                    return Err(ScrapeError::Extraction {
                        url: url.to_string(),
                        what: "club links",
                    });
                }
                Ok(links)
            })
            .await
    }

    /// Fetches one squad page and extracts its player profile URLs.
    async fn fetch_player_urls(&self, key: &WorkKey, url: &str) -> Result<Vec<String>> {
        let fetcher = &self.fetcher;
        let base_url = &self.config.site.base_url;

        self.retry
            .execute(key.as_str(), move || async move {
                let html = fetcher.fetch(url).await?;
                let links =
                    extract::extract_links(&html, base_url, extract::PLAYER_LINK_STRATEGIES);
                if links.is_empty() {
                    return Err(ScrapeError::Extraction {
                        url: url.to_string(),
                        what: "player links",
                    });
                }
                Ok(links)
            })
            .await
    }

    /// Processes one player URL to a terminal outcome.
    ///
    /// A rejection marks the key complete with no record — youth-only careers
    /// are out of scope by design, and refetching them would never change
    /// that. Only fetch/extraction failures leave the key incomplete.
    async fn process_player(&mut self, key: &WorkKey, url: &str) -> Result<PlayerOutcome> {
        let (profile, date_of_birth, transfers) = self.fetch_player_page(key, url).await?;

        match reduce_transfers(&transfers) {
            Err(rejection) => {
                self.players.mark_complete(key, None)?;
                Ok(PlayerOutcome::Rejected(rejection))
            }
            Ok(seasons) => {
                let (first_name, last_name) = identity::split_name(&profile.name);
                let country_code = identity::country_code_or_fallback(&profile.nationality);
                let identity_key = identity::identity_key(&last_name, date_of_birth, &country_code);

                let record = PlayerRecord {
                    identity_key: identity_key.clone(),
                    first_name,
                    last_name,
                    position: Position::from_text(&profile.position_text),
                    country_code,
                    date_of_birth,
                    seasons,
                };

                self.players.upsert_player(record);
                self.players.mark_complete(key, Some(identity_key.clone()))?;
                Ok(PlayerOutcome::Recorded(identity_key))
            }
        }
    }

    /// Fetches a player page and extracts profile plus transfer ledger.
    ///
    /// Profile fields the record cannot exist without (name, parseable date
    /// of birth) are validated inside the retried operation, so a partially
    /// rendered page gets the same second chance as a network failure.
    async fn fetch_player_page(
        &self,
        key: &WorkKey,
        url: &str,
    ) -> Result<(extract::RawProfile, NaiveDate, Vec<RawTransferEvent>)> {
        let fetcher = &self.fetcher;

        self.retry
            .execute(key.as_str(), move || async move {
                let html = fetcher.fetch(url).await?;

                let profile =
                    extract::extract_profile(&html).ok_or_else(|| ScrapeError::Extraction {
                        url: url.to_string(),
                        what: "player name",
                    })?;

                // Birth dates render with an age suffix: "Jun 24, 1987 (34)".
                let birth_text = profile
                    .birth_date_text
                    .split('(')
                    .next()
                    .unwrap_or("")
                    .trim();
                let date_of_birth =
                    parse_date_text(birth_text).ok_or_else(|| ScrapeError::Extraction {
                        url: url.to_string(),
                        what: "date of birth",
                    })?;

                let transfers = extract::extract_transfers(&html);
                Ok((profile, date_of_birth, transfers))
            })
            .await
    }
}

/// URL of one league season's overview page.
fn league_season_url(base_url: &str, league: &LeagueEntry, year: i32) -> String {
    format!(
        "{}/{}/startseite/wettbewerb/{}/saison_id/{}",
        base_url.trim_end_matches('/'),
        league.slug,
        league.code,
        year
    )
}
