//! Submission endpoints
//!
//! `submit` backs `POST /player` and `random_players` backs
//! `GET /players/random`. Transport is left to the embedding server; these
//! functions map a parsed request to a status code and a JSON body.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::{Value, json};

use crate::rate::{RateDecision, RateLimiter};
use crate::store::{PlayerStore, StoreError};
use crate::submission::validate_submission;

/// Records returned by one `random_players` call
pub const SAMPLE_SIZE: usize = 10;

const OK: u16 = 200;
const CREATED: u16 = 201;
const BAD_REQUEST: u16 = 400;
const TOO_MANY_REQUESTS: u16 = 429;
const INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    fn storage_failure(err: StoreError) -> Self {
        log::error!("player store failure: {}", err);
        Self::error(INTERNAL_ERROR, err.to_string())
    }
}

/// Submission service over an explicitly supplied store
#[derive(Debug)]
pub struct PlayerService<S: PlayerStore> {
    store: S,
    limiter: RateLimiter,
}

impl<S: PlayerStore> PlayerService<S> {
    pub fn new(store: S, limiter: RateLimiter) -> Self {
        Self { store, limiter }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle a submission from `client`.
    ///
    /// The quota is charged before the body is validated, so malformed
    /// requests count against it too.
    pub fn submit(&mut self, client: &str, body: &Value, now: DateTime<Utc>) -> ApiResponse {
        match self.limiter.check(&mut self.store, client, now) {
            Ok(RateDecision::Allowed { .. }) => {}
            Ok(RateDecision::Limited { .. }) => {
                let max = self.limiter.config().max_requests;
                return ApiResponse::error(
                    TOO_MANY_REQUESTS,
                    format!("Rate limit exceeded - {} submissions per day", max),
                );
            }
            Err(err) => return ApiResponse::storage_failure(err),
        }

        let record = match validate_submission(body) {
            Ok(record) => record,
            Err(err) => return ApiResponse::error(BAD_REQUEST, err.to_string()),
        };

        match self.store.insert_player(record) {
            Ok(()) => {
                log::debug!("stored submission from {}", client);
                ApiResponse {
                    status: CREATED,
                    body: json!({ "message": "Player created successfully" }),
                }
            }
            Err(err) => ApiResponse::storage_failure(err),
        }
    }

    /// Up to [`SAMPLE_SIZE`] random submissions, without store identifiers
    pub fn random_players<R: Rng + ?Sized>(&self, rng: &mut R) -> ApiResponse {
        let players = match self.store.sample_players(SAMPLE_SIZE, rng) {
            Ok(players) => players,
            Err(err) => return ApiResponse::storage_failure(err),
        };
        match serde_json::to_value(players) {
            Ok(body) => ApiResponse { status: OK, body },
            Err(err) => ApiResponse::storage_failure(err.into()),
        }
    }

    /// Close the store and hand it back
    pub fn shutdown(mut self) -> Result<S, StoreError> {
        self.store.close()?;
        Ok(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{TimeDelta, TimeZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 12, 0, 0).unwrap()
    }

    fn body() -> Value {
        json!({
            "picture": "iVBORw0...",
            "path": [{"x": 1, "y": 2}],
            "sound": "UklGRlw...",
        })
    }

    fn service() -> PlayerService<MemoryStore> {
        PlayerService::new(MemoryStore::new(), RateLimiter::default())
    }

    #[test]
    fn test_submit_created() {
        let mut svc = service();
        let resp = svc.submit("10.0.0.1", &body(), now());
        assert_eq!(resp.status, 201);
        assert_eq!(resp.body, json!({"message": "Player created successfully"}));
        assert_eq!(svc.store().player_count(), 1);
    }

    #[test]
    fn test_submit_bad_request() {
        let mut svc = service();
        let resp = svc.submit("10.0.0.1", &json!({"picture": "p"}), now());
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body, json!({"error": "Missing required fields"}));
        assert_eq!(svc.store().player_count(), 0);
    }

    #[test]
    fn test_submit_quota() {
        let mut svc = service();
        // A rejected body still uses up quota
        assert_eq!(svc.submit("a", &json!({}), now()).status, 400);
        assert_eq!(svc.submit("a", &body(), now()).status, 201);

        let resp = svc.submit("a", &body(), now());
        assert_eq!(resp.status, 429);
        assert_eq!(
            resp.body,
            json!({"error": "Rate limit exceeded - 2 submissions per day"})
        );
        assert_eq!(svc.submit("b", &body(), now()).status, 201);
        assert_eq!(
            svc.submit("a", &body(), now() + TimeDelta::days(1)).status,
            201
        );
    }

    #[test]
    fn test_random_players() {
        let mut svc = PlayerService::new(
            MemoryStore::new(),
            RateLimiter::new(crate::RateLimitConfig {
                max_requests: 100,
                ..Default::default()
            }),
        );
        for _ in 0..12 {
            assert_eq!(svc.submit("a", &body(), now()).status, 201);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let resp = svc.random_players(&mut rng);
        assert_eq!(resp.status, 200);
        let players = resp.body.as_array().unwrap();
        assert_eq!(players.len(), SAMPLE_SIZE);
        for player in players {
            assert_eq!(player, &body());
        }
    }

    #[test]
    fn test_storage_failure_maps_to_500() {
        let mut store = MemoryStore::new();
        store.close().unwrap();
        let mut svc = PlayerService::new(store, RateLimiter::default());

        let resp = svc.submit("a", &body(), now());
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, json!({"error": "Store is closed"}));

        let resp = svc.random_players(&mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(resp.status, 500);
    }

    #[test]
    fn test_shutdown_closes_store() {
        let svc = service();
        let mut store = svc.shutdown().unwrap();
        assert!(store.insert_player(validate_submission(&body()).unwrap()).is_err());
    }
}
