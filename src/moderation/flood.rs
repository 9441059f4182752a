//! Sliding-window flood guard.
//!
//! Tracks, per (chat, user), the timestamps of recent messages inside the
//! trailing window. State is process-local and lost on restart; when several
//! bot processes run, each one counts only the messages it received.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

use super::ids::{ChatRef, UserRef};
use super::settings::{clamp_window, FLOOD_WINDOW_MAX};

/// How often idle entries are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Flood tracker shared by all handlers.
#[derive(Clone, Default)]
pub struct FloodGuard {
    data: Arc<DashMap<(ChatRef, UserRef), VecDeque<Instant>>>,
}

impl FloodGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message now. Returns `true` when the limit is exceeded.
    pub fn check(&self, chat: ChatRef, user: UserRef, window_secs: u32, limit: u32) -> bool {
        self.check_at(chat, user, window_secs, limit, Instant::now())
    }

    /// Record a message at `now`. Returns `true` when the limit is exceeded.
    ///
    /// There is no reset on trigger: every further message inside the same
    /// window triggers again until old entries age out.
    pub fn check_at(
        &self,
        chat: ChatRef,
        user: UserRef,
        window_secs: u32,
        limit: u32,
        now: Instant,
    ) -> bool {
        let window = Duration::from_secs(u64::from(clamp_window(i64::from(window_secs))));

        // The entry guard keeps the shard locked across evict + append.
        let mut times = self.data.entry((chat, user)).or_default();

        while let Some(&oldest) = times.front() {
            if now.saturating_duration_since(oldest) > window {
                times.pop_front();
            } else {
                break;
            }
        }

        times.push_back(now);
        let exceeded = times.len() > limit as usize;

        if exceeded {
            debug!(
                "User {} over flood limit in chat {} ({} > {} in {:?})",
                user,
                chat,
                times.len(),
                limit,
                window
            );
        }

        exceeded
    }

    /// Drop entries whose newest message is older than the largest window.
    /// Returns how many entries were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let max_window = Duration::from_secs(u64::from(FLOOD_WINDOW_MAX));
        let before = self.data.len();
        self.data.retain(|_, times| {
            times
                .back()
                .is_some_and(|&newest| now.saturating_duration_since(newest) <= max_window)
        });
        before.saturating_sub(self.data.len())
    }

    /// Number of tracked (chat, user) pairs.
    pub fn tracked(&self) -> usize {
        self.data.len()
    }

    /// Sweep idle entries periodically for the lifetime of the process.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let guard = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let removed = guard.sweep(Instant::now());
                if removed > 0 {
                    debug!("Flood sweep removed {} idle entries, {} tracked", removed, guard.tracked());
                }
            }
        })
    }
}
