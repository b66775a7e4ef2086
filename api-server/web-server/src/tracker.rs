// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Anonymous usage tracking backed by a JSON file

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Mutex, PoisonError},
};

use chrono::{Duration, NaiveDateTime, Utc};
use logging::log;
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub const ACTIVE_WINDOW_MINUTES: i64 = 5;
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    PageVisit,
    ScriptExplained,
}

/// Stored event. Fields are kept as plain strings so unexpected file contents do not prevent
/// reading the rest of the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub timestamp: String,
}

impl TrackingEvent {
    fn is(&self, event_type: EventType) -> bool {
        self.event_type == event_type.to_string()
    }

    fn time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.timestamp.trim_end_matches('Z'), TIMESTAMP_FORMAT).ok()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub lifetime_views: usize,
    pub total_scripts_explained: usize,
    pub current_active_users: usize,
}

/// Event as exposed publicly, without the session id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub event_type: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub recent_events: Vec<ActivityEntry>,
}

/// Usage tracker. File access is serialized by an internal lock.
#[derive(Debug)]
pub struct UsageTracker {
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl UsageTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lock: Mutex::new(()),
        }
    }

    /// Tracker that records nothing and reports empty statistics.
    pub fn disabled() -> Self {
        Self {
            path: None,
            lock: Mutex::new(()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Record an event. Returns false if the event is rejected or tracking is disabled.
    pub fn add_event(&self, session_id: &str, event_type: &str) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        let Ok(event_type) = EventType::from_str(event_type) else {
            return false;
        };
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return false;
        }

        let event = TrackingEvent {
            session_id: session_id.to_owned(),
            event_type: event_type.to_string(),
            timestamp: Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string(),
        };

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut events = load_events(path);
        events.push(event);
        save_events(path, &events);
        true
    }

    pub fn events(&self) -> Vec<TrackingEvent> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        load_events(path)
    }

    pub fn stats(&self) -> Stats {
        stats_at(&self.events(), Utc::now().naive_utc())
    }

    pub fn recent_activity(&self, limit: usize) -> RecentActivity {
        let mut events = self.events();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        RecentActivity {
            recent_events: events
                .into_iter()
                .take(limit)
                .map(|e| ActivityEntry {
                    event_type: e.event_type,
                    timestamp: e.timestamp,
                })
                .collect(),
        }
    }
}

fn stats_at(events: &[TrackingEvent], now: NaiveDateTime) -> Stats {
    let active_since = now - Duration::minutes(ACTIVE_WINDOW_MINUTES);
    let active_sessions = events
        .iter()
        .filter(|e| e.time().is_some_and(|t| t > active_since))
        .map(|e| e.session_id.as_str())
        .collect::<BTreeSet<_>>();

    Stats {
        lifetime_views: events.iter().filter(|e| e.is(EventType::PageVisit)).count(),
        total_scripts_explained: events.iter().filter(|e| e.is(EventType::ScriptExplained)).count(),
        current_active_users: active_sessions.len(),
    }
}

/// Missing, empty or malformed files read as an empty log.
fn load_events(path: &Path) -> Vec<TrackingEvent> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };
    if content.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed usage log {}: {e}", path.display());
        Vec::new()
    })
}

fn save_events(path: &Path, events: &[TrackingEvent]) {
    let result = serde_json::to_string_pretty(events)
        .map_err(std::io::Error::from)
        .and_then(|json| std::fs::write(path, json));
    if let Err(e) = result {
        log::error!("Failed to write usage log {}: {e}", path.display());
    }
}
