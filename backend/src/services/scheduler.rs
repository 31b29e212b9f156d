//! Alert scheduling service
//!
//! Runs the two polling tasks behind prayer and rain alerts:
//! - A 60-second poll that fires when Maghrib is exactly the configured
//!   lead away
//! - A 5-minute poll that fires while it is raining, rate limited by a
//!   one-hour cooldown
//!
//! At most one session is active at a time; starting a new session cancels
//! the previous one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

use crate::services::location::LocationService;
use crate::services::notification::NotificationSink;
use crate::services::prayer::{today_readable, PrayerTimesService};
use crate::services::settings::SettingsStore;
use crate::services::weather::WeatherService;
use shared::models::{minutes_until, AlertSettings, PrayerSchedule, WeatherSnapshot};

/// Cadence of the prayer-proximity poll
const PRAYER_POLL_SECS: u64 = 60;

/// Cadence of the rain poll
const RAIN_POLL_SECS: u64 = 300;

/// Minimum gap between two rain notifications
const RAIN_COOLDOWN_MS: i64 = 3_600_000;

const PRAYER_ALERT_TITLE: &str = "Maghrib Prayer Alert";
const RAIN_ALERT_TITLE: &str = "Rain Alert - Time for Duʿā";
const RAIN_ALERT_BODY: &str = "It's raining! A good time to make dua.";

// ============================================================================
// Scheduler Handle
// ============================================================================

/// Handle to one scheduler session
///
/// Cloning shares the session; stopping through any clone cancels both
/// polling tasks.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    id: Uuid,
    city: String,
    maghrib: String,
    started_at: DateTime<Utc>,
    prayer_task: JoinHandle<()>,
    rain_task: JoinHandle<()>,
    stopped: AtomicBool,
}

impl SchedulerHandle {
    fn new(
        id: Uuid,
        city: String,
        maghrib: String,
        prayer_task: JoinHandle<()>,
        rain_task: JoinHandle<()>,
    ) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id,
                city,
                maghrib,
                started_at: Utc::now(),
                prayer_task,
                rain_task,
                stopped: AtomicBool::new(false),
            }),
        }
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// City the session was started for, resolved once at start
    pub fn city(&self) -> &str {
        &self.inner.city
    }

    /// Maghrib time of the schedule the session started with
    pub fn maghrib(&self) -> &str {
        &self.inner.maghrib
    }

    /// When the session was started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }

    /// Whether the session's polling tasks are still scheduled
    pub fn is_active(&self) -> bool {
        !self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Cancel both polling tasks. Safe to call more than once.
    pub fn stop(&self) {
        if !self.inner.stopped.swap(true, Ordering::SeqCst) {
            self.inner.prayer_task.abort();
            self.inner.rain_task.abort();
        }
    }
}

// ============================================================================
// Alert Scheduler
// ============================================================================

/// Owns the active scheduler session and spawns its polling tasks
#[derive(Clone)]
pub struct AlertScheduler {
    store: SettingsStore,
    location: LocationService,
    prayer: PrayerTimesService,
    weather: WeatherService,
    sink: Arc<dyn NotificationSink>,
    active: Arc<Mutex<Option<SchedulerHandle>>>,
}

impl AlertScheduler {
    /// Create a new AlertScheduler
    pub fn new(
        store: SettingsStore,
        location: LocationService,
        prayer: PrayerTimesService,
        weather: WeatherService,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            location,
            prayer,
            weather,
            sink,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Start a session for the given coordinates, cancelling any session
    /// already running
    pub async fn start(&self, latitude: f64, longitude: f64) -> SchedulerHandle {
        // Session display info, captured once at start. Both lookups
        // degrade to fallbacks, so start itself cannot fail.
        let resolved = self.location.resolve(latitude, longitude).await;
        let schedule = self.prayer.current_schedule(latitude, longitude).await;

        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            tracing::info!("Replacing active scheduler session {}", previous.id());
            previous.stop();
        }

        let session_id = Uuid::new_v4();
        let prayer_task = tokio::spawn(run_prayer_loop(
            self.store.clone(),
            self.prayer.clone(),
            self.sink.clone(),
            latitude,
            longitude,
        ));
        let rain_task = tokio::spawn(run_rain_loop(
            self.store.clone(),
            self.weather.clone(),
            self.sink.clone(),
            latitude,
            longitude,
        ));

        let handle = SchedulerHandle::new(
            session_id,
            resolved.city,
            schedule.maghrib.clone(),
            prayer_task,
            rain_task,
        );
        *active = Some(handle.clone());
        tracing::info!(
            "Scheduler session {} started for {} ({}, {}), maghrib at {}, delivery via {:?}",
            session_id,
            handle.city(),
            latitude,
            longitude,
            handle.maghrib(),
            self.sink.channel()
        );
        handle
    }

    /// Stop the active session, returning whether one was running
    pub async fn stop(&self) -> bool {
        let mut active = self.active.lock().await;
        match active.take() {
            Some(handle) => {
                handle.stop();
                tracing::info!("Scheduler session {} stopped", handle.id());
                true
            }
            None => false,
        }
    }

    /// Handle of the active session, if any
    pub async fn status(&self) -> Option<SchedulerHandle> {
        self.active.lock().await.clone()
    }

    /// Identifier of the active session, if any
    pub async fn active_session(&self) -> Option<Uuid> {
        self.active.lock().await.as_ref().map(|h| h.id())
    }
}

// ============================================================================
// Polling Tasks
// ============================================================================

async fn run_prayer_loop(
    store: SettingsStore,
    prayer: PrayerTimesService,
    sink: Arc<dyn NotificationSink>,
    latitude: f64,
    longitude: f64,
) {
    let mut interval = time::interval(Duration::from_secs(PRAYER_POLL_SECS));
    // A delayed tick is dropped rather than replayed; an alert minute the
    // poll slept through stays missed
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cached: Option<(NaiveDate, PrayerSchedule)> = None;

    loop {
        interval.tick().await;

        let settings = store.load_settings();
        if !settings.maghrib_alert_enabled {
            continue;
        }

        let today = Local::now().date_naive();
        let schedule = match &cached {
            Some((date, schedule)) if *date == today => schedule.clone(),
            _ => match prayer.try_current_schedule(latitude, longitude).await {
                Ok(fresh) => {
                    cached = Some((today, fresh.clone()));
                    fresh
                }
                Err(e) => {
                    // Left uncached so the next tick retries the API
                    tracing::warn!("Prayer times fetch failed, using fallback schedule: {}", e);
                    PrayerSchedule::fallback(today_readable())
                }
            },
        };

        let now = Local::now().naive_local();
        if let Some(lead) = maghrib_alert_due(&schedule, &settings, now) {
            sink.show(
                PRAYER_ALERT_TITLE,
                &format!("Maghrib prayer is in {} minutes", lead),
            )
            .await;
        }
    }
}

async fn run_rain_loop(
    store: SettingsStore,
    weather: WeatherService,
    sink: Arc<dyn NotificationSink>,
    latitude: f64,
    longitude: f64,
) {
    let mut interval = time::interval(Duration::from_secs(RAIN_POLL_SECS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let settings = store.load_settings();
        if !settings.rain_alert_enabled {
            continue;
        }

        let snapshot = weather.current_snapshot(latitude, longitude).await;
        let now_ms = Utc::now().timestamp_millis();
        if rain_alert_due(&snapshot, &settings, store.last_rain_notified(), now_ms) {
            sink.show(RAIN_ALERT_TITLE, RAIN_ALERT_BODY).await;
            store.mark_rain_notified(now_ms);
        }
    }
}

// ============================================================================
// Poll Decisions
// ============================================================================

/// Whether this poll should fire the Maghrib alert
///
/// Fires on the poll where the whole-minute distance to Maghrib equals the
/// configured lead exactly. Later polls see a smaller distance, so the
/// alert cannot fire twice for one prayer.
fn maghrib_alert_due(
    schedule: &PrayerSchedule,
    settings: &AlertSettings,
    now: NaiveDateTime,
) -> Option<i64> {
    if !settings.maghrib_alert_enabled {
        return None;
    }
    let target = schedule.maghrib_time()?;
    let remaining = minutes_until(target, now);
    (remaining == i64::from(settings.alert_lead_minutes)).then_some(remaining)
}

/// Whether this poll should fire the rain alert
fn rain_alert_due(
    snapshot: &WeatherSnapshot,
    settings: &AlertSettings,
    last_notified_ms: Option<i64>,
    now_ms: i64,
) -> bool {
    if !settings.rain_alert_enabled || !snapshot.is_raining() {
        return false;
    }
    match last_notified_ms {
        Some(last) => now_ms - last >= RAIN_COOLDOWN_MS,
        None => true,
    }
}
