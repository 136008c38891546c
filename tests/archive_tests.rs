use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use launch_archive::archive::calendar::{grid_bounds, project_calendar, VISIBLE_PER_DAY};
use launch_archive::archive::filter::filter;
use launch_archive::archive::ledger::project_ledger;
use launch_archive::archive::timeline::project_timeline;
use launch_archive::archive::{
    paginate, project, ArchiveError, ArchiveEvent, ArchiveService, ArchiveView, DateIndex,
    GridTarget, ProjectDraft, ProjectSource, ProjectStore, Side, SourceError, StoreError,
    UpsertOutcome, ValidationError, ViewMode, ViewState,
};
use launch_archive::auth::gate::{secret_matches, AdminGate, AdminSession, GateError, GateState};
use launch_archive::models::{Project, ProjectStatus, VerificationStatus};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn launch(id: &str, name: &str, date: &str) -> Project {
    Project::new(id, name, name.chars().take(3).collect::<String>().to_uppercase(), date)
}

fn session() -> AdminSession {
    AdminGate::new("secret").unlock("secret").unwrap()
}

fn view(mode: ViewMode, viewed: NaiveDate) -> ViewState {
    let mut state = ViewState::new(viewed, day(2026, 1, 14));
    state.mode = mode;
    state
}

/// Nine launches spread from Dec 2025 to Jan 2027, deliberately unordered.
fn nine_launches() -> Vec<Project> {
    vec![
        launch("f", "Foxtrot", "2026-08-01T00:00:00Z"),
        launch("a", "Alpha", "2025-12-05T10:00:00Z"),
        launch("i", "India", "2027-01-20T00:00:00Z"),
        launch("c", "Charlie", "2026-02-14"),
        launch("b", "Bravo", "2026-01-14T02:00:00Z"),
        launch("e", "Echo", "2026-05-30T12:00:00Z"),
        launch("d", "Delta", "2026-03-01T00:00:00+02:00"),
        launch("h", "Hotel", "2026-12-24T18:30:00Z"),
        launch("g", "Golf", "2026-10-10"),
    ]
}

// ── In-memory source ────────────────────────────────────────────

#[derive(Default)]
struct MemorySource {
    projects: Mutex<Vec<Project>>,
    failing: AtomicBool,
}

impl MemorySource {
    fn with(projects: Vec<Project>) -> Arc<Self> {
        Arc::new(Self {
            projects: Mutex::new(projects),
            failing: AtomicBool::new(false),
        })
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            Err("backing service unavailable".into())
        } else {
            Ok(())
        }
    }

    fn stored(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectSource for MemorySource {
    async fn fetch_all(&self) -> Result<Vec<Project>, SourceError> {
        self.check()?;
        Ok(self.stored())
    }

    async fn upsert(&self, project: &Project) -> Result<(), SourceError> {
        self.check()?;
        let mut projects = self.projects.lock().unwrap();
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => projects.push(project.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, SourceError> {
        self.check()?;
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() != before)
    }
}

// ── Date index ──────────────────────────────────────────────────

#[test]
fn index_buckets_by_utc_day() {
    let projects = vec![
        launch("a", "Alpha", "2026-01-14T02:00:00Z"),
        launch("b", "Bravo", "2026-01-14"),
        // 23:30 at UTC-05:00 is the next UTC day
        launch("c", "Charlie", "2026-01-14T23:30:00-05:00"),
        launch("x", "Broken", "not a date"),
        launch("y", "Blank", ""),
    ];
    let index = DateIndex::build(&projects);

    let ids = |d: NaiveDate| index.get(d).iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids(day(2026, 1, 14)), vec!["a", "b"]);
    assert_eq!(ids(day(2026, 1, 15)), vec!["c"]);
    assert!(index.get(day(2026, 1, 16)).is_empty());
    assert_eq!(index.len(), 2);
    assert_eq!(index.project_count(), 3);
}

#[test]
fn every_dated_project_lands_in_one_bucket() {
    let mut projects = nine_launches();
    projects.push(launch("bad", "Bad", "2026-13-45"));
    let index = DateIndex::build(&projects);

    for project in &projects {
        let hits = index
            .days()
            .filter(|d| index.get(*d).iter().any(|p| p.id == project.id))
            .count();
        match project.launch_day() {
            Some(launch_day) => {
                assert_eq!(hits, 1, "{} should be in exactly one bucket", project.id);
                assert!(index.get(launch_day).iter().any(|p| p.id == project.id));
            }
            None => assert_eq!(hits, 0),
        }
    }
}

// ── Calendar grid ───────────────────────────────────────────────

#[test]
fn grid_is_whole_weeks_covering_month() {
    for year in 2020..=2030 {
        for month in 1..=12 {
            let first = day(year, month, 1);
            let state = view(ViewMode::Calendar, first);
            let grid = project_calendar(&[], &state);

            assert_eq!(grid.cells.len() % 7, 0);
            assert!((4..=6).contains(&grid.rows()));
            assert_eq!(grid.cells.first().unwrap().date.format("%a").to_string(), "Sun");
            assert_eq!(grid.cells.last().unwrap().date.format("%a").to_string(), "Sat");

            let in_month = grid.cells.iter().filter(|c| c.in_month).count();
            let (start, end) = grid_bounds(first);
            assert_eq!(grid.cells.first().unwrap().date, start);
            assert_eq!(grid.cells.last().unwrap().date, end);
            assert!(grid.cell(first).unwrap().in_month);
            assert_eq!(
                in_month,
                launch_archive::archive::calendar::last_of_month(first)
                    .format("%d")
                    .to_string()
                    .parse::<usize>()
                    .unwrap()
            );
        }
    }
}

#[test]
fn february_starting_on_sunday_fills_four_rows() {
    let grid = project_calendar(&[], &view(ViewMode::Calendar, day(2026, 2, 1)));
    assert_eq!(grid.rows(), 4);
    assert_eq!(grid.month_name(), "February");
    assert_eq!(grid.year(), 2026);
}

#[test]
fn grid_marks_today_selected_and_overflow() {
    let projects: Vec<Project> = (0..5)
        .map(|i| launch(&format!("p{i}"), &format!("Launch {i}"), "2026-01-20"))
        .collect();
    let refs: Vec<&Project> = projects.iter().collect();
    let mut state = view(ViewMode::Calendar, day(2026, 1, 1));
    state.selected = Some(day(2026, 1, 20));

    let grid = project_calendar(&refs, &state);
    let cell = grid.cell(day(2026, 1, 20)).unwrap();
    assert!(cell.is_selected);
    assert_eq!(cell.projects.len(), 5);
    assert_eq!(cell.visible().len(), VISIBLE_PER_DAY);
    assert_eq!(cell.overflow(), 2);
    assert_eq!(cell.visible()[0].id, "p0");

    assert!(grid.cell(day(2026, 1, 14)).unwrap().is_today);
    assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);
    assert!(!grid.cell(day(2025, 12, 28)).unwrap().in_month);
}

#[test]
fn project_click_opens_without_selecting_day() {
    let projects = vec![launch("p1", "Nexus", "2026-01-14")];
    let refs: Vec<&Project> = projects.iter().collect();
    let grid = project_calendar(&refs, &view(ViewMode::Calendar, day(2026, 1, 1)));

    let event = grid.click(GridTarget::Project {
        day: day(2026, 1, 14),
        id: "p1",
    });
    assert_eq!(event, Some(ArchiveEvent::ProjectOpened(&projects[0])));

    match grid.click(GridTarget::Day(day(2026, 1, 14))) {
        Some(ArchiveEvent::DaySelected { date, projects: hits }) => {
            assert_eq!(date, day(2026, 1, 14));
            assert_eq!(hits.len(), 1);
        }
        other => panic!("expected day selection, got {other:?}"),
    }

    // Days outside the grid resolve to nothing
    assert!(grid.click(GridTarget::Day(day(2026, 3, 1))).is_none());
    assert!(
        grid.click(GridTarget::Project {
            day: day(2026, 1, 15),
            id: "p1"
        })
        .is_none()
    );
}

#[test]
fn month_navigation_clamps_day() {
    let mut state = view(ViewMode::Calendar, day(2026, 1, 31));
    state.next_month();
    assert_eq!(state.viewed, day(2026, 2, 28));
    state.prev_month();
    assert_eq!(state.viewed, day(2026, 1, 28));

    let mut state = view(ViewMode::Calendar, day(2024, 1, 31));
    state.next_month();
    assert_eq!(state.viewed, day(2024, 2, 29));

    let mut state = view(ViewMode::Calendar, day(2026, 12, 15));
    state.next_month();
    assert_eq!(state.viewed, day(2027, 1, 15));
    state.prev_month();
    state.prev_month();
    assert_eq!(state.viewed, day(2026, 11, 15));

    state.reset_to_today();
    assert_eq!(state.viewed, state.today);

    let mut state = view(ViewMode::Calendar, day(2024, 2, 29));
    state.set_year(2025);
    assert_eq!(state.viewed, day(2025, 2, 28));
}

// ── Filter ──────────────────────────────────────────────────────

#[test]
fn empty_query_keeps_everything_in_order() {
    let projects = nine_launches();
    let filtered = filter(&projects, "");
    let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
    let expected: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn query_matches_name_or_symbol_case_insensitively() {
    let mut nexus = launch("p1", "Nexus Protocol", "2026-01-14");
    nexus.logo = "NX".to_string();
    nexus.category = "DeFi".to_string();
    let orbit = launch("p2", "Orbit", "2026-01-15");
    let projects = vec![nexus, orbit];

    assert_eq!(filter(&projects, "nx").len(), 1);
    assert_eq!(filter(&projects, "NX")[0].id, "p1");
    assert_eq!(filter(&projects, "PROTO")[0].id, "p1");
    assert_eq!(filter(&projects, "orb")[0].id, "p2");
    assert!(filter(&projects, "defi").is_empty());
    assert!(filter(&projects, "zzz").is_empty());
}

// ── Timeline & ledger ───────────────────────────────────────────

#[test]
fn timeline_pages_nine_launches_into_three() {
    let projects = nine_launches();
    let refs: Vec<&Project> = projects.iter().collect();

    let first = project_timeline(&refs, 4, 1);
    assert_eq!(first.page_count, 3);
    assert_eq!(first.total, 9);
    let ids: Vec<&str> = first.items.iter().map(|e| e.project.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert!(!first.has_prev());
    assert!(first.has_next());

    let last = project_timeline(&refs, 4, 3);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].project.id, "i");
    assert!(!last.has_next());
    assert_eq!(last.prev_page(), Some(2));

    let all = project_timeline(&refs, 100, 1);
    assert!(all.items.windows(2).all(|w| w[0].launch_at <= w[1].launch_at));
}

#[test]
fn timeline_is_stable_and_skips_bad_dates() {
    let projects = vec![
        launch("second", "Second", "2026-01-14T02:00:00Z"),
        launch("bad", "Bad", "whenever"),
        launch("first", "First", "2026-01-01"),
        launch("tie", "Tie", "2026-01-14T02:00:00Z"),
    ];
    let refs: Vec<&Project> = projects.iter().collect();
    let page = project_timeline(&refs, 10, 1);

    let ids: Vec<&str> = page.items.iter().map(|e| e.project.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "tie"]);
    assert_eq!(page.total, 3);

    let sides: Vec<Side> = page.items.iter().map(|e| e.side).collect();
    assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);
    assert_eq!(
        page.items[1].launch_at,
        Utc.with_ymd_and_hms(2026, 1, 14, 2, 0, 0).unwrap()
    );
}

#[test]
fn timeline_requests_clamp_to_bounds() {
    let projects = nine_launches();
    let refs: Vec<&Project> = projects.iter().collect();

    assert_eq!(project_timeline(&refs, 4, 0).page, 1);
    assert_eq!(project_timeline(&refs, 4, 42).page, 3);
}

#[test]
fn ledger_keeps_input_order_and_page_math() {
    let projects: Vec<Project> = (0..19)
        .map(|i| launch(&format!("p{i:02}"), &format!("P{i}"), "2026-01-14"))
        .collect();
    let refs: Vec<&Project> = projects.iter().collect();

    let first = project_ledger(&refs, 8, 1);
    assert_eq!(first.page_count, 3);
    assert_eq!(first.items[0].id, "p00");
    assert_eq!(first.range(), Some((1, 8)));

    let last = project_ledger(&refs, 8, 3);
    assert_eq!(last.items.len(), 19 - 8 * 2);
    assert_eq!(last.items[0].id, "p16");
    assert_eq!(last.range(), Some((17, 19)));
}

#[test]
fn empty_pagination_has_single_clamped_page() {
    let page = paginate(Vec::<u8>::new(), 8, 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 0);
    assert!(page.range().is_none());
    assert!(!page.has_prev());
    assert!(!page.has_next());

    // A zero page size is treated as one
    let page = paginate(vec![1, 2, 3], 0, 2);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.items, vec![2]);
}

// ── Projection ──────────────────────────────────────────────────

#[test]
fn projection_is_idempotent() {
    let projects = nine_launches();
    for mode in [ViewMode::Calendar, ViewMode::Timeline, ViewMode::List] {
        let mut state = view(mode, day(2026, 1, 1));
        state.query = "a".to_string();
        assert_eq!(project(&projects, &state), project(&projects, &state));
        assert_eq!(project(&projects, &state).mode(), mode);
    }
}

#[test]
fn projection_applies_query_before_view() {
    let projects = nine_launches();
    let mut state = view(ViewMode::List, day(2026, 1, 1));
    state.query = "golf".to_string();

    let ArchiveView::List(page) = project(&projects, &state) else {
        panic!("expected list view");
    };
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "g");

    let view = ArchiveView::List(page);
    assert!(matches!(view.open("g"), Some(ArchiveEvent::ProjectOpened(p)) if p.id == "g"));
    assert!(view.open("a").is_none());
}

// ── Admin gate ──────────────────────────────────────────────────

#[test]
fn gate_starts_locked_and_rejects_wrong_password() {
    let mut gate = AdminGate::new("hunter2");
    assert_eq!(gate.state(), GateState::Locked);
    assert_eq!(gate.session(), Err(GateError::Locked));

    assert_eq!(gate.unlock("hunter3"), Err(GateError::WrongPassword));
    assert!(!gate.is_unlocked());
    assert!(gate.session().is_err());

    assert_eq!(gate.unlock("Hunter2"), Err(GateError::WrongPassword));
    assert_eq!(gate.unlock(""), Err(GateError::WrongPassword));
    assert_eq!(gate.state(), GateState::Locked);
}

#[test]
fn gate_unlocks_and_relocks() {
    let mut gate = AdminGate::new("hunter2");
    assert!(gate.unlock("hunter2").is_ok());
    assert!(gate.is_unlocked());
    assert!(gate.session().is_ok());

    gate.lock();
    assert_eq!(gate.state(), GateState::Locked);
    assert!(gate.session().is_err());
}

#[test]
fn empty_secret_never_matches() {
    assert!(!secret_matches("", ""));
    assert!(!AdminGate::new("").unlock("").is_ok());
    assert!(secret_matches("abc", "abc"));
    assert!(!secret_matches("abc", "abcd"));
}

// ── Store ───────────────────────────────────────────────────────

#[test]
fn store_insert_rejects_duplicate_ids() {
    let session = session();
    let mut store = ProjectStore::new();
    store.insert(&session, launch("p1", "Nexus", "2026-01-14")).unwrap();
    store.insert(&session, launch("p2", "Orbit", "2026-01-15")).unwrap();

    assert_eq!(store.projects()[0].id, "p2");
    assert_eq!(
        store.insert(&session, launch("p1", "Again", "2026-01-16")),
        Err(StoreError::DuplicateId("p1".to_string()))
    );
    assert_eq!(store.len(), 2);
}

#[test]
fn store_replace_keeps_id() {
    let session = session();
    let mut store = ProjectStore::from_projects(vec![launch("p1", "Nexus", "2026-01-14")]);

    let previous = store
        .replace(&session, "p1", launch("other", "Nexus v2", "2026-01-14"))
        .unwrap();
    assert_eq!(previous.name, "Nexus");
    assert_eq!(store.get("p1").unwrap().name, "Nexus v2");
    assert!(!store.contains("other"));

    assert!(matches!(
        store.replace(&session, "missing", launch("missing", "X", "2026-01-14")),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn store_upsert_inserts_in_launch_order() {
    let session = session();
    let mut store = ProjectStore::from_projects(vec![
        launch("a", "Alpha", "2026-01-01"),
        launch("c", "Charlie", "2026-03-01"),
    ]);

    assert_eq!(
        store.upsert(&session, launch("b", "Bravo", "2026-02-01")),
        UpsertOutcome::Created
    );
    let ids: Vec<&str> = store.projects().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    assert_eq!(
        store.upsert(&session, launch("b", "Bravo v2", "2026-02-01")),
        UpsertOutcome::Updated
    );
    assert_eq!(store.len(), 3);
    assert_eq!(store.get("b").unwrap().name, "Bravo v2");
}

#[test]
fn store_drops_duplicate_ids_from_source() {
    let store = ProjectStore::from_projects(vec![
        launch("a", "Alpha", "2026-01-01"),
        launch("a", "Alpha copy", "2026-01-02"),
    ]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").unwrap().name, "Alpha");
}

// ── Drafts ──────────────────────────────────────────────────────

fn draft(name: &str, symbol: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        symbol: symbol.to_string(),
        ..ProjectDraft::default()
    }
}

#[test]
fn draft_requires_name_and_symbol() {
    assert_eq!(
        draft("  ", "NX").validate(),
        Err(ValidationError::MissingFields(vec!["name"]))
    );
    assert_eq!(
        draft("", "").validate(),
        Err(ValidationError::MissingFields(vec!["name", "symbol"]))
    );
    assert!(draft("Nexus", "NX").validate().is_ok());
}

#[test]
fn draft_applies_defaults() {
    let now = Utc.with_ymd_and_hms(2026, 4, 2, 9, 15, 0).unwrap();
    let project = draft(" Nexus ", "NX")
        .into_project("manual-1".to_string(), None, now)
        .unwrap();

    assert_eq!(project.name, "Nexus");
    assert_eq!(project.network, "Ethereum");
    assert_eq!(project.category, "Infrastructure");
    assert_eq!(project.notes, "Manual Entry");
    assert_eq!(project.status, Some(ProjectStatus::Active));
    assert_eq!(project.verification_status, Some(VerificationStatus::Verified));
    assert_eq!(project.launch_at(), Some(now));
    assert_eq!(project.github_url.as_deref(), Some("#"));
    assert!(project.socials().is_empty());
    assert!(project.token.is_none());
}

#[test]
fn draft_date_means_midnight_utc() {
    let now = Utc.with_ymd_and_hms(2026, 4, 2, 9, 15, 0).unwrap();
    let mut form = draft("Nexus", "NX");
    form.date = "2026-01-14".to_string();
    let project = form.into_project("p1".to_string(), None, now).unwrap();
    assert_eq!(
        project.launch_at(),
        Some(Utc.with_ymd_and_hms(2026, 1, 14, 0, 0, 0).unwrap())
    );
}

#[test]
fn draft_rejects_unknown_status_and_bad_date() {
    let now = Utc::now();
    let mut form = draft("Nexus", "NX");
    form.status = "Moon".to_string();
    assert_eq!(
        form.clone().into_project("p1".to_string(), None, now),
        Err(ValidationError::InvalidStatus("Moon".to_string()))
    );

    form.status = "rugged".to_string();
    form.date = "tomorrow".to_string();
    assert!(matches!(
        form.into_project("p1".to_string(), None, now),
        Err(ValidationError::InvalidLaunchDate(_))
    ));
}

#[test]
fn edit_round_trips_through_draft() {
    let mut original = launch("p1", "Nexus", "2026-01-14T02:00:00Z");
    original.status = Some(ProjectStatus::Hacked);
    original.narrative_tags = Some(vec!["AI".to_string()]);
    original.github_url = Some("https://github.com/nexus".to_string());

    let form = ProjectDraft::from_project(&original);
    assert_eq!(form.date, "2026-01-14");
    assert_eq!(form.status, "Hacked");
    assert_eq!(form.github, "https://github.com/nexus");

    let edited = form
        .into_project("p1".to_string(), Some(&original), Utc::now())
        .unwrap();
    // Same day keeps the exact launch time
    assert_eq!(edited.launch_date, original.launch_date);
    assert_eq!(edited.narrative_tags, original.narrative_tags);
    assert_eq!(edited.status, Some(ProjectStatus::Hacked));
}

#[test]
fn edit_with_full_timestamp_replaces_launch_time() {
    let original = launch("p1", "Nexus", "2026-01-14T02:00:00Z");

    let mut form = ProjectDraft::from_project(&original);
    form.date = "2026-01-14T05:00:00Z".to_string();
    let edited = form
        .into_project("p1".to_string(), Some(&original), Utc::now())
        .unwrap();
    assert_eq!(edited.launch_date, "2026-01-14T05:00:00Z");

    // A bare date on a different day starts at midnight
    let mut form = ProjectDraft::from_project(&original);
    form.date = "2026-01-15".to_string();
    let edited = form
        .into_project("p1".to_string(), Some(&original), Utc::now())
        .unwrap();
    assert_eq!(edited.launch_date, "2026-01-15T00:00:00Z");
}

// ── Service ─────────────────────────────────────────────────────

#[tokio::test]
async fn service_loads_from_source() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source).await;
    assert_eq!(service.len().await, 9);
    assert_eq!(service.get("b").await.unwrap().name, "Bravo");
}

#[tokio::test]
async fn service_starts_empty_when_load_fails() {
    let source = MemorySource::with(nine_launches());
    source.fail(true);
    let service = ArchiveService::load(source.clone()).await;
    assert_eq!(service.len().await, 0);

    source.fail(false);
    assert_eq!(service.reload().await.unwrap(), 9);
}

#[tokio::test]
async fn failed_reload_keeps_last_known_good() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source.clone()).await;

    source.fail(true);
    assert!(service.reload().await.is_err());
    assert_eq!(service.len().await, 9);
}

#[tokio::test]
async fn commit_adds_to_front_and_persists() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source.clone()).await;
    let now = Utc.with_ymd_and_hms(2026, 4, 2, 9, 15, 0).unwrap();

    let (project, outcome) = service
        .commit(&session(), draft("Nexus", "NX"), None, now)
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);
    assert_eq!(project.id, format!("manual-{}", now.timestamp_millis()));

    let store = service.read().await;
    assert_eq!(store.len(), 10);
    assert_eq!(store.projects()[0].id, project.id);
    drop(store);
    assert!(source.stored().iter().any(|p| p.id == project.id));
}

#[tokio::test]
async fn commit_with_empty_name_changes_nothing() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source.clone()).await;

    let err = service
        .commit(&session(), draft("", "NX"), None, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Validation(_)));
    assert_eq!(service.len().await, 9);
    assert_eq!(source.stored().len(), 9);
}

#[tokio::test]
async fn commit_edit_replaces_in_place() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source.clone()).await;
    let index_before = service
        .read()
        .await
        .projects()
        .iter()
        .position(|p| p.id == "c")
        .unwrap();

    let mut form = ProjectDraft::from_project(&service.get("c").await.unwrap());
    form.name = "Charlie Prime".to_string();
    let (_, outcome) = service
        .commit(&session(), form, Some("c"), Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);

    let store = service.read().await;
    assert_eq!(store.len(), 9);
    assert_eq!(store.projects()[index_before].name, "Charlie Prime");
    assert_eq!(store.projects()[index_before].id, "c");
}

#[tokio::test]
async fn commit_edit_of_unknown_id_fails() {
    let service = ArchiveService::load(MemorySource::with(vec![])).await;
    let err = service
        .commit(&session(), draft("Nexus", "NX"), Some("ghost"), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Store(StoreError::NotFound(_))));
}

#[tokio::test]
async fn source_failure_leaves_store_unchanged() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source.clone()).await;
    let before = service.read().await.clone();

    source.fail(true);
    let err = service
        .commit(&session(), draft("Nexus", "NX"), None, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ArchiveError::Source(_)));

    assert!(service
        .upsert(&session(), launch("z", "Zulu", "2026-06-01"))
        .await
        .is_err());
    assert!(service.delete(&session(), "a").await.is_err());

    assert_eq!(*service.read().await, before);
}

#[tokio::test]
async fn upsert_validates_complete_record() {
    let service = ArchiveService::load(MemorySource::with(vec![])).await;

    let err = service
        .upsert(&session(), launch("p1", "Nexus", "someday"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Validation(ValidationError::InvalidLaunchDate(_))
    ));

    let err = service
        .upsert(&session(), launch("", "Nexus", "2026-01-14"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Validation(ValidationError::MissingFields(_))
    ));
    assert_eq!(service.len().await, 0);
}

#[tokio::test]
async fn delete_removes_from_store_and_source() {
    let source = MemorySource::with(nine_launches());
    let service = ArchiveService::load(source.clone()).await;

    let removed = service.delete(&session(), "e").await.unwrap();
    assert_eq!(removed.name, "Echo");
    assert!(service.get("e").await.is_none());
    assert!(!source.stored().iter().any(|p| p.id == "e"));

    let err = service.delete(&session(), "e").await.unwrap_err();
    assert!(matches!(err, ArchiveError::Store(StoreError::NotFound(_))));
}
