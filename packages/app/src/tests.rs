use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use booth_map_analytics_models::SortColumn;
use booth_map_booth_models::Category;
use booth_map_data_models::{RawBooth, RawConstituency, RawConstituencyRef, RawDistrict, RawMaster};

use super::*;

/// In-memory fixture source for controller tests.
struct FakeSource {
    master: RawMaster,
    files: BTreeMap<String, RawConstituency>,
}

#[async_trait]
impl BoothDataSource for FakeSource {
    async fn fetch_master(&self) -> Result<RawMaster, SourceError> {
        Ok(self.master.clone())
    }

    async fn fetch_constituency(&self, data_file: &str) -> Result<RawConstituency, SourceError> {
        self.files.get(data_file).cloned().ok_or_else(|| {
            SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                data_file.to_string(),
            ))
        })
    }
}

fn raw_booth(booth_no: &str, winner: &str, margin_pct: f64) -> RawBooth {
    RawBooth {
        booth_no: booth_no.to_string(),
        station_no: Some(booth_no.parse().unwrap_or(0)),
        winner: winner.to_string(),
        dmk_votes: Some(100),
        aiadmk_votes: Some(80),
        margin_pct: Some(margin_pct),
        village: format!("Village {booth_no}"),
        ..RawBooth::default()
    }
}

fn master_with(files: &[(&str, &str)]) -> RawMaster {
    RawMaster {
        state: "Tamil Nadu".to_string(),
        election_year: 2021,
        districts: vec![RawDistrict {
            code: "KPM".to_string(),
            name: "Kanchipuram".to_string(),
            constituencies: files
                .iter()
                .map(|(name, file)| RawConstituencyRef {
                    ac_number: "036".to_string(),
                    name: (*name).to_string(),
                    kind: "GEN".to_string(),
                    data_file: (*file).to_string(),
                    has_geocoding: false,
                    total_booths: 3,
                })
                .collect(),
        }],
    }
}

fn sample_constituency_source() -> Arc<FakeSource> {
    // Three booths: A strong DMK, B strong AIADMK, C swing.
    let constituency = RawConstituency {
        constituency: "Uthiramerur (AC036)".to_string(),
        ac_number: "036".to_string(),
        booths: vec![
            raw_booth("1", "DMK", 15.0),
            raw_booth("2", "AIADMK", 15.0),
            raw_booth("3", "DMK", 5.0),
        ],
        ..RawConstituency::default()
    };

    let mut files = BTreeMap::new();
    files.insert("uthiramerur.json".to_string(), constituency);

    Arc::new(FakeSource {
        master: master_with(&[("Uthiramerur", "uthiramerur.json")]),
        files,
    })
}

async fn loaded_controller() -> AppController {
    let mut controller = AppController::new(sample_constituency_source()).await.unwrap();
    controller
        .dispatch(Command::LoadConstituency("Uthiramerur".to_string()))
        .await
        .unwrap();
    controller
}

#[tokio::test]
async fn new_controller_is_idle_with_master_loaded() {
    let controller = AppController::new(sample_constituency_source()).await.unwrap();
    assert_eq!(controller.master().state, "Tamil Nadu");
    assert!(controller.session().is_none());
    assert!(controller.table_page().is_none());
    assert!(controller.overlay_cells().is_empty());
}

#[tokio::test]
async fn load_builds_a_fresh_session_with_defaults() {
    let controller = loaded_controller().await;
    let session = controller.session().unwrap();

    assert_eq!(session.constituency.name, "Uthiramerur");
    assert_eq!(session.booths.len(), 3);
    assert_eq!(session.booths[0].id, 0);
    assert!(session.filter.is_empty());
    assert_eq!(session.sort, SortState::default());
    assert_eq!(session.page, 1);
}

#[tokio::test]
async fn unknown_constituency_is_an_error_and_keeps_state() {
    let mut controller = loaded_controller().await;
    let err = controller
        .dispatch(Command::LoadConstituency("Alandur".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownConstituency(_)));
    assert!(controller.session().is_some());
}

#[tokio::test]
async fn failed_fetch_retains_the_previous_session() {
    let source = Arc::new(FakeSource {
        master: master_with(&[
            ("Uthiramerur", "uthiramerur.json"),
            ("Kancheepuram", "missing.json"),
        ]),
        files: {
            let mut files = BTreeMap::new();
            files.insert(
                "uthiramerur.json".to_string(),
                RawConstituency {
                    booths: vec![raw_booth("1", "DMK", 15.0)],
                    ..RawConstituency::default()
                },
            );
            files
        },
    });

    let mut controller = AppController::new(source).await.unwrap();
    controller
        .dispatch(Command::LoadConstituency("Uthiramerur".to_string()))
        .await
        .unwrap();

    let err = controller
        .dispatch(Command::LoadConstituency("Kancheepuram".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Load(SourceError::Io(_))));

    // The old session survives a failed switch in full.
    let session = controller.session().unwrap();
    assert_eq!(session.constituency.name, "Uthiramerur");
    assert_eq!(session.booths.len(), 1);
}

#[tokio::test]
async fn stale_load_is_discarded_in_favor_of_the_newer_one() {
    let source = sample_constituency_source();
    let mut controller = AppController::new(source.clone()).await.unwrap();

    // Two switches race: the older fetch resolves after the newer one.
    let older = controller.begin_load("Uthiramerur").unwrap();
    let newer = controller.begin_load("Uthiramerur").unwrap();

    let newer_raw = source.fetch_constituency(newer.data_file()).await.unwrap();
    assert!(controller.complete_load(&newer, newer_raw));
    let booths_after_newer = controller.session().unwrap().booths.clone();

    let older_raw = RawConstituency {
        booths: vec![raw_booth("99", "DMK", 50.0)],
        ..RawConstituency::default()
    };
    assert!(!controller.complete_load(&older, older_raw));

    // The stale result changed nothing.
    assert_eq!(controller.session().unwrap().booths, booths_after_newer);
}

#[tokio::test]
async fn category_filter_then_margin_sort() {
    let mut controller = loaded_controller().await;

    // Category filter keeps exactly the strong-DMK booth.
    controller
        .dispatch(Command::SetCategoryFilter(Some(Category::StrongDmk)))
        .await
        .unwrap();
    let page = controller.table_page().unwrap();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].booth_no, "1");

    // Clear and sort by margin descending: the 15-point tie keeps input
    // order (booth 1 before booth 2), the 5-point booth comes last.
    controller
        .dispatch(Command::SetCategoryFilter(None))
        .await
        .unwrap();
    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();
    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();

    let page = controller.table_page().unwrap();
    let labels: Vec<&str> = page.rows.iter().map(|b| b.booth_no.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn category_filter_is_single_select() {
    let mut controller = loaded_controller().await;

    controller
        .dispatch(Command::SetCategoryFilter(Some(Category::StrongDmk)))
        .await
        .unwrap();
    controller
        .dispatch(Command::SetCategoryFilter(Some(Category::StrongAiadmk)))
        .await
        .unwrap();

    // The second selection replaced the first.
    assert_eq!(
        controller.session().unwrap().filter.category,
        Some(Category::StrongAiadmk)
    );
    let page = controller.table_page().unwrap();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].booth_no, "2");
}

#[tokio::test]
async fn sort_command_toggles_direction_on_repeat() {
    let mut controller = loaded_controller().await;

    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();
    assert_eq!(
        controller.session().unwrap().sort,
        SortState {
            column: SortColumn::MarginPct,
            descending: false
        }
    );

    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();
    assert!(controller.session().unwrap().sort.descending);

    controller
        .dispatch(Command::SetSort(SortColumn::Village))
        .await
        .unwrap();
    assert_eq!(
        controller.session().unwrap().sort,
        SortState {
            column: SortColumn::Village,
            descending: false
        }
    );
}

/// Controller loaded with `n` strong-DMK booths, enough for multiple
/// table pages.
async fn many_booth_controller(n: usize) -> AppController {
    let booths: Vec<RawBooth> = (1..=n)
        .map(|i| raw_booth(&i.to_string(), "DMK", 15.0))
        .collect();
    let mut files = BTreeMap::new();
    files.insert(
        "uthiramerur.json".to_string(),
        RawConstituency {
            booths,
            ..RawConstituency::default()
        },
    );
    let source = Arc::new(FakeSource {
        master: master_with(&[("Uthiramerur", "uthiramerur.json")]),
        files,
    });

    let mut controller = AppController::new(source).await.unwrap();
    controller
        .dispatch(Command::LoadConstituency("Uthiramerur".to_string()))
        .await
        .unwrap();
    controller
}

#[tokio::test]
async fn filter_changes_reset_the_page() {
    let mut controller = many_booth_controller(60).await;

    controller.dispatch(Command::ChangePage(3)).await.unwrap();
    assert_eq!(controller.session().unwrap().page, 3);

    controller
        .dispatch(Command::SetSearch("village".to_string()))
        .await
        .unwrap();
    assert_eq!(controller.session().unwrap().page, 1);

    controller.dispatch(Command::ChangePage(2)).await.unwrap();
    controller
        .dispatch(Command::SetAreaFilter(Some("Village 7".to_string())))
        .await
        .unwrap();
    assert_eq!(controller.session().unwrap().page, 1);
}

#[tokio::test]
async fn sort_changes_reset_the_page() {
    let mut controller = many_booth_controller(60).await;

    controller.dispatch(Command::ChangePage(3)).await.unwrap();
    assert_eq!(controller.session().unwrap().page, 3);

    // New column resets the page.
    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();
    assert_eq!(controller.session().unwrap().page, 1);

    // So does toggling the direction of the active column.
    controller.dispatch(Command::ChangePage(2)).await.unwrap();
    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();
    assert_eq!(controller.session().unwrap().page, 1);
}

#[tokio::test]
async fn change_page_clamps_to_the_navigable_range() {
    let mut controller = many_booth_controller(60).await;

    // 60 booths at 25 per page -> 3 pages.
    controller.dispatch(Command::ChangePage(2)).await.unwrap();
    let page = controller.table_page().unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows.len(), 25);

    controller.dispatch(Command::ChangePage(99)).await.unwrap();
    assert_eq!(controller.session().unwrap().page, 3);

    controller.dispatch(Command::ChangePage(0)).await.unwrap();
    assert_eq!(controller.session().unwrap().page, 1);
}

#[tokio::test]
async fn reload_resets_filters_and_sort() {
    let mut controller = loaded_controller().await;

    controller
        .dispatch(Command::SetSearch("school".to_string()))
        .await
        .unwrap();
    controller
        .dispatch(Command::SetSort(SortColumn::MarginPct))
        .await
        .unwrap();

    controller
        .dispatch(Command::LoadConstituency("Uthiramerur".to_string()))
        .await
        .unwrap();

    let session = controller.session().unwrap();
    assert!(session.filter.is_empty());
    assert_eq!(session.sort, SortState::default());
}

#[tokio::test]
async fn overlay_cells_follow_the_active_filter() {
    let mut a = raw_booth("1", "DMK", 15.0);
    a.lat = Some(12.61);
    a.lng = Some(79.79);
    let mut b = raw_booth("2", "AIADMK", 15.0);
    b.lat = Some(12.95);
    b.lng = Some(80.18);

    let mut files = BTreeMap::new();
    files.insert(
        "uthiramerur.json".to_string(),
        RawConstituency {
            booths: vec![a, b],
            ..RawConstituency::default()
        },
    );
    let source = Arc::new(FakeSource {
        master: master_with(&[("Uthiramerur", "uthiramerur.json")]),
        files,
    });

    let mut controller = AppController::new(source).await.unwrap();
    controller
        .dispatch(Command::LoadConstituency("Uthiramerur".to_string()))
        .await
        .unwrap();

    assert_eq!(controller.overlay_cells().len(), 2);
    assert_eq!(controller.session().unwrap().cells.len(), 2);

    controller
        .dispatch(Command::SetCategoryFilter(Some(Category::StrongDmk)))
        .await
        .unwrap();
    let overlay = controller.overlay_cells();
    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay[0].booth_ids, vec![0]);

    // The full-set mapping is untouched by filtering.
    assert_eq!(controller.session().unwrap().cells.len(), 2);
}

#[tokio::test]
async fn area_names_are_distinct_and_sorted() {
    let mut controller = loaded_controller().await;
    assert_eq!(
        controller.area_names(),
        vec!["Village 1", "Village 2", "Village 3"]
    );

    // Area filter narrows the table to that village.
    controller
        .dispatch(Command::SetAreaFilter(Some("Village 2".to_string())))
        .await
        .unwrap();
    let page = controller.table_page().unwrap();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].booth_no, "2");
}
