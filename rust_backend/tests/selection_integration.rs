//! Integration tests for next-tile selection over a simulated night.
//!
//! These tests ensure that:
//! 1. A full night of selections never repeats a tile and respects LST windows
//! 2. The Moon brightness rule works with the real ephemeris adapters
//! 3. Configuration files change selection behaviour
//! 4. Collaborator failures follow the configured policy

use std::io::Write;
use std::sync::Arc;

use surveysim_rust::models::design_lst_window;
use surveysim_rust::prelude::*;
use surveysim_rust::scheduler::EffectiveWindow;
use surveysim_rust::time::mjd_to_lst;
use tempfile::NamedTempFile;

const NIGHT_START: f64 = 57_689.1;
const NIGHT_END: f64 = 57_689.5;

// ==================== Helper Functions ====================

fn kitt_peak_lst(mjd: f64) -> f64 {
    mjd_to_lst(mjd, Site::kitt_peak().longitude).value()
}

/// Ephemeris with the Moon and every planet parked far below the horizon.
fn moonless_night() -> NightlyEphemeris {
    let mut eph = NightlyEphemeris::new(57_689.0..=57_689.6)
        .with_body(SolarSystemBody::Moon, EquatorialPosition::from_degrees(200.0, -65.0));
    for (i, body) in SolarSystemBody::PLANETS.iter().enumerate() {
        eph.set_body(*body, EquatorialPosition::from_degrees(40.0 * i as f64, -70.0));
    }
    eph
}

fn create_test_tile(id: i64, ra: f64, dec: f64, lst_min: f64, lst_max: f64) -> Tile {
    Tile::new(
        TileId::new(id),
        Degrees::new(ra),
        Degrees::new(dec),
        Degrees::new(lst_min.rem_euclid(360.0)),
        Degrees::new(lst_max.rem_euclid(360.0)),
        Seconds::new(600.0),
    )
}

/// Tiles every 15 deg of RA from 330 through 90, each with its zenith window.
fn survey_strip() -> NightPlan {
    let latitude = Site::kitt_peak().latitude;
    let tiles = (0..9)
        .map(|i| {
            let ra = Degrees::new((330.0 + 15.0 * i as f64).rem_euclid(360.0));
            let dec = Degrees::new(20.0);
            let (lst_min, lst_max) = design_lst_window(ra, dec, 1.0, latitude);
            Tile::new(TileId::new(100 + i), ra, dec, lst_min, lst_max, Seconds::new(600.0))
        })
        .collect();
    NightPlan::new(0.1, tiles).unwrap()
}

// ==================== Night simulation ====================

#[test]
fn test_night_loop_observes_each_tile_once_inside_its_window() {
    let selector = TileSelector::from_ephemeris(Arc::new(moonless_night()), Site::kitt_peak());
    let plan = survey_strip();
    let mut observed = ObservedSet::new();
    let mut previous = Pointing::from_degrees(330.0, 20.0);
    let mut mjd = NIGHT_START;
    let mut order = Vec::new();

    while mjd < NIGHT_END {
        let context = SelectionContext::for_plan(&plan, mjd, previous, true);
        match selector.select_next(&plan, &observed, &context).unwrap() {
            Selection::Selected { tile, overhead } => {
                let planned = plan.get(tile.id).unwrap();
                let window = EffectiveWindow::for_tile(planned, overhead);
                assert!(
                    window.contains(Degrees::new(kitt_peak_lst(mjd))),
                    "tile {} chosen outside its window",
                    tile.id
                );
                assert!(tile.moon_altitude.value() < 0.0);
                assert!(observed.insert(tile.id), "tile {} selected twice", tile.id);

                order.push(tile.id.value());
                previous = tile.pointing();
                mjd += (overhead.value() + tile.max_exposure.value()) / 86_400.0;
            }
            Selection::NoEligibleTile => mjd += 300.0 / 86_400.0,
        }
    }

    assert_eq!(order, (100..109).collect::<Vec<_>>());
}

#[test]
fn test_selection_is_stable_for_identical_inputs() {
    let selector = TileSelector::from_ephemeris(Arc::new(moonless_night()), Site::kitt_peak());
    let plan = survey_strip();
    let context = SelectionContext::for_plan(&plan, 57_689.2, Pointing::from_degrees(0.0, 20.0), true);

    let first = selector.select_next(&plan, &ObservedSet::new(), &context).unwrap();
    let second = selector.select_next(&plan, &ObservedSet::new(), &context).unwrap();
    assert_eq!(first, second);
}

// ==================== Moon ====================

#[test]
fn test_bright_moon_only_allows_bright_tiles() {
    let mjd = 57_689.3;
    let lst = kitt_peak_lst(mjd);
    let eph = NightlyEphemeris::new(57_689.0..=57_689.6)
        .with_body(SolarSystemBody::Moon, EquatorialPosition::from_degrees(lst, 20.0));
    let eph = SolarSystemBody::PLANETS.iter().fold(eph, |eph, body| {
        eph.with_body(*body, EquatorialPosition::from_degrees(lst + 180.0, -70.0))
    });
    let selector = TileSelector::from_ephemeris(Arc::new(eph), Site::kitt_peak());

    let dark = create_test_tile(1, lst, -10.0, lst - 20.0, lst + 20.0);
    let gray = create_test_tile(2, lst, -10.0, lst - 20.0, lst + 20.0)
        .with_conditions(ConditionSet::only(ObservingCondition::Gray));
    let bright = create_test_tile(3, lst, 60.0, lst - 20.0, lst + 20.0)
        .with_program("BRIGHT")
        .with_conditions(ConditionSet::only(ObservingCondition::Bright));
    let plan = NightPlan::new(0.9, vec![dark, gray, bright]).unwrap();

    let context = SelectionContext::for_plan(&plan, mjd, Pointing::from_degrees(lst, 30.0), false);
    let selection = selector.select_next(&plan, &ObservedSet::new(), &context).unwrap();

    let tile = selection.tile().expect("bright tile should be selected");
    assert_eq!(tile.id, TileId::new(3));
    assert_eq!(tile.program, "BRIGHT");
    assert_eq!(tile.moon_fraction, 0.9);
    assert!((tile.moon_distance.value() - 40.0).abs() < 1e-6);
    let transit_altitude = 90.0 - (Site::kitt_peak().latitude.value() - 20.0);
    assert!((tile.moon_altitude.value() - transit_altitude).abs() < 1e-6);
    assert_eq!(selection.overhead().value(), 120.0);
}

// ==================== Configuration ====================

#[test]
fn test_config_file_tightens_airmass_limit() {
    let mjd = 57_689.3;
    let lst = kitt_peak_lst(mjd);
    // Ten degrees of hour angle: airmass about 1.035.
    let tile = create_test_tile(7, lst - 10.0, 20.0, lst - 30.0, lst + 20.0);
    let plan = NightPlan::new(0.0, vec![tile]).unwrap();
    let context = SelectionContext::for_plan(&plan, mjd, Pointing::from_degrees(lst, 20.0), true);

    let relaxed = TileSelector::from_config(&SchedulerConfig::default(), Arc::new(moonless_night()))
        .unwrap();
    assert!(relaxed
        .select_next(&plan, &ObservedSet::new(), &context)
        .unwrap()
        .is_selected());

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[selection]\nmax_airmass = 1.01").unwrap();
    let config = SchedulerConfig::from_file(file.path()).unwrap();
    let strict = TileSelector::from_config(&config, Arc::new(moonless_night())).unwrap();
    assert_eq!(strict.thresholds().max_airmass, 1.01);
    assert!(!strict
        .select_next(&plan, &ObservedSet::new(), &context)
        .unwrap()
        .is_selected());
}

#[test]
fn test_invalid_config_is_refused_by_selector() {
    let mut config = SchedulerConfig::default();
    config.overhead.slew_rate = -1.0;
    let err = TileSelector::from_config(&config, Arc::new(moonless_night())).unwrap_err();
    assert!(matches!(err, SchedulerError::Configuration(_)));
}

// ==================== Failures ====================

#[test]
fn test_ephemeris_outside_night_skips_or_aborts() {
    let mjd = 57_690.2;
    let lst = kitt_peak_lst(mjd);
    let plan = NightPlan::new(0.0, vec![create_test_tile(1, lst, 20.0, lst - 20.0, lst + 20.0)])
        .unwrap();
    let context = SelectionContext::for_plan(&plan, mjd, Pointing::from_degrees(lst, 20.0), true);
    let ephemeris = Arc::new(moonless_night());

    let skipping = TileSelector::from_ephemeris(Arc::clone(&ephemeris), Site::kitt_peak());
    let selection = skipping.select_next(&plan, &ObservedSet::new(), &context).unwrap();
    assert_eq!(selection, Selection::NoEligibleTile);

    let aborting = TileSelector::from_ephemeris(ephemeris, Site::kitt_peak())
        .with_failure_policy(ServiceFailurePolicy::Abort);
    match aborting.select_next(&plan, &ObservedSet::new(), &context) {
        Err(SchedulerError::Service { tile, source }) => {
            assert_eq!(tile, TileId::new(1));
            assert_eq!(source, ServiceError::EpochOutOfRange { mjd });
        }
        other => panic!("expected a service error, got {other:?}"),
    }
}

// ==================== Serialization ====================

#[test]
fn test_plan_loads_from_json() {
    let json = r#"{
        "moon_fraction": 0.25,
        "tiles": [
            {
                "id": 11108,
                "ra": 333.22,
                "dec": 14.84,
                "lst_min": 318.2,
                "lst_max": 348.2,
                "max_exposure": 2000.0,
                "program": "DARK",
                "ebmv": 0.05,
                "conditions": ["DARK", "GRAY"],
                "status": -1
            }
        ]
    }"#;
    let plan: NightPlan = serde_json::from_str(json).unwrap();
    plan.validate().unwrap();

    let tile = plan.get(TileId::new(11108)).unwrap();
    assert!(tile.supports(ObservingCondition::Gray));
    assert!(!tile.supports(ObservingCondition::Bright));
    assert_eq!(tile.max_exposure.value(), 2000.0);
}
