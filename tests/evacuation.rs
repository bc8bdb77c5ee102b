use anyhow::Result;
use building_evac::io::{CsvSink, ShortCsvSink, read_building};
use building_evac::sim::evac::scenario::{DistributionType, SpecialDensity, SpecialWidth, TransitsType};
use building_evac::{
    Building, BuildingDescription, ElementDescription, ElementSign, EvacError, LevelDescription,
    Point, Recorder, Scenario, Simulation, SimulationConfig, TransitKind, UID,
};
use std::path::PathBuf;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

fn one_level(name: &str, elements: Vec<ElementDescription>) -> BuildingDescription {
    BuildingDescription::new(name, vec![LevelDescription::new("Floor 1", 0., elements)])
}

/// Room of `w` x `h` meters with a 1 m exit in its right wall.
fn single_room(w: f64, h: f64, people: f64) -> Result<Building> {
    let y = h / 2.;
    let desc = one_level(
        "Single room",
        vec![
            ElementDescription::new("r", "Room", ElementSign::Room, rect(0., 0., w, h), &["e"])
                .with_people(people),
            ElementDescription::new(
                "e",
                "Exit",
                ElementSign::DoorWayOut,
                rect(w - 0.1, y - 0.5, w + 0.1, y + 0.5),
                &["r"],
            ),
        ],
    );
    Building::from_description(&desc)
}

/// Large room emptying through a small hall into the outside.
fn room_and_hall(people: f64) -> Result<Building> {
    let desc = one_level(
        "Room and hall",
        vec![
            ElementDescription::new("room", "Room", ElementSign::Room, rect(0., 0., 10., 10.), &["d"])
                .with_people(people),
            ElementDescription::new("hall", "Hall", ElementSign::Room, rect(10., 4., 12., 6.), &["d", "e"]),
            ElementDescription::new("d", "Door", ElementSign::DoorWayInt, rect(9.9, 4.5, 10.1, 5.5), &["room", "hall"]),
            ElementDescription::new("e", "Exit", ElementSign::DoorWayOut, rect(11.9, 4.5, 12.1, 5.5), &["hall"]),
        ],
    );
    Building::from_description(&desc)
}

fn two_floors() -> Result<Building> {
    read_building(&repo_root().join("tests/data/two_floors.json"))
}

fn run(building: Building, config: SimulationConfig) -> Result<Recorder> {
    let mut sim = Simulation::new(building, config)?;
    let mut recorder = Recorder::new();
    sim.run(&mut recorder)?;
    Ok(recorder)
}

fn guarded() -> SimulationConfig {
    let mut config = SimulationConfig::new();
    config.max_ticks = Some(100_000);
    config
}

#[test]
fn test_single_room_ends_outside() -> Result<()> {
    let mut sim = Simulation::new(single_room(5., 4., 40.)?, guarded())?;
    let mut recorder = Recorder::new();
    let summary = sim.run(&mut recorder)?;

    let last = recorder.records.last().unwrap();
    assert_eq!(last.zones[0].occupants, 0.);
    assert!((last.zones[1].occupants - 40.).abs() < 1e-9);
    assert!((summary.evacuated - 40.).abs() < 1e-9);
    assert!(summary.ticks < 100_000);
    Ok(())
}

#[test]
fn test_people_are_conserved() -> Result<()> {
    let building = two_floors()?;
    let initial = building.total_people();
    let recorder = run(building, guarded())?;
    for record in recorder.records.iter() {
        assert!(
            (record.total_people() - initial).abs() < 1e-9,
            "t = {} min: {} people instead of {}",
            record.time_min,
            record.total_people(),
            initial
        );
    }
    Ok(())
}

#[test]
fn test_building_population_never_increases() -> Result<()> {
    let recorder = run(two_floors()?, guarded())?;
    let inside = |r: &building_evac::TickRecord| -> f64 {
        r.zones[..r.zones.len() - 1].iter().map(|z| z.occupants).sum()
    };
    for pair in recorder.records.windows(2) {
        assert!(inside(&pair[1]) <= inside(&pair[0]) + 1e-9);
    }
    let last = recorder.records.last().unwrap();
    assert!(inside(last).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_occupants_stay_non_negative() -> Result<()> {
    let recorder = run(two_floors()?, guarded())?;
    for record in recorder.records.iter() {
        assert!(record.zones.iter().all(|z| z.occupants >= 0.));
        assert!(record.transits.iter().all(|t| t.people_crossed >= 0.));
    }
    Ok(())
}

#[test]
fn test_hall_never_exceeds_max_density() -> Result<()> {
    let building = room_and_hall(300.)?;
    let hall_capacity = 5. * building.zones()[1].area;
    let recorder = run(building, guarded())?;
    assert!(recorder.records.len() > 2);
    for record in recorder.records.iter() {
        assert!(record.zones[1].occupants <= hall_capacity + 1e-9);
    }
    let last = recorder.records.last().unwrap();
    assert!((last.zones[2].occupants - 300.).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_reruns_are_bit_identical() -> Result<()> {
    let a = run(two_floors()?, guarded())?;
    let b = run(two_floors()?, guarded())?;
    assert_eq!(a.records.len(), b.records.len());
    for (ra, rb) in a.records.iter().zip(b.records.iter()) {
        assert_eq!(ra.time_min.to_bits(), rb.time_min.to_bits());
        for (za, zb) in ra.zones.iter().zip(rb.zones.iter()) {
            assert_eq!(za.occupants.to_bits(), zb.occupants.to_bits());
            assert_eq!(za.potential.to_bits(), zb.potential.to_bits());
        }
        for (ta, tb) in ra.transits.iter().zip(rb.transits.iter()) {
            assert_eq!(ta.people_crossed.to_bits(), tb.people_crossed.to_bits());
        }
    }
    Ok(())
}

#[test]
fn test_zone_at_min_density_empties_in_one_tick() -> Result<()> {
    // 1 person in 10 m² is exactly the default minimum density
    let mut sim = Simulation::new(single_room(5., 2., 1.)?, guarded())?;
    sim.step()?;
    let zones = sim.building().zones();
    assert_eq!(zones[0].occupants, 0.);
    assert_eq!(zones[1].occupants, 1.);
    assert_eq!(sim.people_in_visited_zones(), 0.);
    Ok(())
}

#[test]
fn test_min_density_boundary_ignores_area_rounding() -> Result<()> {
    // Triangulated areas of these rooms are off by a few ulps
    for side in [2., 3., 7.] {
        let people = 0.1 * side * side;
        let mut sim = Simulation::new(single_room(side, side, people)?, guarded())?;
        sim.step()?;
        let zones = sim.building().zones();
        assert_eq!(zones[0].occupants, 0., "{side}x{side} room kept people");
        assert!((zones[1].occupants - people).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_zone_above_min_density_drains_gradually() -> Result<()> {
    let mut sim = Simulation::new(single_room(5., 2., 1.5)?, guarded())?;
    sim.step()?;
    let zones = sim.building().zones();
    assert!(zones[0].occupants > 0. && zones[0].occupants < 1.5);
    Ok(())
}

#[test]
fn test_two_floors_fixture() -> Result<()> {
    let building = two_floors()?;
    assert_eq!(building.name, "Two floors");
    assert_eq!(building.zones().len(), 5);
    assert_eq!(building.transits().len(), 4);
    assert!((building.area() - 90.).abs() < 1e-9);
    assert!((building.num_of_people() - 50.).abs() < 1e-12);

    let width = |id: &str| -> f64 {
        let i = building.transit_index(&UID::from(id)).unwrap();
        building.transits()[i].width
    };
    assert!((width("{door-a}") - 1.0).abs() < 1e-9);
    assert!((width("{door-b}") - 0.9).abs() < 1e-9);
    assert!((width("{exit}") - 1.2).abs() < 1e-9);
    assert!((width("{flight}") - 15f64.sqrt()).abs() < 1e-9);

    let outside = building.outside();
    assert_eq!(outside.uid, UID::nil());
    assert_eq!(outside.outputs, vec![UID::from("{exit}")]);
    Ok(())
}

#[test]
fn test_unit_rooms_doorway_width() -> Result<()> {
    let desc = one_level(
        "Unit rooms",
        vec![
            ElementDescription::new("a", "A", ElementSign::Room, rect(0., 0., 1., 1.), &["d"]),
            ElementDescription::new("b", "B", ElementSign::Room, rect(1., 0., 2., 1.), &["d", "e"]),
            ElementDescription::new("d", "Doorway", ElementSign::DoorWay, rect(0.9, 0., 1.1, 1.), &["a", "b"]),
            ElementDescription::new("e", "Exit", ElementSign::DoorWayOut, rect(1.9, 0.25, 2.1, 0.75), &["b"]),
        ],
    );
    let building = Building::from_description(&desc)?;
    assert!((building.transits()[0].width - 1.).abs() < 1e-6);
    assert!((building.transits()[1].width - 0.5).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_unknown_reference_is_topology_error() {
    let desc = one_level(
        "Broken",
        vec![
            ElementDescription::new("r", "Room", ElementSign::Room, rect(0., 0., 4., 4.), &["e"]),
            ElementDescription::new("e", "Exit", ElementSign::DoorWayOut, rect(3.9, 1.5, 4.1, 2.5), &["ghost"]),
        ],
    );
    let err = Building::from_description(&desc).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EvacError>(),
        Some(EvacError::Topology(_))
    ));
}

#[test]
fn test_scenario_distribution_and_widths() -> Result<()> {
    let mut building = two_floors()?;
    let mut config = SimulationConfig::new();
    let mut scenario = Scenario::new();
    scenario.distribution.kind = DistributionType::Uniform;
    scenario.distribution.density = 0.5;
    scenario.distribution.special = vec![SpecialDensity {
        ids: vec!["{room-b}".to_string()],
        density: 1.0,
    }];
    scenario.transits.kind = TransitsType::Users;
    scenario.transits.doorway_in = 0.8;
    scenario.transits.doorway_out = 1.5;
    scenario.transits.special = vec![SpecialWidth {
        ids: vec!["{door-a}".to_string()],
        width: 1.1,
    }];
    scenario.modeling.max_speed = 80.;
    scenario.apply(&mut building, &mut config)?;

    // Room A 30 m² and both staircases 15 m² at 0.5, Room B 30 m² at 1.0
    assert!((building.num_of_people() - 60.).abs() < 1e-9);
    assert_eq!(building.outside().occupants, 0.);

    let width = |id: &str| building.transits()[building.transit_index(&UID::from(id)).unwrap()].width;
    assert_eq!(width("{door-a}"), 1.1);
    assert_eq!(width("{door-b}"), 0.8);
    assert_eq!(width("{flight}"), 0.8);
    assert_eq!(width("{exit}"), 1.5);
    assert_eq!(config.max_speed, 80.);
    Ok(())
}

#[test]
fn test_user_widths_cover_stair_openings() -> Result<()> {
    let mut building = two_floors()?;
    let mut config = SimulationConfig::new();
    let flight = building.transit_index(&UID::from("{flight}")).unwrap();
    assert_eq!(building.transits()[flight].kind, TransitKind::DoorWay);
    assert!(building.transits()[flight].width > 2.);

    let mut scenario = Scenario::new();
    scenario.transits.kind = TransitsType::Users;
    scenario.transits.doorway_in = 1.3;
    scenario.transits.doorway_out = 2.0;
    scenario.apply(&mut building, &mut config)?;

    for transit in building.transits() {
        let expected = match transit.kind {
            TransitKind::DoorWay | TransitKind::DoorWayInt => 1.3,
            TransitKind::DoorWayOut => 2.0,
        };
        assert_eq!(transit.width, expected, "{}", transit.name);
    }
    assert_eq!(building.transits()[flight].width, 1.3);
    Ok(())
}

#[test]
fn test_scenario_with_unknown_id_fails() -> Result<()> {
    let mut building = two_floors()?;
    let mut config = SimulationConfig::new();
    let mut scenario = Scenario::new();
    scenario.blocked = vec!["{nowhere}".to_string()];
    let err = scenario.apply(&mut building, &mut config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EvacError>(),
        Some(EvacError::Topology(_))
    ));
    Ok(())
}

#[test]
fn test_blocked_exit_keeps_everybody_inside() -> Result<()> {
    let mut building = two_floors()?;
    let mut config = guarded();
    let mut scenario = Scenario::new();
    scenario.blocked = vec!["{exit}".to_string()];
    scenario.apply(&mut building, &mut config)?;

    let mut sim = Simulation::new(building, config)?;
    let summary = sim.run(&mut Recorder::new())?;
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.evacuated, 0.);
    assert!((summary.remaining - 50.).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_blocked_door_cuts_off_one_room() -> Result<()> {
    let mut building = two_floors()?;
    let mut config = guarded();
    let mut scenario = Scenario::new();
    scenario.blocked = vec!["{door-b}".to_string()];
    scenario.apply(&mut building, &mut config)?;

    let mut sim = Simulation::new(building, config)?;
    let summary = sim.run(&mut Recorder::new())?;
    assert!((summary.evacuated - 30.).abs() < 1e-9);
    assert!((summary.remaining - 20.).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_csv_output() -> Result<()> {
    let building = single_room(5., 4., 10.)?;
    let mut sink = CsvSink::new(Vec::new(), &building)?;
    let mut sim = Simulation::new(building, guarded())?;
    let summary = sim.run(&mut sink)?;
    let text = String::from_utf8(sink.into_inner()?)?;

    let lines: Vec<&str> = text.lines().collect();
    // Two header rows, the initial state and one row per tick
    assert_eq!(lines.len(), 2 + 1 + summary.ticks);
    assert!(lines[0].starts_with("t;Room;20.00;;;Outside;inf;;;Exit;1.00;;"));
    assert!(lines[2].starts_with("0.00;0;0;10.00;inf;"));
    let last: Vec<&str> = lines[lines.len() - 1].split(';').collect();
    assert_eq!(last[0], format!("{:.2}", summary.time_s));
    Ok(())
}

#[test]
fn test_detailed_and_short_csv_from_one_run() -> Result<()> {
    let building = single_room(5., 4., 10.)?;
    let mut sinks = (
        CsvSink::new(Vec::new(), &building)?,
        ShortCsvSink::new(Vec::new(), &building)?,
    );
    let mut sim = Simulation::new(building, guarded())?;
    let summary = sim.run(&mut sinks)?;
    let (detailed, short) = sinks;
    let detailed = String::from_utf8(detailed.into_inner()?)?;
    let short = String::from_utf8(short.into_inner()?)?;

    let lines: Vec<&str> = short.lines().collect();
    assert_eq!(lines.len(), 1 + 1 + summary.ticks);
    assert_eq!(detailed.lines().count(), lines.len() + 1);
    assert_eq!(lines[0], "t,Room,Outside,Exit,");
    assert_eq!(lines[1], "0.00,10.00,0.00,0.00,");
    let last: Vec<&str> = lines[lines.len() - 1].split(',').collect();
    assert_eq!(last.len(), 5);
    assert_eq!(last[0], format!("{:.2}", summary.time_s));
    assert_eq!(last[2], "10.00");
    assert_eq!(last[4], "");
    Ok(())
}
