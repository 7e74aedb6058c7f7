//! End-to-end flow: draft form, preview, confirm, persist, reload, schedule, rollup.

use takeoff_core::components::wall::WallDimensions;
use takeoff_core::components::{BasementWallForm, BeamForm, OpeningForm, SlabForm, WallForm};
use takeoff_core::rollup::schedule_total_cost;
use takeoff_core::{Category, MemorySnapshotStore, OpeningKind, Project};
use uuid::Uuid;

fn wall(door: OpeningForm, window: OpeningForm) -> WallForm {
    WallForm {
        dimensions: WallDimensions::new("20", "10", "9"),
        door,
        window,
    }
}

#[test]
fn form_to_schedule_flow() {
    let mut project = Project::new("Site Engineer", "24-117", "Riverside Homes");
    let mut store = MemorySnapshotStore::default();

    // Beam: preview, reject incomplete draft, then confirm
    project.beams.set_form_data(BeamForm::new("4", "10", "", "18"));
    assert_eq!(project.beams.calculate_volume(), "0.00");
    assert!(!project.beams.validate_form());
    assert_eq!(
        project.beams.error_message(),
        "Please fill in the number of beams, length, width and depth."
    );

    project.beams.set_form_data(BeamForm::new("4", "10", "12", "18"));
    assert_eq!(project.beams.calculate_volume(), "60.00");
    assert!(project.beams.validate_form());
    let beam_id = Uuid::new_v4();
    let draft = project.beams.form_data().clone();
    project.beams.add(beam_id, draft);
    project.beams.reset_form();
    project.notify(Category::Beam, &mut store).unwrap();

    // Walls with openings
    let mumty = Uuid::new_v4();
    let exterior = Uuid::new_v4();
    let interior = Uuid::new_v4();
    let basement = Uuid::new_v4();
    project
        .mumty_walls
        .add(mumty, wall(OpeningForm::new("Wood", "21", "500", "2"), OpeningForm::default()));
    project.exterior_walls.add(
        exterior,
        wall(OpeningForm::new("Steel", "18", "300", ""), OpeningForm::new("Sliding", "16", "250", "2")),
    );
    project
        .interior_walls
        .add(interior, wall(OpeningForm::default(), OpeningForm::new("Fixed", "9", "120", "1")));
    project.basement_walls.add(
        basement,
        BasementWallForm {
            dimensions: WallDimensions::new("30", "9", "12"),
            door: OpeningForm::new("Fire", "21", "900", "1"),
        },
    );
    project.slabs.add(Uuid::new_v4(), SlabForm::new("400", "6"));
    for category in [
        Category::MumtyWall,
        Category::ExteriorWall,
        Category::InteriorWall,
        Category::BasementWall,
        Category::Slab,
    ] {
        project.notify(category, &mut store).unwrap();
    }

    // Reload from the port as a separate reader would
    let reloaded = Project::load_from(&store).unwrap();

    let doors = reloaded.schedule(OpeningKind::Door);
    let door_view: Vec<(u32, &str, &str, Option<f64>)> = doors
        .iter()
        .map(|r| (r.sr_no, r.wall_origin.as_str(), r.opening_type.as_str(), r.total_cost))
        .collect();
    assert_eq!(
        door_view,
        vec![
            (1, "Mumty Wall", "Wood", Some(1000.0)),
            (2, "Exterior Wall", "Steel", None),
            (3, "Basement Wall", "Fire", Some(900.0)),
        ]
    );
    assert_eq!(schedule_total_cost(&doors), 1900.0);

    let windows = reloaded.schedule(OpeningKind::Window);
    let window_ids: Vec<Uuid> = windows.iter().map(|r| r.id).collect();
    assert_eq!(window_ids, vec![exterior, interior]);
    assert_eq!(windows[1].sr_no, 2);

    // Rollups
    assert_eq!(reloaded.beams.total_volume(), 60.0);
    assert_eq!(reloaded.totals(Category::Slab).volume, 200.0);
    assert_eq!(reloaded.totals(Category::ExteriorWall).volume, 150.0);

    // Delete renumbers and the next snapshot reflects it
    let mut project = reloaded;
    project.mumty_walls.delete(mumty);
    project.notify(Category::MumtyWall, &mut store).unwrap();
    let doors = project.schedule(OpeningKind::Door);
    assert_eq!(doors.len(), 2);
    assert_eq!(doors[0].wall_origin, "Exterior Wall");
    assert_eq!(doors[0].sr_no, 1);
    assert_eq!(
        store.get("mumty-wall-storage").unwrap()["mumtyWallData"],
        serde_json::json!([])
    );
}

#[test]
fn edit_cycle_replaces_record() {
    let mut project = Project::default();
    let id = Uuid::new_v4();
    project.beams.add(Uuid::new_v4(), BeamForm::new("1", "10", "12", "12"));
    project.beams.add(id, BeamForm::new("1", "10", "12", "12"));

    assert!(project.beams.begin_edit(id));
    let mut form = project.beams.form_data().clone();
    form.number_of_beams = "3".to_string();
    project.beams.set_form_data(form.clone());
    assert_eq!(project.beams.calculate_volume(), "30.00");

    project.beams.update(id, form);
    let record = project.beams.get_by_id(id).unwrap();
    assert_eq!(record.sr_no, 2);
    assert_eq!(record.volume, "30.00");
    assert!(project.beams.editing_id().is_none());
    assert_eq!(project.beams.total_volume(), 40.0);
}
