//! # Door and Window Schedules
//!
//! A schedule is a read-only view that flattens the openings embedded in
//! several wall repositories into one numbered list. It is rebuilt on every
//! call and never stored.
//!
//! ## Algorithm
//!
//! 1. Visit the source categories for the opening kind in a fixed order.
//! 2. Keep records whose opening has a non-empty type.
//! 3. Project each into a [`ScheduleRow`] labelled with its source category.
//! 4. Concatenate in source order and number the rows `1..=N`.
//!
//! ## Sources
//!
//! | Kind | Sources, in order |
//! |---|---|
//! | Door | Mumty, Exterior, Interior, Basement |
//! | Window | Mumty, Exterior, Interior |
//!
//! Basement walls carry no window, so the window schedule has one source
//! fewer than the door schedule. Whether basement windows should exist is an
//! open domain question; the lists above reproduce current behaviour.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::components::{OpeningForm, OpeningKind, WallForm};
//! use takeoff_core::project::Project;
//! use takeoff_core::schedule::build_schedule;
//! use uuid::Uuid;
//!
//! let mut project = Project::new("Site Engineer", "24-117", "Client");
//! let mut form = WallForm::default();
//! form.door = OpeningForm::new("Wood", "21", "500", "2");
//! project.mumty_walls.add(Uuid::new_v4(), form);
//!
//! let doors = build_schedule(&project, OpeningKind::Door);
//! assert_eq!(doors.len(), 1);
//! assert_eq!(doors[0].wall_origin, "Mumty Wall");
//! assert_eq!(doors[0].total_cost, Some(1000.0));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::extended_cost;
use crate::components::{Category, OpeningHost, OpeningKind};
use crate::project::Project;

const DOOR_SOURCES: [Category; 4] = [
    Category::MumtyWall,
    Category::ExteriorWall,
    Category::InteriorWall,
    Category::BasementWall,
];

const WINDOW_SOURCES: [Category; 3] = [
    Category::MumtyWall,
    Category::ExteriorWall,
    Category::InteriorWall,
];

/// Source categories for a schedule, in concatenation order
pub fn sources(kind: OpeningKind) -> &'static [Category] {
    match kind {
        OpeningKind::Door => &DOOR_SOURCES,
        OpeningKind::Window => &WINDOW_SOURCES,
    }
}

/// One line of a door or window schedule.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "5b0c7c1e-6d3a-4a55-9a57-2f5c4d1e8b11",
///   "srNo": 2,
///   "wallOrigin": "Exterior Wall",
///   "component": "Door",
///   "type": "Steel",
///   "area": 18.0,
///   "costPerUnit": 300.0,
///   "totalCost": ""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// Id of the host wall record
    pub id: Uuid,
    pub sr_no: u32,
    pub wall_origin: String,
    pub component: OpeningKind,
    #[serde(rename = "type")]
    pub opening_type: String,
    #[serde(with = "blank_if_none")]
    pub area: Option<f64>,
    #[serde(with = "blank_if_none")]
    pub cost_per_unit: Option<f64>,
    /// `costPerUnit * quantity`; absent (not zero) when either input is missing
    #[serde(with = "blank_if_none")]
    pub total_cost: Option<f64>,
}

/// Build the schedule for `kind` across its source repositories
pub fn build_schedule(project: &Project, kind: OpeningKind) -> Vec<ScheduleRow> {
    let mut rows: Vec<ScheduleRow> = sources(kind)
        .iter()
        .flat_map(|category| source_rows(project, *category, kind))
        .collect();
    for (sr_no, row) in (1u32..).zip(rows.iter_mut()) {
        row.sr_no = sr_no;
    }
    tracing::debug!(%kind, rows = rows.len(), "schedule built");
    rows
}

fn source_rows(project: &Project, category: Category, kind: OpeningKind) -> Vec<ScheduleRow> {
    match category {
        Category::MumtyWall => project_rows(project.mumty_walls.records(), category, kind),
        Category::ExteriorWall => project_rows(project.exterior_walls.records(), category, kind),
        Category::InteriorWall => project_rows(project.interior_walls.records(), category, kind),
        Category::BasementWall => project_rows(project.basement_walls.records(), category, kind),
        _ => Vec::new(),
    }
}

/// Adapter from one source's records to common rows. Serial numbers are
/// left at zero for [`build_schedule`] to assign.
pub fn project_rows<H: OpeningHost>(hosts: &[H], origin: Category, kind: OpeningKind) -> Vec<ScheduleRow> {
    hosts
        .iter()
        .filter_map(|host| {
            let opening = host.opening(kind).filter(|o| o.has_type())?;
            Some(ScheduleRow {
                id: host.host_id(),
                sr_no: 0,
                wall_origin: origin.display_name().to_string(),
                component: kind,
                opening_type: opening.opening_type.clone(),
                area: opening.area,
                cost_per_unit: opening.cost_per_unit,
                total_cost: extended_cost(opening.cost_per_unit, opening.quantity),
            })
        })
        .collect()
}

/// Serialize `None` as `""` and accept `""`, numbers or numeric strings back.
mod blank_if_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_str(""),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Number(f64),
        Text(String),
        Null(()),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Cell::deserialize(deserializer)? {
            Cell::Number(v) => Some(v),
            Cell::Text(s) => crate::calculations::parse_amount(&s),
            Cell::Null(()) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::wall::WallDimensions;
    use crate::components::{BasementWallForm, OpeningForm, WallForm};
    use crate::rollup::schedule_total_cost;
    use proptest::prelude::*;

    fn wall(door: OpeningForm, window: OpeningForm) -> WallForm {
        WallForm {
            dimensions: WallDimensions::new("10", "10", "9"),
            door,
            window,
        }
    }

    fn door(t: &str) -> OpeningForm {
        OpeningForm::new(t, "21", "500", "2")
    }

    #[test]
    fn test_two_source_door_schedule() {
        let mut project = Project::default();
        let mumty_id = Uuid::new_v4();
        let exterior_id = Uuid::new_v4();
        project
            .mumty_walls
            .add(mumty_id, wall(OpeningForm::new("Wood", "21", "500", "2"), OpeningForm::default()));
        project
            .exterior_walls
            .add(exterior_id, wall(OpeningForm::new("Steel", "18", "300", ""), OpeningForm::default()));

        let rows = build_schedule(&project, OpeningKind::Door);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].id, mumty_id);
        assert_eq!(rows[0].sr_no, 1);
        assert_eq!(rows[0].wall_origin, "Mumty Wall");
        assert_eq!(rows[0].opening_type, "Wood");
        assert_eq!(rows[0].total_cost, Some(1000.0));

        assert_eq!(rows[1].id, exterior_id);
        assert_eq!(rows[1].sr_no, 2);
        assert_eq!(rows[1].wall_origin, "Exterior Wall");
        assert_eq!(rows[1].opening_type, "Steel");
        assert_eq!(rows[1].total_cost, None);

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["totalCost"], 1000.0);
        assert_eq!(json[1]["totalCost"], "");
        assert_eq!(json[1]["component"], "Door");
        assert_eq!(json[1]["type"], "Steel");
    }

    #[test]
    fn test_source_order_beats_insertion_order() {
        let mut project = Project::default();
        project.interior_walls.add(Uuid::new_v4(), wall(door("Interior"), OpeningForm::default()));
        project.basement_walls.add(
            Uuid::new_v4(),
            BasementWallForm {
                dimensions: WallDimensions::new("10", "10", "12"),
                door: door("Basement"),
            },
        );
        project.exterior_walls.add(Uuid::new_v4(), wall(door("Exterior"), OpeningForm::default()));
        project.mumty_walls.add(Uuid::new_v4(), wall(door("Mumty"), OpeningForm::default()));

        let types: Vec<String> = build_schedule(&project, OpeningKind::Door)
            .into_iter()
            .map(|r| r.opening_type)
            .collect();
        assert_eq!(types, vec!["Mumty", "Exterior", "Interior", "Basement"]);
    }

    #[test]
    fn test_window_schedule_skips_basement() {
        let mut project = Project::default();
        project.basement_walls.add(
            Uuid::new_v4(),
            BasementWallForm {
                dimensions: WallDimensions::new("10", "10", "12"),
                door: door("Basement"),
            },
        );
        project
            .interior_walls
            .add(Uuid::new_v4(), wall(OpeningForm::default(), OpeningForm::new("Sliding", "12", "", "3")));

        let windows = build_schedule(&project, OpeningKind::Window);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].component, OpeningKind::Window);
        assert_eq!(windows[0].wall_origin, "Interior Wall");
        assert_eq!(windows[0].cost_per_unit, None);
        assert_eq!(windows[0].total_cost, None);

        assert_eq!(build_schedule(&project, OpeningKind::Door).len(), 1);
    }

    #[test]
    fn test_blank_openings_are_excluded() {
        let mut project = Project::default();
        project.exterior_walls.add(Uuid::new_v4(), wall(OpeningForm::default(), OpeningForm::default()));
        project.exterior_walls.add(Uuid::new_v4(), wall(door("  "), OpeningForm::default()));
        assert!(build_schedule(&project, OpeningKind::Door).is_empty());
    }

    #[test]
    fn test_stored_blank_type_is_excluded() {
        let mut project = Project::default();
        let id = Uuid::new_v4();
        project.exterior_walls.add(id, wall(door("Wood"), OpeningForm::default()));

        let mut snapshot = project.exterior_walls.snapshot().unwrap();
        snapshot["exteriorWallData"][0]["door"]["type"] = serde_json::Value::String(String::new());
        project.restore(Category::ExteriorWall, &snapshot).unwrap();

        assert!(build_schedule(&project, OpeningKind::Door).is_empty());
    }

    #[test]
    fn test_stored_opening_without_type_is_excluded() {
        let mut project = Project::default();
        let kept = Uuid::new_v4();
        project.exterior_walls.add(Uuid::new_v4(), wall(door("Wood"), OpeningForm::default()));
        project.exterior_walls.add(kept, wall(door("Steel"), OpeningForm::default()));

        let mut snapshot = project.exterior_walls.snapshot().unwrap();
        snapshot["exteriorWallData"][0]["door"] = serde_json::json!({ "area": 21.0 });
        project.restore(Category::ExteriorWall, &snapshot).unwrap();

        let rows = build_schedule(&project, OpeningKind::Door);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, kept);
        assert_eq!(rows[0].sr_no, 1);
        assert_eq!(project.exterior_walls.len(), 2);
    }

    #[test]
    fn test_schedule_does_not_touch_sources() {
        let mut project = Project::default();
        let id = Uuid::new_v4();
        project.interior_walls.add(Uuid::new_v4(), wall(OpeningForm::default(), OpeningForm::default()));
        project.interior_walls.add(id, wall(door("Wood"), OpeningForm::default()));

        let rows = build_schedule(&project, OpeningKind::Door);
        assert_eq!(rows[0].sr_no, 1);
        assert_eq!(project.interior_walls.get_by_id(id).unwrap().sr_no, 2);
    }

    #[test]
    fn test_schedule_total_cost() {
        let mut project = Project::default();
        project.mumty_walls.add(Uuid::new_v4(), wall(door("A"), OpeningForm::default()));
        project
            .exterior_walls
            .add(Uuid::new_v4(), wall(OpeningForm::new("B", "18", "300", ""), OpeningForm::default()));
        let rows = build_schedule(&project, OpeningKind::Door);
        assert_eq!(schedule_total_cost(&rows), 1000.0);
    }

    #[test]
    fn test_row_json_roundtrip_keeps_blanks() {
        let row = ScheduleRow {
            id: Uuid::new_v4(),
            sr_no: 1,
            wall_origin: "Exterior Wall".to_string(),
            component: OpeningKind::Door,
            opening_type: "Steel".to_string(),
            area: Some(18.0),
            cost_per_unit: None,
            total_cost: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: ScheduleRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    proptest! {
        #[test]
        fn prop_schedule_length_is_sum_of_sources(
            a in 0usize..6, b in 0usize..6, c in 0usize..6, blanks in 0usize..4
        ) {
            let mut project = Project::default();
            for _ in 0..a {
                project.mumty_walls.add(Uuid::new_v4(), wall(door("M"), OpeningForm::default()));
            }
            for _ in 0..b {
                project.exterior_walls.add(Uuid::new_v4(), wall(door("E"), OpeningForm::default()));
            }
            for _ in 0..c {
                project.interior_walls.add(Uuid::new_v4(), wall(door("I"), OpeningForm::default()));
            }
            for _ in 0..blanks {
                project.exterior_walls.add(Uuid::new_v4(), wall(OpeningForm::default(), OpeningForm::default()));
            }

            let rows = build_schedule(&project, OpeningKind::Door);
            prop_assert_eq!(rows.len(), a + b + c);
            let serials: Vec<u32> = rows.iter().map(|r| r.sr_no).collect();
            prop_assert_eq!(serials, (1..=(a + b + c) as u32).collect::<Vec<_>>());
        }
    }
}
