//! Derive rooms and doorway sensors from a static adjacency map.
//!
//! The map lists, for each room name, the rooms it shares a doorway with and
//! optionally where that doorway is. Every key becomes a [`Room`] built from
//! [`RoomDefaults`]; every unordered pair of adjacent names becomes exactly
//! one [`Sensor`] named `Sensor_<first>_<second>` after the sorted pair.
//!
//! All rooms are created before any pair is resolved, and the whole map is
//! checked before anything is returned: a neighbor that has no entry of its
//! own aborts seeding with [`SeedIntegrityError`].

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CrowdMapError, SeedIntegrityError};
use crate::geometry::Border;
use crate::room::{Room, RoomType};
use crate::sensor::Sensor;

/// Where a doorway is, in the `(latitude, longitude)` order floor-plan
/// surveys record it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Doorway {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for Doorway {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Doorway> for (f64, f64) {
    fn from(doorway: Doorway) -> Self {
        (doorway.latitude, doorway.longitude)
    }
}

/// One adjacency entry: `["<neighbor>", [lat, lon]]` or `["<neighbor>", null]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, Option<Doorway>)", into = "(String, Option<Doorway>)")]
pub struct Neighbor {
    pub name: String,
    pub doorway: Option<Doorway>,
}

impl Neighbor {
    #[must_use]
    pub fn new(name: impl Into<String>, doorway: Option<Doorway>) -> Self {
        Self {
            name: name.into(),
            doorway,
        }
    }
}

impl From<(String, Option<Doorway>)> for Neighbor {
    fn from((name, doorway): (String, Option<Doorway>)) -> Self {
        Self { name, doorway }
    }
}

impl From<Neighbor> for (String, Option<Doorway>) {
    fn from(neighbor: Neighbor) -> Self {
        (neighbor.name, neighbor.doorway)
    }
}

/// Room name → rooms reachable through a doorway. Iterated in name order.
pub type AdjacencyMap = BTreeMap<String, Vec<Neighbor>>;

/// Placeholder values for the fields an adjacency map does not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDefaults {
    #[serde(rename = "type")]
    pub kind: RoomType,
    pub crowd_factor: f64,
    pub popularity_factor: f64,
    pub area: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub floor: i64,
    pub borders: Vec<Border>,
}

impl Default for RoomDefaults {
    fn default() -> Self {
        Self {
            kind: RoomType::Exhibition,
            crowd_factor: 0.3,
            popularity_factor: 1.0,
            area: 50.0,
            longitude: 0.0,
            latitude: 0.0,
            floor: 1,
            borders: vec![[0.0, 0.0]; 3],
        }
    }
}

impl RoomDefaults {
    /// Build a validated room called `name` from these defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CrowdMapError::Validation`] when `name` is blank or the
    /// defaults themselves break a room rule.
    pub fn room(&self, name: &str) -> Result<Room, CrowdMapError> {
        Room::builder()
            .name(name)
            .kind(self.kind)
            .crowd_factor(self.crowd_factor)
            .popularity_factor(self.popularity_factor)
            .area(self.area)
            .location(self.longitude, self.latitude)
            .floor(self.floor)
            .borders(self.borders.iter().copied())
            .build()
    }
}

/// Entities derived from an adjacency map.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    /// One room per map key, in key order.
    pub rooms: Vec<Room>,
    /// One sensor per unordered adjacent pair, in discovery order.
    pub sensors: Vec<Sensor>,
}

/// Deterministic sensor name for the doorway between `a` and `b`.
///
/// The pair is sorted first, so both orientations give the same name.
#[must_use]
pub fn sensor_name(a: &str, b: &str) -> String {
    let (first, second) = sorted_pair(a, b);
    format!("Sensor_{first}_{second}")
}

fn sorted_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Seed with [`RoomDefaults::default`].
///
/// # Errors
///
/// See [`seed_from_adjacency_with`].
pub fn seed_from_adjacency(map: &AdjacencyMap) -> Result<Seed, CrowdMapError> {
    seed_from_adjacency_with(map, &RoomDefaults::default())
}

/// Turn `map` into rooms and one sensor per unique adjacent pair.
///
/// A sensor is located at the first doorway coordinate listed for its pair
/// (scanning rooms in name order); pairs without any coordinate fall back to
/// the defaults' reference point. The sensor's floor is the floor of the
/// first room of the sorted pair.
///
/// # Errors
///
/// - [`CrowdMapError::SeedIntegrity`] when a neighbor has no entry of its own
///   or a room lists itself.
/// - [`CrowdMapError::Validation`] when a key is blank or the defaults
///   produce an invalid room or sensor.
pub fn seed_from_adjacency_with(
    map: &AdjacencyMap,
    defaults: &RoomDefaults,
) -> Result<Seed, CrowdMapError> {
    let rooms = map
        .keys()
        .map(|name| defaults.room(name))
        .collect::<Result<Vec<_>, _>>()?;
    let by_name: HashMap<&str, &Room> =
        rooms.iter().map(|room| (room.name.as_str(), room)).collect();

    let mut pairs: Vec<(&Room, &Room)> = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut doorways: HashMap<(&str, &str), Doorway> = HashMap::new();

    // `rooms` was built from `map.keys()`, so it lines up with `map.values()`.
    for (room, neighbors) in rooms.iter().zip(map.values()) {
        for neighbor in neighbors {
            if neighbor.name == room.name {
                return Err(SeedIntegrityError::SelfAdjacent {
                    room: room.name.clone(),
                }
                .into());
            }
            let Some(&other) = by_name.get(neighbor.name.as_str()) else {
                return Err(SeedIntegrityError::UnknownNeighbor {
                    room: room.name.clone(),
                    neighbor: neighbor.name.clone(),
                }
                .into());
            };
            let (first, second) = if room.name <= other.name {
                (room, other)
            } else {
                (other, room)
            };
            let key = (first.name.as_str(), second.name.as_str());
            if seen.insert(key) {
                pairs.push((first, second));
            }
            if let Some(doorway) = neighbor.doorway {
                doorways.entry(key).or_insert(doorway);
            }
        }
    }

    let sensors = pairs
        .into_iter()
        .map(|(first, second)| {
            let doorway = doorways
                .get(&(first.name.as_str(), second.name.as_str()))
                .copied()
                .unwrap_or(Doorway {
                    latitude: defaults.latitude,
                    longitude: defaults.longitude,
                });
            Sensor::builder()
                .name(sensor_name(&first.name, &second.name))
                .room(first.id)
                .room(second.id)
                .location(doorway.latitude, doorway.longitude)
                .floor(first.floor)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Seed { rooms, sensors })
}

#[cfg(test)]
mod tests {
    use super::*;

    type Entry<'a> = (&'a str, Vec<(&'a str, Option<(f64, f64)>)>);

    fn map(entries: Vec<Entry<'_>>) -> AdjacencyMap {
        entries
            .into_iter()
            .map(|(room, neighbors)| {
                let neighbors = neighbors
                    .into_iter()
                    .map(|(name, doorway)| Neighbor::new(name, doorway.map(Doorway::from)))
                    .collect();
                (room.to_string(), neighbors)
            })
            .collect()
    }

    #[test]
    fn should_collapse_symmetric_pair_into_one_sensor() {
        let seed = seed_from_adjacency(&map(vec![
            ("A", vec![("B", None)]),
            ("B", vec![("A", None)]),
        ]))
        .unwrap();

        assert_eq!(seed.rooms.len(), 2);
        assert_eq!(seed.sensors.len(), 1);
        let sensor = &seed.sensors[0];
        assert_eq!(sensor.name, "Sensor_A_B");
        assert_eq!(sensor.rooms[0].id(), seed.rooms[0].id);
        assert_eq!(sensor.rooms[1].id(), seed.rooms[1].id);
    }

    #[test]
    fn should_name_sensor_from_sorted_pair() {
        assert_eq!(sensor_name("RW1", "107"), "Sensor_107_RW1");
        assert_eq!(sensor_name("107", "RW1"), "Sensor_107_RW1");
    }

    #[test]
    fn should_create_one_sensor_per_unique_pair() {
        let seed = seed_from_adjacency(&map(vec![
            ("HALL", vec![("SHOP", None), ("T1", None)]),
            ("SHOP", vec![("HALL", None)]),
            ("T1", vec![("HALL", None), ("SHOP", None)]),
        ]))
        .unwrap();

        let names: Vec<&str> = seed.sensors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sensor_HALL_SHOP", "Sensor_HALL_T1", "Sensor_SHOP_T1"]);
    }

    #[test]
    fn should_seed_one_directional_edges() {
        let seed = seed_from_adjacency(&map(vec![
            ("114", vec![("115", None)]),
            ("115", vec![]),
        ]))
        .unwrap();
        assert_eq!(seed.sensors.len(), 1);
        assert_eq!(seed.sensors[0].name, "Sensor_114_115");
    }

    #[test]
    fn should_fail_when_neighbor_has_no_entry() {
        let result = seed_from_adjacency(&map(vec![
            ("A", vec![("B", None), ("GHOST", None)]),
            ("B", vec![]),
        ]));
        assert!(matches!(
            result,
            Err(CrowdMapError::SeedIntegrity(SeedIntegrityError::UnknownNeighbor {
                ref room,
                ref neighbor,
            })) if room == "A" && neighbor == "GHOST"
        ));
    }

    #[test]
    fn should_fail_when_room_lists_itself() {
        let result = seed_from_adjacency(&map(vec![("A", vec![("A", None)])]));
        assert!(matches!(
            result,
            Err(CrowdMapError::SeedIntegrity(SeedIntegrityError::SelfAdjacent { .. }))
        ));
    }

    #[test]
    fn should_place_sensor_at_first_listed_doorway() {
        let seed = seed_from_adjacency(&map(vec![
            ("101", vec![("RW1", Some((55.688_630, 12.579_133)))]),
            ("RW1", vec![("101", Some((1.0, 2.0)))]),
        ]))
        .unwrap();
        let sensor = &seed.sensors[0];
        assert_eq!(sensor.latitude, 55.688_630);
        assert_eq!(sensor.longitude, 12.579_133);
    }

    #[test]
    fn should_take_doorway_from_mirror_entry_when_first_has_none() {
        let seed = seed_from_adjacency(&map(vec![
            ("A", vec![("B", None)]),
            ("B", vec![("A", Some((55.5, 12.5)))]),
        ]))
        .unwrap();
        assert_eq!(seed.sensors[0].latitude, 55.5);
    }

    #[test]
    fn should_fall_back_to_default_location_without_doorway() {
        let defaults = RoomDefaults {
            latitude: 55.0,
            longitude: 12.0,
            ..RoomDefaults::default()
        };
        let adjacency = map(vec![("A", vec![("B", None)]), ("B", vec![])]);
        let seed = seed_from_adjacency_with(&adjacency, &defaults).unwrap();
        assert_eq!(seed.sensors[0].latitude, 55.0);
        assert_eq!(seed.sensors[0].longitude, 12.0);
    }

    #[test]
    fn should_apply_room_defaults() {
        let defaults = RoomDefaults {
            kind: RoomType::Lobby,
            floor: 2,
            ..RoomDefaults::default()
        };
        let adjacency = map(vec![("A", vec![("B", None)]), ("B", vec![])]);
        let seed = seed_from_adjacency_with(&adjacency, &defaults).unwrap();
        assert!(seed.rooms.iter().all(|room| room.kind == RoomType::Lobby && room.floor == 2));
        assert_eq!(seed.sensors[0].floor, 2);
    }

    #[test]
    fn should_reject_invalid_defaults() {
        let defaults = RoomDefaults {
            floor: 9,
            ..RoomDefaults::default()
        };
        let result = seed_from_adjacency_with(&map(vec![("A", vec![])]), &defaults);
        assert!(matches!(result, Err(CrowdMapError::Validation(_))));
    }

    #[test]
    fn should_deserialize_adjacency_map_from_json() {
        let json = r#"{
            "KAFETERIA": [["RW1", [55.68850792692439, 12.579062696814656]], ["HALL", null]],
            "RW1": [["KAFETERIA", null]],
            "HALL": []
        }"#;
        let parsed: AdjacencyMap = serde_json::from_str(json).unwrap();
        assert_eq!(parsed["KAFETERIA"][0].name, "RW1");
        assert_eq!(
            parsed["KAFETERIA"][0].doorway.map(|d| d.latitude),
            Some(55.68850792692439)
        );
        assert!(parsed["KAFETERIA"][1].doorway.is_none());

        let seed = seed_from_adjacency(&parsed).unwrap();
        assert_eq!(seed.rooms.len(), 3);
        assert_eq!(seed.sensors.len(), 2);
    }

    #[test]
    fn should_produce_valid_entities() {
        let seed = seed_from_adjacency(&map(vec![
            ("A", vec![("B", None)]),
            ("B", vec![("A", None)]),
        ]))
        .unwrap();
        assert!(seed.rooms.iter().all(|room| room.validate().is_ok()));
        assert!(seed.sensors.iter().all(|sensor| sensor.validate().is_ok()));
    }
}
