//! Map documents and their conversion into a [`RouteModel`].
//!
//! A map document is JSON holding OSM-style nodes (latitude/longitude) and
//! ways (ordered node references tagged with a `highway` value):
//!
//! ```json
//! {
//!   "bounds": {"min_lat": 48.0, "max_lat": 48.01, "min_lon": 11.0, "max_lon": 11.01},
//!   "nodes": [{"id": "a", "lat": 48.0, "lon": 11.0}, {"id": "b", "lat": 48.0, "lon": 11.01}],
//!   "ways": [{"id": "main", "highway": "residential", "nodes": ["a", "b"]}]
//! }
//! ```
//!
//! Coordinates are projected with spherical Web Mercator, shifted so the
//! south-west corner of the bounds is the origin, and divided by the shorter
//! side of the projected bounds. The model's metric scale turns those units
//! back into ground metres at the map's mid latitude.

use std::collections::HashMap;
use std::env;
use std::f64::consts::FRAC_PI_4;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{NodeId, RoadKind, RouteModel};

/// Environment variable overriding the default map location.
pub const MAP_ENV_VAR: &str = "ROUTEPLANNER_MAP";

/// Default filename for the map document in the platform data directory.
const MAP_FILENAME: &str = "map.json";

/// Equatorial radius used by Web Mercator, in metres.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Geographic bounding box of a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl MapBounds {
    fn around<'a, I>(nodes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a MapNode>,
    {
        nodes.into_iter().fold(None, |bounds, node| {
            Some(match bounds {
                None => MapBounds {
                    min_lat: node.lat,
                    max_lat: node.lat,
                    min_lon: node.lon,
                    max_lon: node.lon,
                },
                Some(b) => MapBounds {
                    min_lat: b.min_lat.min(node.lat),
                    max_lat: b.max_lat.max(node.lat),
                    min_lon: b.min_lon.min(node.lon),
                    max_lon: b.max_lon.max(node.lon),
                },
            })
        })
    }
}

/// A point in the map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

/// An ordered run of node references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapWay {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub highway: Option<String>,
    pub nodes: Vec<String>,
}

/// Top-level map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub bounds: Option<MapBounds>,
    pub nodes: Vec<MapNode>,
    #[serde(default)]
    pub ways: Vec<MapWay>,
}

/// Resolve the default map location using platform-specific project directories.
pub fn default_map_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "routeplanner", "routeplanner")
        .ok_or(Error::MapPathUnavailable)?;
    Ok(dirs.data_dir().join(MAP_FILENAME))
}

/// Pick the map to load: an explicit path wins, then [`MAP_ENV_VAR`], then
/// [`default_map_path`].
pub fn resolve_map_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(value) = env::var_os(MAP_ENV_VAR).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        debug!(path = %path.display(), env_var = MAP_ENV_VAR, "using map from environment");
        return Ok(path);
    }

    default_map_path()
}

/// Read and convert a map document from disk.
pub fn load_map(path: &Path) -> Result<RouteModel> {
    let contents = fs::read_to_string(path)?;
    let model = parse_map(&contents)?;
    info!(
        path = %path.display(),
        nodes = model.len(),
        roads = model.roads().len(),
        metric_scale = model.metric_scale(),
        "loaded map"
    );
    Ok(model)
}

/// Parse a JSON map document into a model.
pub fn parse_map(json: &str) -> Result<RouteModel> {
    let document: MapDocument = serde_json::from_str(json)?;
    document.into_model()
}

impl MapDocument {
    /// Project the document and build its road graph.
    ///
    /// Ways without a recognised `highway` tag are skipped, and only nodes
    /// referenced by a kept road enter the model.
    pub fn into_model(self) -> Result<RouteModel> {
        let positions: HashMap<&str, &MapNode> = self
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();
        if positions.len() != self.nodes.len() {
            warn!(
                declared = self.nodes.len(),
                unique = positions.len(),
                "map declares duplicate node ids; the last declaration wins"
            );
        }

        let mut roads: Vec<(RoadKind, Vec<&MapNode>)> = Vec::new();
        let mut skipped = 0usize;
        for way in &self.ways {
            let Some(kind) = way.highway.as_deref().and_then(RoadKind::from_highway) else {
                skipped += 1;
                continue;
            };

            let nodes = way
                .nodes
                .iter()
                .map(|id| {
                    positions
                        .get(id.as_str())
                        .copied()
                        .ok_or_else(|| Error::UnknownMapNode {
                            way: way.id.clone(),
                            node: id.clone(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            roads.push((kind, nodes));
        }
        if skipped > 0 {
            debug!(skipped, "ignored ways without a road highway tag");
        }

        let bounds = self.bounds.or_else(|| MapBounds::around(&self.nodes));
        let projection = Projection::new(bounds);

        let mut builder = RouteModel::builder().metric_scale(projection.metric_scale);
        let mut ids: HashMap<&str, NodeId> = HashMap::new();
        for (kind, nodes) in roads {
            let road_nodes: Vec<NodeId> = nodes
                .into_iter()
                .map(|node| {
                    *ids.entry(node.id.as_str()).or_insert_with(|| {
                        let [x, y] = projection.project(node);
                        builder.add_node(x, y)
                    })
                })
                .collect();
            builder.add_road(kind, road_nodes);
        }

        builder.build()
    }
}

/// Web Mercator projection normalised to the map bounds.
struct Projection {
    min_x: f64,
    min_y: f64,
    side: f64,
    metric_scale: f64,
}

impl Projection {
    fn new(bounds: Option<MapBounds>) -> Self {
        let Some(bounds) = bounds else {
            return Self {
                min_x: 0.0,
                min_y: 0.0,
                side: 1.0,
                metric_scale: 1.0,
            };
        };

        let min_x = lon_to_x(bounds.min_lon);
        let min_y = lat_to_y(bounds.min_lat);
        let dx = lon_to_x(bounds.max_lon) - min_x;
        let dy = lat_to_y(bounds.max_lat) - min_y;
        let side = match (dx > 0.0, dy > 0.0) {
            (true, true) => dx.min(dy),
            (true, false) => dx,
            (false, true) => dy,
            (false, false) => 1.0,
        };
        let mid_lat = (bounds.min_lat + bounds.max_lat) / 2.0;

        Self {
            min_x,
            min_y,
            side,
            metric_scale: side * mid_lat.to_radians().cos(),
        }
    }

    fn project(&self, node: &MapNode) -> [f64; 2] {
        [
            (lon_to_x(node.lon) - self.min_x) / self.side,
            (lat_to_y(node.lat) - self.min_y) / self.side,
        ]
    }
}

fn lon_to_x(lon: f64) -> f64 {
    lon.to_radians() * EARTH_RADIUS_M
}

fn lat_to_y(lat: f64) -> f64 {
    (lat.to_radians() / 2.0 + FRAC_PI_4).tan().ln() * EARTH_RADIUS_M
}
