/// GeoJSON wire types for the world outline file, and the clean [`WorldMap`]
/// the map view draws from.
use log::debug;
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Feature {
    /// Either `"FRA"` or a numeric id, depending on who produced the file.
    pub id: Option<Value>,
    pub properties: Option<serde_json::Map<String, Value>>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl Feature {
    fn property(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }

    pub fn code(&self) -> Option<String> {
        let from_id = match &self.id {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        from_id.or_else(|| {
            self.property("iso_a3")
                .or_else(|| self.property("ISO_A3"))
                .map(str::to_string)
        })
    }

    pub fn name(&self) -> Option<String> {
        self.property("name")
            .or_else(|| self.property("NAME"))
            .or_else(|| self.property("admin"))
            .map(str::to_string)
    }
}

impl Geometry {
    /// Every ring (outer and holes) as `(lon, lat)` points. Only polygons
    /// carry rings; points and lines come back empty.
    pub fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        match self.kind.as_str() {
            "Polygon" => polygon_rings(&self.coordinates),
            "MultiPolygon" => self
                .coordinates
                .as_array()
                .map(|polys| polys.iter().flat_map(polygon_rings).collect())
                .unwrap_or_default(),
            other => {
                debug!("ignoring {other} geometry");
                Vec::new()
            }
        }
    }
}

fn polygon_rings(value: &Value) -> Vec<Vec<(f64, f64)>> {
    let Some(rings) = value.as_array() else {
        return Vec::new();
    };
    rings
        .iter()
        .filter_map(Value::as_array)
        .map(|ring| ring.iter().filter_map(position).collect::<Vec<_>>())
        .filter(|ring| !ring.is_empty())
        .collect()
}

fn position(value: &Value) -> Option<(f64, f64)> {
    let pair = value.as_array()?;
    Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
}

// ---------------------------------------------------------------------------
// Clean model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    /// ISO-3166 alpha-3 code, matching the normalized dataset codes.
    pub code: String,
    pub name: String,
    pub rings: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldMap {
    pub countries: Vec<Country>,
}

impl From<FeatureCollection> for WorldMap {
    fn from(collection: FeatureCollection) -> Self {
        let countries = collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let Some(code) = feature.code() else {
                    debug!("skipping feature without id");
                    return None;
                };
                let name = feature.name().unwrap_or_else(|| code.clone());
                let rings = feature.geometry.as_ref().map(Geometry::rings).unwrap_or_default();
                Some(Country { code, name, rings })
            })
            .collect();
        WorldMap { countries }
    }
}

impl WorldMap {
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<FeatureCollection>(json).map(WorldMap::from)
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    /// Display name for a code, falling back to the code itself.
    pub fn name_of<'a>(&'a self, code: &'a str) -> &'a str {
        self.country(code).map_or(code, |c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "CHE",
                "properties": { "name": "Switzerland" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[6.0, 46.0], [10.0, 46.0], [10.0, 47.5], [6.0, 46.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Greece", "iso_a3": "GRC" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[20.0, 39.0], [26.0, 39.0], [22.0, 41.0], [20.0, 39.0]]],
                        [[[24.0, 35.0], [26.0, 35.0], [25.0, 35.5], [24.0, 35.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "id": 36,
                "properties": null,
                "geometry": { "type": "Point", "coordinates": [134.0, -25.0] }
            },
            {
                "type": "Feature",
                "properties": { "name": "Nowhere" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn parses_polygons_and_multipolygons() {
        let world = WorldMap::parse(SAMPLE).unwrap();
        assert_eq!(world.countries.len(), 3);

        let che = world.country("CHE").unwrap();
        assert_eq!(che.name, "Switzerland");
        assert_eq!(che.rings.len(), 1);
        assert_eq!(che.rings[0][1], (10.0, 46.0));

        let grc = world.country("GRC").unwrap();
        assert_eq!(grc.rings.len(), 2);
    }

    #[test]
    fn numeric_id_and_missing_name_fall_back() {
        let world = WorldMap::parse(SAMPLE).unwrap();
        let aus = world.country("36").unwrap();
        assert_eq!(aus.name, "36");
        assert!(aus.rings.is_empty());
    }

    #[test]
    fn name_of_unknown_code_is_the_code() {
        let world = WorldMap::parse(SAMPLE).unwrap();
        assert_eq!(world.name_of("CHE"), "Switzerland");
        assert_eq!(world.name_of("ZZZ"), "ZZZ");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(WorldMap::parse("{ not json").is_err());
        assert!(WorldMap::parse(r#"{"features": []}"#).unwrap().countries.is_empty());
    }
}
