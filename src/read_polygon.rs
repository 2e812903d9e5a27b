use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::ring::Ring;

// Files store closed rings; the drawing surface hands over open ones. Every
// reader drops the closing repeat so centroids match what was drawn.

mod lockml {
    use super::*;
    use kml::Kml;
    use kml::types::Geometry;

    fn collect_polygons(kml: &Kml, out: &mut Vec<geo::Polygon>) {
        match kml {
            Kml::KmlDocument(doc) => doc.elements.iter().for_each(|e| collect_polygons(e, out)),
            Kml::Document { elements, .. } => elements.iter().for_each(|e| collect_polygons(e, out)),
            Kml::Folder(z) => z.elements.iter().for_each(|e| collect_polygons(e, out)),
            Kml::Placemark(p) => {
                if let Some(Geometry::Polygon(ls)) = &p.geometry {
                    // kml converts into geo_types through its 'geo-types' feature
                    out.push(geo::Polygon::from(ls.clone()));
                }
            }
            _ => {}
        }
    }

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let kml: Kml = content
            .parse()
            .map_err(|e| anyhow!("failed to parse KML: {e}"))?;
        let mut polygons = Vec::new();
        collect_polygons(&kml, &mut polygons);
        polygons
            .iter()
            .map(|polygon| {
                let positions: Vec<[f64; 2]> =
                    polygon.exterior().0.iter().map(|c| [c.x, c.y]).collect();
                Ring::from_positions(&positions)
                    .map(|r| r.dedup())
                    .map_err(anyhow::Error::from)
            })
            .collect()
    }
}

mod locgpx {
    use super::*;
    use gpx::Gpx;
    use std::io::Cursor;

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let gpx: Gpx =
            gpx::read(Cursor::new(content)).map_err(|e| anyhow!("failed to parse GPX: {e}"))?;

        // every track segment is one walked boundary
        let mut rings = Vec::new();
        for track in &gpx.tracks {
            for segment in &track.segments {
                let positions: Vec<[f64; 2]> = segment
                    .points
                    .iter()
                    .map(|w| [w.point().x(), w.point().y()])
                    .collect();
                rings.push(Ring::from_positions(&positions)?.dedup());
            }
        }
        Ok(rings)
    }
}

mod locjson {
    use super::*;
    use geojson::{GeoJson, Geometry, Value};

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let geojson: GeoJson = content.parse().context("failed to parse GeoJSON")?;

        let geometries: Vec<&Geometry> = match &geojson {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .iter()
                .filter_map(|feature| feature.geometry.as_ref())
                .collect(),
            GeoJson::Feature(feature) => feature.geometry.iter().collect(),
            GeoJson::Geometry(geometry) => vec![geometry],
        };

        let mut rings = Vec::new();
        for geometry in geometries {
            match &geometry.value {
                Value::Polygon(coords) => {
                    if let Some(outer) = coords.first() {
                        rings.push(Ring::from_positions(outer.as_slice())?.dedup());
                    }
                }
                Value::MultiPolygon(multi_coords) => {
                    for outer in multi_coords.iter().filter_map(|c| c.first()) {
                        rings.push(Ring::from_positions(outer.as_slice())?.dedup());
                    }
                }
                _ => log::debug!("skipping non-polygon geometry"),
            }
        }
        Ok(rings)
    }
}

mod locdrawn {
    use super::*;
    use crate::point::DrawnPoint;
    use serde::Deserialize;

    /// The drawing surface exports either a flat list of `{lat, lng}` or one
    /// list per ring.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Drawn {
        Rings(Vec<Vec<DrawnPoint>>),
        Ring(Vec<DrawnPoint>),
    }

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let drawn: Drawn =
            serde_json::from_str(content).context("failed to parse drawn points")?;
        let rings = match drawn {
            Drawn::Rings(rings) => rings,
            Drawn::Ring(ring) => vec![ring],
        };
        rings
            .iter()
            .map(|r| {
                Ring::from_drawn(r)
                    .map(|r| r.dedup())
                    .map_err(anyhow::Error::from)
            })
            .collect()
    }
}

/// Reads every ring found in `path`. The format is chosen by extension;
/// unknown extensions yield no rings.
pub fn read_rings(path: &Path) -> Result<Vec<Ring>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let rings = match extension(path).as_str() {
        "kml" => lockml::read(&content),
        "gpx" => locgpx::read(&content),
        "geojson" => locjson::read(&content),
        "json" => locdrawn::read(&content),
        _ => {
            log::warn!("unsupported file type: {}", path.display());
            return Ok(Vec::new());
        }
    }
    .with_context(|| format!("in {}", path.display()))?;
    log::info!("{}: {} ring(s)", path.display(), rings.len());
    Ok(rings)
}

/// Reads every file in turn. A file that cannot be read or parsed is logged
/// and skipped, so one bad export does not stop a whole directory; the number
/// of skipped files is returned alongside the rings.
pub fn read_all(files: &[PathBuf]) -> (Vec<(PathBuf, Vec<Ring>)>, usize) {
    let mut found = Vec::new();
    let mut failed = 0usize;
    for file in files {
        match read_rings(file) {
            Ok(rings) => found.push((file.clone(), rings)),
            Err(e) => {
                log::error!("{:#}", e);
                failed += 1;
            }
        }
    }
    (found, failed)
}

pub fn is_supported(path: &Path) -> bool {
    matches!(
        extension(path).as_str(),
        "kml" | "gpx" | "geojson" | "json"
    )
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::GeoPoint;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_geojson() {
        let f = write_temp(
            ".geojson",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
                 "coordinates": [[[20.0, 10.0], [21.0, 10.0], [21.0, 11.0], [20.0, 10.0]]]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point",
                 "coordinates": [1.0, 2.0]}}
            ]}"#,
        );
        let rings = read_rings(f.path()).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
        assert_eq!(rings[0].points()[0], GeoPoint::new(10.0, 20.0).unwrap());
    }

    #[test]
    fn test_geojson_multipolygon() {
        let f = write_temp(
            ".geojson",
            r#"{"type": "MultiPolygon", "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 6.0], [5.0, 5.0]]]
            ]}"#,
        );
        let rings = read_rings(f.path()).unwrap();
        assert_eq!(rings.iter().map(Ring::len).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_drawn_json() {
        let f = write_temp(
            ".json",
            r#"[[{"lat": 10.0, "lng": 20.0}, {"lat": 10.0, "lng": 21.0}, {"lat": 11.0, "lng": 21.0}]]"#,
        );
        let rings = read_rings(f.path()).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].points()[2], GeoPoint::new(11.0, 21.0).unwrap());

        let flat = write_temp(".json", r#"[{"lat": 1.0, "lng": 2.0}]"#);
        assert_eq!(read_rings(flat.path()).unwrap()[0].len(), 1);
    }

    #[test]
    fn test_drawn_json_closed_ring() {
        let f = write_temp(
            ".json",
            r#"[{"lat": 0.0, "lng": 0.0}, {"lat": 0.0, "lng": 0.001},
                {"lat": 0.001, "lng": 0.001}, {"lat": 0.001, "lng": 0.0},
                {"lat": 0.0, "lng": 0.0}]"#,
        );
        let rings = read_rings(f.path()).unwrap();
        assert_eq!(rings[0].len(), 4);
        assert!(!rings[0].is_closed());
    }

    #[test]
    fn test_read_all_skips_bad_files() {
        let good = write_temp(".json", r#"[{"lat": 1.0, "lng": 2.0}, {"lat": 1.0, "lng": 3.0}]"#);
        let bad = write_temp(".geojson", "{ not json");
        let files = vec![
            bad.path().to_path_buf(),
            good.path().to_path_buf(),
            PathBuf::from("/nonexistent/field.kml"),
        ];
        let (found, failed) = read_all(&files);
        assert_eq!(failed, 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, good.path());
        assert_eq!(found[0].1[0].len(), 2);
    }

    #[test]
    fn test_drawn_json_out_of_range() {
        let f = write_temp(".json", r#"[{"lat": 100.0, "lng": 20.0}]"#);
        assert!(read_rings(f.path()).is_err());
    }

    #[test]
    fn test_kml() {
        let f = write_temp(
            ".kml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>20,10,0 21,10,0 21,11,0 20,10,0</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#,
        );
        let rings = read_rings(f.path()).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
        assert_eq!(rings[0].points()[1], GeoPoint::new(10.0, 21.0).unwrap());
    }

    #[test]
    fn test_unsupported() {
        let f = write_temp(".txt", "hello");
        assert!(read_rings(f.path()).unwrap().is_empty());
        assert!(!is_supported(f.path()));
    }

    #[test]
    fn test_invalid_geojson() {
        let f = write_temp(".geojson", "{ not json");
        assert!(read_rings(f.path()).is_err());
    }
}
