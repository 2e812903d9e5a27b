use crate::point::{BoundingBox, GeoPoint};
use crate::ring::Ring;

const SIZE: f64 = 500.0;

/// Preview of one or more rings. Longitudes are scaled by the cosine of the
/// box's mid latitude so fields keep their shape at any latitude.
pub struct SVG {
    bbox: BoundingBox,
    padding: f64,
    elements: Vec<String>,
}

impl SVG {
    pub fn init(bbox: &BoundingBox) -> Self {
        Self {
            bbox: bbox.clone(),
            padding: 0.1,
            elements: Vec::new(),
        }
    }

    pub fn add_ring(&mut self, ring: &Ring, fill: &str) {
        let s = ring
            .points()
            .iter()
            .map(|p| {
                let (x, y) = self.transform(p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<String>>()
            .join(" ");
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}" stroke="red" stroke-width="3"/>"#,
            s, fill
        ));
    }

    pub fn add_marker(&mut self, p: &GeoPoint) {
        let (x, y) = self.transform(p);
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="4" fill="black"/>"#,
            x, y
        ));
    }

    pub fn render(&self) -> String {
        let mut svg = format!(
            r#"<svg width="{0}" height="{0}" xmlns="http://www.w3.org/2000/svg">"#,
            SIZE
        );
        svg.push('\n');
        for e in &self.elements {
            svg.push_str(e);
            svg.push('\n');
        }
        svg.push_str("</svg>");
        svg
    }

    fn aspect(&self) -> f64 {
        let mid = (self.bbox.min.lat() + self.bbox.max.lat()) / 2.0;
        mid.to_radians().cos()
    }
    fn width(&self) -> f64 {
        self.bbox.width() * self.aspect()
    }
    fn height(&self) -> f64 {
        self.bbox.height()
    }
    fn scale(&self) -> f64 {
        let padded = self.width().max(self.height()) * (1.0 + 2.0 * self.padding);
        if padded > 0.0 { SIZE / padded } else { 1.0 }
    }
    fn transform(&self, p: &GeoPoint) -> (f64, f64) {
        let x = (p.lon() - self.bbox.min.lon()) * self.aspect();
        let y = p.lat() - self.bbox.min.lat();
        let svg_x = (x + self.width() * self.padding) * self.scale();
        let svg_y = SIZE - (y + self.height() * self.padding) * self.scale();
        (svg_x, svg_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inside_canvas() {
        let ring: Ring = vec![
            GeoPoint::new(10.0, 20.0).unwrap(),
            GeoPoint::new(10.0, 20.01).unwrap(),
            GeoPoint::new(10.01, 20.01).unwrap(),
        ]
        .into();
        let mut svg = SVG::init(&ring.bbox().unwrap());
        svg.add_ring(&ring, "none");
        svg.add_marker(&ring.points()[0]);
        let out = svg.render();
        assert!(out.starts_with("<svg"));
        assert!(out.ends_with("</svg>"));
        assert!(out.contains("<polygon"));
        assert!(out.contains("<circle"));
        for p in ring.points() {
            let (x, y) = svg.transform(p);
            assert!((0.0..=SIZE).contains(&x) && (0.0..=SIZE).contains(&y));
        }
    }

    #[test]
    fn test_single_point_does_not_divide_by_zero() {
        let p = GeoPoint::new(1.0, 1.0).unwrap();
        let svg = SVG::init(&BoundingBox::of(&[p]).unwrap());
        let (x, y) = svg.transform(&p);
        assert!(x.is_finite() && y.is_finite());
    }
}
