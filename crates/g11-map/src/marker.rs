use g11_schemas::{LatLng, NearPoint};
use serde::Serialize;

/// Everything a surface needs to draw one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub title: String,
    pub icon: String,
    /// HTML shown in the info window when the marker is clicked.
    pub info_html: String,
}

impl MarkerSpec {
    pub fn for_point(point: &NearPoint, icon: &str) -> Self {
        Self {
            id: point.id().to_string(),
            position: point.position(),
            title: point.page.title.clone(),
            icon: icon.to_string(),
            info_html: info_window_content(point),
        }
    }
}

/// `<a href="URL"><h3>TITLE</h3></a><p>Distance: DIS</p>`
///
/// The distance paragraph is left out when the server sent no distance.
pub fn info_window_content(point: &NearPoint) -> String {
    let mut html = format!(
        "<a href=\"{}\"><h3>{}</h3></a>",
        escape_html(&point.page.url),
        escape_html(&point.page.title)
    );
    if let Some(dis) = point.dis {
        html.push_str(&format!("<p>Distance: {dis}</p>"));
    }
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use g11_schemas::{GeoPoint, PointPage};

    fn point(title: &str, url: &str, dis: Option<f64>) -> NearPoint {
        NearPoint {
            page: PointPage {
                id: "p".to_string(),
                title: title.to_string(),
                url: url.to_string(),
                loc: GeoPoint {
                    coordinates: [105.0, 60.0],
                },
            },
            dis,
        }
    }

    #[test]
    fn info_window_with_distance() {
        let html = info_window_content(&point("Tower", "http://x/t", Some(1.5)));
        assert_eq!(
            html,
            "<a href=\"http://x/t\"><h3>Tower</h3></a><p>Distance: 1.5</p>"
        );
    }

    #[test]
    fn info_window_without_distance() {
        let html = info_window_content(&point("Tower", "u", None));
        assert_eq!(html, "<a href=\"u\"><h3>Tower</h3></a>");
    }

    #[test]
    fn title_and_url_are_escaped() {
        let html = info_window_content(&point("<b>&</b>", "a\"b", None));
        assert_eq!(
            html,
            "<a href=\"a&quot;b\"><h3>&lt;b&gt;&amp;&lt;/b&gt;</h3></a>"
        );
    }

    #[test]
    fn marker_position_is_lat_lng_from_lng_lat_coordinates() {
        let m = MarkerSpec::for_point(&point("T", "u", None), "dot.png");
        assert_eq!(m.position, LatLng::new(60.0, 105.0));
        assert_eq!(m.icon, "dot.png");
        assert_eq!(m.id, "p");
    }
}
