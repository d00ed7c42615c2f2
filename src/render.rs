//! SVG rendering of solutions.
//!
//! Each route is drawn as a closed polyline through the depot in its own
//! color; customers are circles, the depot is a black square.

use std::fmt::Write as _;

use crate::models::{Instance, Solution};

const CANVAS: f64 = 800.0;
const MARGIN: f64 = 40.0;
const TITLE_HEIGHT: f64 = 30.0;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Maps instance coordinates onto the canvas, keeping the aspect ratio and
/// flipping the y axis.
struct Projection {
    min_x: f64,
    min_y: f64,
    scale: f64,
}

impl Projection {
    fn fit(instance: &Instance) -> Self {
        let nodes = instance.nodes();
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for n in nodes {
            min_x = min_x.min(n.x());
            min_y = min_y.min(n.y());
            max_x = max_x.max(n.x());
            max_y = max_y.max(n.y());
        }
        let span = (max_x - min_x).max(max_y - min_y);
        let usable = CANVAS - 2.0 * MARGIN;
        let scale = if span > 0.0 { usable / span } else { 1.0 };
        Self { min_x, min_y, scale }
    }

    fn point(&self, instance: &Instance, index: usize) -> (f64, f64) {
        let node = instance.node(index);
        let x = MARGIN + (node.x() - self.min_x) * self.scale;
        let y = TITLE_HEIGHT + CANVAS - MARGIN - (node.y() - self.min_y) * self.scale;
        (x, y)
    }
}

/// Renders `solution` over `instance` as a standalone SVG document.
///
/// Route indices that fall outside the instance are skipped.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Instance, Node};
/// use u_cvrp::constructive::savings;
/// use u_cvrp::render::render_svg;
///
/// let instance = Instance::new(
///     vec![Node::depot(0.0, 0.0), Node::new(1.0, 0.0, 1), Node::new(0.0, 1.0, 1)],
///     5,
///     0,
/// )
/// .unwrap();
/// let svg = render_svg(&savings(&instance).unwrap(), &instance, "Savings");
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("<title>Savings</title>"));
/// ```
pub fn render_svg(solution: &Solution, instance: &Instance, title: &str) -> String {
    let projection = Projection::fit(instance);
    let depot = instance.depot();
    let title = escape(title);
    let height = CANVAS + TITLE_HEIGHT;

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS}" height="{height}" viewBox="0 0 {CANVAS} {height}">"#
    );
    let _ = writeln!(svg, "<title>{title}</title>");
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="22" font-family="sans-serif" font-size="18" text-anchor="middle">{title}</text>"#,
        CANVAS / 2.0
    );

    for (i, route) in solution.routes().iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points = std::iter::once(depot)
            .chain(route.customers().iter().copied().filter(|&c| c < instance.num_nodes()))
            .map(|c| {
                let (x, y) = projection.point(instance, c);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            r#"<polygon points="{points}" fill="none" stroke="{color}" stroke-width="2"/>"#
        );
    }

    for c in instance.customers() {
        let (x, y) = projection.point(instance, c);
        let _ = writeln!(svg, r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="#333"/>"##);
    }

    let (x, y) = projection.point(instance, depot);
    let _ = writeln!(
        svg,
        r#"<rect x="{:.1}" y="{:.1}" width="10" height="10" fill="black"/>"#,
        x - 5.0,
        y - 5.0
    );
    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Route};

    fn setup() -> Instance {
        Instance::new(
            vec![
                Node::depot(0.0, 0.0),
                Node::new(10.0, 0.0, 1),
                Node::new(0.0, 10.0, 1),
                Node::new(-10.0, 0.0, 1),
            ],
            2,
            0,
        )
        .expect("valid")
    }

    #[test]
    fn test_one_polygon_per_route() {
        let inst = setup();
        let sol = Solution::from_routes(vec![
            Route::from_parts(vec![1, 2], 2),
            Route::from_parts(vec![3], 1),
        ]);
        let svg = render_svg(&sol, &inst, "Test");
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(PALETTE[0]));
        assert!(svg.contains(PALETTE[1]));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_points_inside_canvas() {
        let inst = setup();
        let projection = Projection::fit(&inst);
        for i in 0..inst.num_nodes() {
            let (x, y) = projection.point(&inst, i);
            assert!((MARGIN..=CANVAS - MARGIN).contains(&x));
            assert!((TITLE_HEIGHT + MARGIN..=TITLE_HEIGHT + CANVAS - MARGIN).contains(&y));
        }
    }

    #[test]
    fn test_single_point_instance() {
        let inst = Instance::new(vec![Node::depot(3.0, 3.0)], 1, 0).expect("valid");
        let svg = render_svg(&Solution::new(), &inst, "Empty");
        assert!(svg.contains("<rect x="));
    }

    #[test]
    fn test_title_is_escaped() {
        let inst = setup();
        let svg = render_svg(&Solution::new(), &inst, "A & <B>");
        assert!(svg.contains("A &amp; &lt;B&gt;"));
        assert!(!svg.contains("A & <B>"));
    }
}
