use anyhow::Result;
use bowyer_watson::{DelaunayMesh, Point};
use svg::node::element::{Circle, Line};
use svg::Document;

const XS: [f64; 20] = [
    24.0, 11.0, 39.0, 16.0, 7.0, 40.0, 90.0, 79.0, 75.0, 22.0, 53.0, 28.0, 17.0, 11.0, 22.0,
    91.0, 82.0, 80.0, 79.0, 19.0,
];
const YS: [f64; 20] = [
    31.0, 62.0, 72.0, 84.0, 87.0, 9.0, 60.0, 66.0, 50.0, 18.0, 47.0, 9.0, 92.0, 85.0, 54.0,
    30.0, 90.0, 57.0, 87.0, 84.0,
];

const LINE_STYLE: &str = "stroke:black;stroke-width:0.3";
const POINT_STYLE: &str = "fill:crimson";

/// Triangulates a fixed set of 20 points inside a 99 × 99 frame and prints the result.
///
/// Pass a file name to additionally render the mesh as SVG, e.g.
/// `cargo run --example fixture -- mesh.svg`.
fn main() -> Result<()> {
    let mut mesh = DelaunayMesh::with_capacity(99.0, 99.0, XS.len());

    println!("Adding Points");
    for (index, (x, y)) in XS.iter().zip(YS.iter()).enumerate() {
        println!("i: {} / {}", index, XS.len());
        mesh.insert(Point::new(*x, *y))?;
    }

    println!("Reporting");
    println!("Points");
    for point in mesh.points() {
        println!("{} {}", point.x, point.y);
    }
    println!();
    println!("Triangles");
    for [a, b, c] in mesh.triangle_indices() {
        println!("{} {} {}", a, b, c);
    }

    if let Some(path) = std::env::args().nth(1) {
        save_svg(&mesh, &path)?;
        println!("Saved mesh to {}", path);
    }
    Ok(())
}

fn save_svg(mesh: &DelaunayMesh, path: &str) -> Result<()> {
    let margin = 2.0;
    let mut document = Document::new().set(
        "viewBox",
        (
            -margin,
            -margin,
            mesh.width() + 2.0 * margin,
            mesh.height() + 2.0 * margin,
        ),
    );

    for (handle, _) in mesh.triangles() {
        let Some(positions) = mesh.triangle_positions(handle) else {
            continue;
        };
        for index in 0..3 {
            let from = positions[index];
            let to = positions[(index + 1) % 3];
            document = document.add(
                Line::new()
                    .set("x1", from.x)
                    .set("y1", from.y)
                    .set("x2", to.x)
                    .set("y2", to.y)
                    .set("style", LINE_STYLE),
            );
        }
    }

    for point in mesh.points() {
        document = document.add(
            Circle::new()
                .set("cx", point.x)
                .set("cy", point.y)
                .set("r", 0.8)
                .set("style", POINT_STYLE),
        );
    }

    svg::save(path, &document)?;
    Ok(())
}
