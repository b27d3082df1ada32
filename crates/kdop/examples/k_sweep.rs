//! Sweep every supported k over one cloud and print hull sizes.
//!
//! Usage:
//!   cargo run -p kdop --example k_sweep -- ellipsoid
//!   cargo run -p kdop --example k_sweep -- box
//!
//! Volume shrinks as directions are added; the ratio column is relative to
//! the axis-aligned box (k = 6).

use kdop::api::{sample_cloud, CloudParams, Dop, DopHelper, SUPPORTED_K};
use nalgebra::{Rotation3, Vector3};

fn main() {
    let shape = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ellipsoid".to_string());
    let half = Vector3::new(2.0, 1.0, 0.5);
    let mut params = match shape.as_str() {
        "ellipsoid" => CloudParams::ellipsoid(half, 2_000),
        "box" => CloudParams::cuboid(half, 2_000),
        _ => {
            eprintln!("usage: k_sweep [ellipsoid|box]");
            return;
        }
    };
    params.rotation = Some(Rotation3::from_euler_angles(0.5, 0.2, -0.7));
    let points = sample_cloud(&params, 2025).unwrap();

    let mut dop = Dop::new(6).unwrap();
    dop.set_from_object(points.as_slice()).unwrap();
    let box_volume = dop.geometry().unwrap().volume();
    for k in SUPPORTED_K {
        dop.change_k(k).unwrap();
        let geom = dop.geometry().unwrap();
        let helper = DopHelper::new(&dop).unwrap();
        println!(
            "k={k:2}: V={:3} F={:3} E={:3} volume={:.4} ratio={:.3}",
            geom.vertices.len(),
            geom.faces.len(),
            helper.edges().segments.len(),
            geom.volume(),
            geom.volume() / box_volume
        );
    }
}
