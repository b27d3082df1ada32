use super::*;
use crate::directions::SUPPORTED_K;
use crate::extents::SlabExtent;
use crate::rand3::{cube_corners, sample_cloud, CloudParams};
use crate::source::{PositionBuffer, Transformed};
use nalgebra::{Matrix4, Vector3};

fn ready(k: u32, points: &[Vector3<f64>]) -> Dop {
    let mut dop = Dop::new(k).unwrap();
    dop.set_from_object(points).unwrap();
    dop
}

#[test]
fn new_rejects_unsupported_k() {
    assert_eq!(Dop::new(10).unwrap_err(), DopError::UnsupportedK { k: 10 });
    assert!(Dop::new(0).is_err());
}

#[test]
fn geometry_before_build_is_not_initialized() {
    let dop = Dop::new(14).unwrap();
    assert!(!dop.is_ready());
    assert_eq!(dop.geometry().unwrap_err(), DopError::NotInitialized);
    assert_eq!(dop.contains_point(&Vector3::zeros()).unwrap_err(), DopError::NotInitialized);
    assert_eq!(dop.generation(), 0);
}

#[test]
fn ids_are_distinct() {
    let a = Dop::new(6).unwrap();
    let b = Dop::new(6).unwrap();
    assert_ne!(a.id(), b.id());
}

#[test]
fn cube_scenario() {
    let mut dop = ready(6, &cube_corners(1.0));
    for e in dop.constraints().unwrap().extents() {
        assert_eq!(*e, SlabExtent::new(-1.0, 1.0));
    }
    let g = dop.geometry().unwrap();
    assert_eq!((g.vertices.len(), g.faces.len()), (8, 6));
    let cube_volume = g.volume();

    dop.change_k(8).unwrap();
    let s3 = 3.0f64.sqrt();
    for e in dop.constraints().unwrap().extents() {
        assert!((e.min + s3).abs() < 1e-12 && (e.max - s3).abs() < 1e-12);
    }
    assert!(dop.geometry().unwrap().volume() > cube_volume + 1.0);

    dop.change_k(14).unwrap();
    let g = dop.geometry().unwrap();
    assert_eq!((g.vertices.len(), g.faces.len()), (8, 6));
    assert!((g.volume() - cube_volume).abs() < 1e-9);
}

#[test]
fn empty_source_fails_and_keeps_state() {
    let mut dop = Dop::new(26).unwrap();
    let empty: Vec<Vector3<f64>> = Vec::new();
    assert_eq!(dop.set_from_object(&empty).unwrap_err(), DopError::EmptyGeometry);
    assert!(!dop.is_ready());

    dop.set_from_object(&cube_corners(1.0)).unwrap();
    let before = dop.geometry().unwrap().clone();
    let generation = dop.generation();
    assert!(dop.set_from_object(&empty).is_err());
    assert_eq!(dop.geometry().unwrap(), &before);
    assert_eq!(dop.generation(), generation);
}

#[test]
fn non_finite_source_fails_and_keeps_state() {
    let mut dop = ready(6, &cube_corners(2.0));
    let before = dop.constraints().unwrap().clone();
    let bad = vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, f64::NAN, 0.0)];
    assert!(matches!(
        dop.set_from_object(&bad),
        Err(DopError::DegeneratePolytope { .. })
    ));
    assert_eq!(dop.constraints().unwrap(), &before);
}

#[test]
fn unsupported_change_k_keeps_state() {
    let mut dop = ready(18, &cube_corners(1.0));
    assert_eq!(dop.change_k(7).unwrap_err(), DopError::UnsupportedK { k: 7 });
    assert_eq!(dop.k(), 18);
    assert!(dop.is_ready());
}

#[test]
fn change_k_when_uninitialized_only_swaps_directions() {
    let mut dop = Dop::new(6).unwrap();
    dop.change_k(20).unwrap();
    assert_eq!(dop.k(), 20);
    assert_eq!(dop.directions().len(), 10);
    assert!(!dop.is_ready());
    assert_eq!(dop.generation(), 0);
}

#[test]
fn k_round_trip_reproduces_extents() {
    let pts = sample_cloud(&CloudParams::ellipsoid(Vector3::new(3.0, 1.0, 2.0), 200), 42).unwrap();
    for &k1 in &SUPPORTED_K {
        let mut dop = ready(k1, &pts);
        let first = dop.constraints().unwrap().clone();
        let geom = dop.geometry().unwrap().clone();
        for &k2 in &SUPPORTED_K {
            dop.change_k(k2).unwrap();
            dop.change_k(k1).unwrap();
            assert_eq!(dop.constraints().unwrap(), &first, "{k1} -> {k2} -> {k1}");
            assert_eq!(dop.geometry().unwrap(), &geom);
        }
    }
}

#[test]
fn identical_input_is_deterministic() {
    let pts = sample_cloud(&CloudParams::cuboid(Vector3::new(1.0, 2.0, 0.5), 150), 8).unwrap();
    let a = ready(26, &pts);
    let b = ready(26, &pts);
    assert_eq!(a.constraints().unwrap(), b.constraints().unwrap());
    assert_eq!(a.geometry().unwrap(), b.geometry().unwrap());
}

#[test]
fn generation_counts_successful_rebuilds() {
    let mut dop = ready(6, &cube_corners(1.0));
    assert_eq!(dop.generation(), 1);
    dop.change_k(26).unwrap();
    assert_eq!(dop.generation(), 2);
    let _ = dop.change_k(5);
    assert_eq!(dop.generation(), 2);
    let id = dop.id();
    dop.set_from_object(&cube_corners(3.0)).unwrap();
    assert_eq!(dop.generation(), 3);
    assert_eq!(dop.id(), id);
}

#[test]
fn clear_returns_to_uninitialized() {
    let mut dop = ready(12, &cube_corners(1.0));
    dop.clear();
    assert!(!dop.is_ready());
    assert_eq!(dop.k(), 12);
    assert!(dop.points().is_err());
}

#[test]
fn accepts_typed_sources() {
    let flat: Vec<f32> = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    let mut dop = Dop::new(6).unwrap();
    dop.set_from_object(&PositionBuffer(&flat)).unwrap();
    assert_eq!(dop.points().unwrap().len(), 2);

    let shift = Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0));
    let corners = cube_corners(1.0);
    dop.set_from_object(&Transformed::new(corners.as_slice(), shift)).unwrap();
    let e = dop.constraints().unwrap().extents()[0];
    assert_eq!(e, SlabExtent::new(4.0, 6.0));
}

#[test]
fn far_from_origin_queries_use_local_tolerance() {
    let offset = Vector3::new(1.0e5, -2.0e5, 3.0e5);
    let pts: Vec<Vector3<f64>> = cube_corners(1.0e-3).iter().map(|p| p + offset).collect();
    let dop = ready(6, &pts);
    assert_eq!(dop.geometry().unwrap().faces.len(), 6);
    assert!(dop.contains_point(&offset).unwrap());
    // 1% of the half-width outside the +x face
    let outside = offset + Vector3::new(1.01e-3, 0.0, 0.0);
    assert!(!dop.contains_point(&outside).unwrap());
}

#[test]
fn point_queries() {
    let dop = ready(26, &cube_corners(1.0));
    assert!(dop.contains_point(&Vector3::zeros()).unwrap());
    assert!(dop.contains_point(&Vector3::new(1.0, 1.0, 1.0)).unwrap());
    assert!(!dop.contains_point(&Vector3::new(1.01, 0.0, 0.0)).unwrap());
}

#[test]
fn sphere_and_box_queries() {
    let dop = ready(14, &cube_corners(1.0));
    assert!(dop.intersects_sphere(&Vector3::new(1.5, 0.0, 0.0), 0.6).unwrap());
    assert!(!dop.intersects_sphere(&Vector3::new(3.0, 0.0, 0.0), 1.0).unwrap());
    // outside the corner diagonal plane
    assert!(!dop.intersects_sphere(&Vector3::new(2.0, 2.0, 2.0), 0.5).unwrap());

    assert!(dop
        .intersects_aabb(&Vector3::new(0.5, 0.5, 0.5), &Vector3::new(2.0, 2.0, 2.0))
        .unwrap());
    assert!(!dop
        .intersects_aabb(&Vector3::new(1.5, -1.0, -1.0), &Vector3::new(2.0, 1.0, 1.0))
        .unwrap());
}

#[test]
fn ray_queries() {
    let dop = ready(6, &cube_corners(1.0));
    let hit = dop
        .intersect_ray(&Vector3::new(-5.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0))
        .unwrap()
        .unwrap();
    assert!((hit - 4.0).abs() < 1e-6);
    let inside = dop
        .intersect_ray(&Vector3::zeros(), &Vector3::new(0.0, 1.0, 0.0))
        .unwrap();
    assert_eq!(inside, Some(0.0));
    let away = dop
        .intersect_ray(&Vector3::new(-5.0, 0.0, 0.0), &Vector3::new(-1.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(away, None);
    let parallel_miss = dop
        .intersect_ray(&Vector3::new(0.0, 3.0, 0.0), &Vector3::new(1.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(parallel_miss, None);
}

#[test]
fn dop_overlap() {
    let a = ready(26, &cube_corners(1.0));
    let shifted: Vec<Vector3<f64>> = cube_corners(1.0)
        .iter()
        .map(|p| p + Vector3::new(1.5, 0.0, 0.0))
        .collect();
    let b = ready(26, &shifted);
    assert!(a.intersects_dop(&b).unwrap());

    let far: Vec<Vector3<f64>> = shifted.iter().map(|p| p + Vector3::new(5.0, 0.0, 0.0)).collect();
    let c = ready(6, &far);
    assert!(!a.intersects_dop(&c).unwrap());
    assert!(!c.intersects_dop(&a).unwrap());
}

#[test]
fn convex_points_are_flat_f32() {
    let dop = ready(6, &cube_corners(1.0));
    let flat = dop.convex_points().unwrap();
    assert_eq!(flat.len(), 8 * 3);
    assert!(flat.iter().all(|c| c.abs() == 1.0));
}

#[test]
fn dop_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dop>();
}
