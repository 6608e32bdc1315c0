use cgmath::{InnerSpace, Vector3};
use starscape::planet::uv_sphere;

#[test]
fn sphere_vertex_and_index_counts_match_the_grid() {
    let (vertices, indices) = uv_sphere(0.7, 64);
    assert_eq!(vertices.len(), 65 * 65);
    assert_eq!(indices.len(), 64 * 64 * 6);
}

#[test]
fn every_vertex_sits_on_the_radius() {
    let (vertices, _) = uv_sphere(0.7, 16);
    for vertex in &vertices {
        let radius = Vector3::from(vertex.position).magnitude();
        assert!((radius - 0.7).abs() < 1e-5);
    }
}

#[test]
fn normals_are_unit_and_radial() {
    let (vertices, _) = uv_sphere(2.0, 8);
    for vertex in &vertices {
        let normal = Vector3::from(vertex.normal);
        assert!((normal.magnitude() - 1.0).abs() < 1e-5);
        let radial = Vector3::from(vertex.position).normalize();
        assert!((normal - radial).magnitude() < 1e-4);
    }
}

#[test]
fn indices_stay_in_range() {
    let (vertices, indices) = uv_sphere(1.0, 12);
    let max = vertices.len() as u32;
    assert!(indices.iter().all(|&i| i < max));
}

#[test]
fn degenerate_segment_counts_are_clamped() {
    let (vertices, indices) = uv_sphere(1.0, 1);
    // Clamped up to 3 segments: still a closed solid.
    assert_eq!(vertices.len(), 16);
    assert!(!indices.is_empty());
}
