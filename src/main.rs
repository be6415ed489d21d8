// main.rs
//
// Headless walk through a small scene: the camera moves a few steps and each
// frame is drawn in every mode into an in-memory surface.

use nalgebra::{Point3, Vector3};
use painter3d::{Camera, DrawMode, Real, RecordingSurface, RenderConfig, Renderer, Scene};

fn main() {
    let mut scene = Scene::new();
    scene.add_hexahedron(Point3::new(0.0, 0.0, 0.0), 10.0, 10.0, 10.0);
    scene.add_hexahedron(Point3::new(15.0, 0.0, 20.0), 5.0, 20.0, 5.0);
    scene.add_hexahedron(Point3::new(-20.0, -5.0, 5.0), 8.0, 4.0, 30.0);

    let mut camera = Camera::new_at(0.0, 0.0, -30.0, 75.0, 16.0 / 9.0);

    // (label, camera-space step, rotation step)
    let steps: [(&str, Vector3<Real>, (Real, Real, Real)); 4] = [
        ("start", Vector3::zeros(), (0.0, 0.0, 0.0)),
        ("strafe right", Vector3::new(6.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
        ("turn left", Vector3::zeros(), (0.0, -20.0, 0.0)),
        ("look down", Vector3::new(0.0, 4.0, 5.0), (10.0, 0.0, 0.0)),
    ];

    let modes = [DrawMode::Wireframe, DrawMode::Solid, DrawMode::Outline];
    let mut renderers: Vec<Renderer> = modes
        .iter()
        .map(|&mode| {
            Renderer::new(RenderConfig {
                mode,
                ..RenderConfig::default()
            })
        })
        .collect();
    let mut surface = RecordingSurface::new();

    for (label, offset, (rx, ry, rz)) in steps {
        camera.translate_local(&offset);
        camera.rotate(rx, ry, rz);
        let state = camera.state();
        println!(
            "{label}: position ({:.1}, {:.1}, {:.1}), rotation ({:.2}, {:.2}, {:.2})",
            state.position.x,
            state.position.y,
            state.position.z,
            state.rotation.x_deg,
            state.rotation.y_deg,
            state.rotation.z_deg
        );

        for (mode, renderer) in modes.iter().zip(renderers.iter_mut()) {
            surface.clear();
            let report = renderer.render_frame(&scene, &state, &mut surface);
            println!(
                "  {mode:?}: {} submissions, {} edges, {} triangles, {} faces, {} skipped{}",
                surface.submissions.len(),
                report.edges_submitted,
                report.triangles_submitted,
                report.renderable_faces,
                report.skipped.len(),
                if report.truncated { " (truncated)" } else { "" }
            );
            for skipped in &report.skipped {
                println!("    {skipped}");
            }
        }
    }
}
