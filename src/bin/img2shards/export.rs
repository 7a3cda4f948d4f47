// export.rs - Write fragment surfaces and the schedule manifest

use serde::Serialize;
use std::fs;
use std::path::Path;

use shatter_engine::shatter::{FragmentSchedule, Rect, ShatterSession};

#[derive(Serialize)]
struct Manifest<'a> {
    seed: u64,
    focus: (f32, f32),
    duration: f32,
    fragments: Vec<ManifestEntry<'a>>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    file: String,
    bounds: &'a Rect,
    centroid: (f32, f32),
    schedule: &'a FragmentSchedule,
}

fn file_name(i: usize) -> String {
    format!("fragment_{i:03}.png")
}

/// One PNG per fragment, named by triangle order
pub fn write_fragments(dir: &Path, session: &ShatterSession) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for (i, f) in session.fragments.iter().enumerate() {
        f.surface.save(dir.join(file_name(i)))?;
    }
    Ok(())
}

pub fn write_manifest(path: &Path, session: &ShatterSession, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = Manifest {
        seed,
        focus: (session.focus.x, session.focus.y),
        duration: session.duration(),
        fragments: session
            .fragments
            .iter()
            .enumerate()
            .map(|(i, f)| ManifestEntry {
                file: file_name(i),
                bounds: &f.geometry.bounds,
                centroid: (f.geometry.centroid.x, f.geometry.centroid.y),
                schedule: &f.schedule,
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
    fs::write(path, ron::ser::to_string_pretty(&manifest, pretty)?)?;
    log::debug!("manifest written to {}", path.display());
    Ok(())
}
